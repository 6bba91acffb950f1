//! The cart store
//!
//! [`CartStore`] owns the cart state, mirrors it to a durable slot after
//! every mutation, and answers the badge's "how many units" question.
//!
//! A store is hydrated inside its constructor, so there is no way to hold an
//! un-hydrated one. Hydration and persistence never fail from the caller's
//! point of view: problems go to the [`DiagnosticSink`] and the in-memory
//! state remains the source of truth for the session.
//!
//! Two stores on the same slot do not coordinate. The last one to persist
//! wins, and neither sees the other's writes until [`CartStore::reload`].

use crate::badge::badge_text;
use crate::config::CartConfig;
use crate::diagnostics::{DiagnosticEvent, DiagnosticSink, TracingSink};
use crate::error::HydrateError;
use crate::fingerprint::identify_with_length;
use crate::item::{ItemId, LineItem, ProductInfo};
use crate::state::{CartState, Restored};
use crate::storage::KeyValueStore;

/// Persisted cart of line items
#[derive(Debug)]
pub struct CartStore<S, D = TracingSink> {
    state: CartState,
    storage: S,
    sink: D,
    config: CartConfig,
    key: String,
}

impl<S: KeyValueStore> CartStore<S, TracingSink> {
    /// Open a store with default config, logging through `tracing`
    #[must_use]
    pub fn open(storage: S) -> Self {
        Self::with_parts(storage, TracingSink, CartConfig::default())
    }
}

impl<S: KeyValueStore, D: DiagnosticSink> CartStore<S, D> {
    /// Open a store and hydrate it from `storage`
    #[must_use]
    pub fn with_parts(storage: S, sink: D, config: CartConfig) -> Self {
        let key = config.storage_key();
        let mut store = Self {
            state: CartState::new(),
            storage,
            sink,
            config,
            key,
        };
        store.hydrate();
        store
    }

    /// Fingerprint a product with the configured id length
    #[must_use]
    pub fn identify(&self, name: &str, price: &str) -> ItemId {
        identify_with_length(name, price, self.config.id_length)
    }

    /// Add one unit of `id`, creating the line item from `info` if new
    ///
    /// `info` is only consulted on creation. An empty id is reported and
    /// ignored.
    pub fn add_or_increment(&mut self, id: ItemId, info: ProductInfo) {
        if id.as_str().is_empty() {
            self.sink
                .report(DiagnosticEvent::IdentifyFailed, "empty product id");
            return;
        }

        match self.state.increment(&id) {
            Some(quantity) => {
                tracing::debug!(id = %id, quantity, "incremented cart item");
            }
            None => {
                tracing::debug!(id = %id, "added cart item");
                self.state.insert(info.resolve(id));
            }
        }
        self.persist();
    }

    /// Identify a product from its info and add one unit of it
    pub fn add_product(&mut self, info: ProductInfo) -> ItemId {
        let id = self.identify(info.name_text(), info.price_text());
        self.add_or_increment(id.clone(), info);
        id
    }

    /// Remove a line item; absent ids are not an error
    pub fn remove_item(&mut self, id: &ItemId) {
        if self.state.remove(id).is_some() {
            tracing::debug!(id = %id, "removed cart item");
        }
        self.persist();
    }

    /// Set an item's quantity
    ///
    /// `quantity <= 0` removes the item. For an absent id with a positive
    /// quantity nothing happens; use [`add_or_increment`](Self::add_or_increment)
    /// to create items.
    pub fn update_quantity(&mut self, id: &ItemId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }

        let quantity = quantity.unsigned_abs();
        if self.state.set_quantity(id, quantity) {
            tracing::debug!(id = %id, quantity, "updated cart item quantity");
            self.persist();
        }
    }

    /// Empty the cart; the durable slot is kept and holds an empty cart
    pub fn clear(&mut self) {
        self.state.clear();
        tracing::debug!("cleared cart");
        self.persist();
    }

    /// Sum of quantities across all items
    #[inline]
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.state.total_quantity()
    }

    /// Owned copy of the current items in insertion order
    #[inline]
    #[must_use]
    pub fn items(&self) -> Vec<LineItem> {
        self.state.items()
    }

    /// Look up one item
    #[inline]
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&LineItem> {
        self.state.get(id)
    }

    /// Number of distinct line items
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.len()
    }

    /// True when the cart holds nothing
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Counter badge text for the current total
    #[must_use]
    pub fn badge(&self) -> String {
        badge_text(&self.config.badge_label, self.total_quantity())
    }

    /// Replace in-memory state with whatever the durable slot holds now
    pub fn reload(&mut self) {
        self.hydrate();
    }

    /// Read-only view of the state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Durable slot backend
    #[inline]
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Diagnostic sink
    #[inline]
    #[must_use]
    pub fn sink(&self) -> &D {
        &self.sink
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// Durable slot key
    #[inline]
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    fn persist(&self) {
        let text = match self.state.serialize() {
            Ok(text) => text,
            Err(e) => {
                self.sink
                    .report(DiagnosticEvent::PersistFailed, &e.to_string());
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.key, &text) {
            self.sink
                .report(DiagnosticEvent::PersistFailed, &e.to_string());
        }
    }

    fn hydrate(&mut self) {
        match self.load() {
            Ok(Restored { state, dropped }) => {
                for entry in dropped {
                    self.sink.report(
                        DiagnosticEvent::EntryDropped,
                        &format!("entry {}: {}", entry.id, entry.reason),
                    );
                }
                tracing::debug!(
                    key = %self.key,
                    items = state.len(),
                    total = state.total_quantity(),
                    "hydrated cart"
                );
                self.state = state;
            }
            Err(e) => {
                self.sink
                    .report(DiagnosticEvent::HydrateFailed, &e.to_string());
                self.state = CartState::new();
            }
        }
    }

    fn load(&self) -> Result<Restored, HydrateError> {
        match self.storage.get(&self.key)? {
            Some(text) => Ok(CartState::deserialize(&text)?),
            None => Ok(Restored::default()),
        }
    }
}
