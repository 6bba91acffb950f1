//! In-memory cart state and its persisted form
//!
//! The persisted form is a JSON array of `[id, item]` pairs in insertion
//! order:
//!
//! ```text
//! [["3f2a9c0d1e4b5a67",{"id":"3f2a9c0d1e4b5a67","name":"Glasses X",
//!   "price":"100 rub","image":"","originalPrice":null,"quantity":2}]]
//! ```

use crate::item::{ItemId, LineItem};
use indexmap::IndexMap;

/// Mapping from product id to line item, in insertion order
///
/// Every stored item has `quantity >= 1`. Mutators that would leave an item
/// at zero remove it instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    items: IndexMap<ItemId, LineItem>,
}

/// Result of decoding a persisted blob
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Restored {
    /// Decoded state, holding only valid entries
    pub state: CartState,
    /// Entries discarded while decoding
    pub dropped: Vec<DroppedEntry>,
}

/// A persisted entry that could not be restored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedEntry {
    /// Key the entry was stored under
    pub id: ItemId,
    /// Why it was discarded
    pub reason: String,
}

impl Restored {
    fn drop_entry(&mut self, id: ItemId, reason: impl Into<String>) {
        self.state.items.shift_remove(&id);
        self.dropped.push(DroppedEntry {
            id,
            reason: reason.into(),
        });
    }
}

impl CartState {
    /// Create empty state
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct line items
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the cart holds nothing
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an item
    #[inline]
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&LineItem> {
        self.items.get(id)
    }

    /// Check if id is present
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.contains_key(id)
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, &LineItem)> {
        self.items.iter()
    }

    /// Increment an existing item, returning its new quantity
    ///
    /// Returns `None` if the id is absent. Saturates at `u64::MAX`.
    pub fn increment(&mut self, id: &ItemId) -> Option<u64> {
        let item = self.items.get_mut(id)?;
        item.quantity = item.quantity.saturating_add(1);
        Some(item.quantity)
    }

    /// Insert a new item, replacing any entry under the same id in place
    ///
    /// A zero-quantity item is not stored.
    pub fn insert(&mut self, item: LineItem) {
        if item.quantity == 0 {
            self.items.shift_remove(&item.id);
            return;
        }
        self.items.insert(item.id.clone(), item);
    }

    /// Set an existing item's quantity; zero removes it
    ///
    /// Returns `false` if the id is absent (nothing is created).
    pub fn set_quantity(&mut self, id: &ItemId, quantity: u64) -> bool {
        if quantity == 0 {
            return self.remove(id).is_some();
        }
        match self.items.get_mut(id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove an item, keeping the order of the rest
    pub fn remove(&mut self, id: &ItemId) -> Option<LineItem> {
        self.items.shift_remove(id)
    }

    /// Remove everything
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of quantities across all items, saturating at `u64::MAX`
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items
            .values()
            .fold(0u64, |total, item| total.saturating_add(item.quantity))
    }

    /// Owned copy of all items in insertion order
    #[must_use]
    pub fn items(&self) -> Vec<LineItem> {
        self.items.values().cloned().collect()
    }

    /// Encode as the persisted JSON pair array
    ///
    /// # Errors
    /// Returns error if JSON encoding fails
    pub fn serialize(&self) -> Result<String, serde_json::Error> {
        let pairs: Vec<(&ItemId, &LineItem)> = self.items.iter().collect();
        serde_json::to_string(&pairs)
    }

    /// Decode the persisted JSON pair array
    ///
    /// Later duplicates overwrite earlier ones in the earlier position. The
    /// pair key is authoritative over the item's embedded id. Entries whose
    /// item is malformed or has a zero quantity are dropped on their own,
    /// removing any earlier entry under the same id, and listed in
    /// [`Restored::dropped`].
    ///
    /// # Errors
    /// Returns error if the text is not an array of `[string, any]` pairs
    pub fn deserialize(text: &str) -> Result<Restored, serde_json::Error> {
        let pairs: Vec<(ItemId, serde_json::Value)> = serde_json::from_str(text)?;
        let mut restored = Restored::default();

        for (id, value) in pairs {
            let mut item = match serde_json::from_value::<LineItem>(value) {
                Ok(item) => item,
                Err(e) => {
                    restored.drop_entry(id, e.to_string());
                    continue;
                }
            };
            if item.quantity == 0 {
                restored.drop_entry(id, "zero quantity");
                continue;
            }
            item.id = id.clone();
            restored.state.items.insert(id, item);
        }

        Ok(restored)
    }
}

impl FromIterator<LineItem> for CartState {
    fn from_iter<I: IntoIterator<Item = LineItem>>(iter: I) -> Self {
        let mut state = Self::new();
        for item in iter {
            state.insert(item);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ProductInfo;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn item(id: &str, quantity: u64) -> LineItem {
        let mut item = ProductInfo::new(format!("name {id}"), "10").resolve(ItemId::new(id));
        item.quantity = quantity;
        item
    }

    #[test]
    fn insert_and_increment() {
        let mut state = CartState::new();
        state.insert(item("a", 1));
        assert_eq!(state.increment(&ItemId::new("a")), Some(2));
        assert_eq!(state.increment(&ItemId::new("missing")), None);
        assert_eq!(state.total_quantity(), 2);
    }

    #[test]
    fn insert_zero_quantity_is_not_stored() {
        let mut state = CartState::new();
        state.insert(item("a", 0));
        assert!(state.is_empty());
    }

    #[test]
    fn set_quantity_zero_removes() {
        let mut state: CartState = [item("a", 3), item("b", 1)].into_iter().collect();
        assert!(state.set_quantity(&ItemId::new("a"), 0));
        assert!(!state.contains(&ItemId::new("a")));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn set_quantity_absent_does_not_create() {
        let mut state = CartState::new();
        assert!(!state.set_quantity(&ItemId::new("ghost"), 5));
        assert!(state.is_empty());
    }

    #[test]
    fn remove_preserves_order() {
        let mut state: CartState = [item("a", 1), item("b", 1), item("c", 1)]
            .into_iter()
            .collect();
        state.remove(&ItemId::new("a"));
        let ids: Vec<_> = state.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn serialize_writes_pair_array() {
        let state: CartState = [item("a", 2)].into_iter().collect();
        let json: serde_json::Value = serde_json::from_str(&state.serialize().unwrap()).unwrap();
        assert_eq!(json[0][0], "a");
        assert_eq!(json[0][1]["quantity"], 2);
        assert_eq!(json[0][1]["name"], "name a");
    }

    #[test]
    fn deserialize_empty_array() {
        let restored = CartState::deserialize("[]").unwrap();
        assert!(restored.state.is_empty());
        assert!(restored.dropped.is_empty());
    }

    #[test]
    fn deserialize_rejects_garbage() {
        assert!(CartState::deserialize("{not json").is_err());
        assert!(CartState::deserialize(r#"{"a":1}"#).is_err());
        assert!(CartState::deserialize(r#"[["a"]]"#).is_err());
        assert!(CartState::deserialize(r#"[[1,{}]]"#).is_err());
    }

    #[test]
    fn deserialize_keeps_quantities_beyond_u32() {
        let text = r#"[["a",{"id":"a","name":"n","price":"1","quantity":5000000000}],
                      ["b",{"id":"b","name":"n","price":"1","quantity":1}]]"#;
        let restored = CartState::deserialize(text).unwrap();
        assert!(restored.dropped.is_empty());
        assert_eq!(restored.state.get(&ItemId::new("a")).unwrap().quantity, 5_000_000_000);
        assert_eq!(restored.state.total_quantity(), 5_000_000_001);
    }

    #[test]
    fn deserialize_drops_only_the_malformed_entry() {
        let text = r#"[["a",{"id":"a","name":"n","price":"1","quantity":-2}],
                      ["b",{"id":"b","name":"n","price":"1","quantity":1}],
                      ["c",{"name":"missing price"}]]"#;
        let restored = CartState::deserialize(text).unwrap();
        let dropped: Vec<_> = restored.dropped.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(dropped, vec!["a", "c"]);
        assert_eq!(restored.state.len(), 1);
        assert!(restored.state.contains(&ItemId::new("b")));
    }

    #[test]
    fn total_quantity_saturates() {
        let state: CartState = [item("a", u64::MAX), item("b", 2)].into_iter().collect();
        assert_eq!(state.total_quantity(), u64::MAX);
    }

    #[test]
    fn increment_past_u32_range() {
        let mut state: CartState = [item("a", u64::from(u32::MAX))].into_iter().collect();
        assert_eq!(state.increment(&ItemId::new("a")), Some(u64::from(u32::MAX) + 1));
    }

    #[test]
    fn deserialize_drops_zero_quantity() {
        let text = r#"[["a",{"id":"a","name":"n","price":"1","image":"","originalPrice":null,"quantity":0}],
                      ["b",{"id":"b","name":"n","price":"1","image":"","originalPrice":null,"quantity":1}]]"#;
        let restored = CartState::deserialize(text).unwrap();
        assert_eq!(
            restored.dropped,
            vec![DroppedEntry {
                id: ItemId::new("a"),
                reason: "zero quantity".to_string(),
            }]
        );
        assert_eq!(restored.state.len(), 1);
    }

    #[test]
    fn deserialize_key_wins_over_embedded_id() {
        let text = r#"[["key",{"id":"other","name":"n","price":"1","quantity":1}]]"#;
        let restored = CartState::deserialize(text).unwrap();
        let item = restored.state.get(&ItemId::new("key")).unwrap();
        assert_eq!(item.id, ItemId::new("key"));
    }

    #[test]
    fn deserialize_duplicate_keeps_first_position_last_value() {
        let text = r#"[["a",{"id":"a","name":"n","price":"1","quantity":1}],
                      ["b",{"id":"b","name":"n","price":"1","quantity":1}],
                      ["a",{"id":"a","name":"n","price":"1","quantity":7}]]"#;
        let state = CartState::deserialize(text).unwrap().state;
        let order: Vec<_> = state.iter().map(|(id, i)| (id.as_str(), i.quantity)).collect();
        assert_eq!(order, vec![("a", 7), ("b", 1)]);
    }

    fn arb_item() -> impl Strategy<Value = LineItem> {
        (
            "[a-f0-9]{16}",
            ".*",
            ".*",
            ".*",
            proptest::option::of(".*"),
            1u64..10_000_000_000,
        )
            .prop_map(|(id, name, price, image, original_price, quantity)| LineItem {
                id: ItemId::new(id),
                name,
                price,
                image,
                original_price,
                quantity,
            })
    }

    proptest! {
        #[test]
        fn persisted_form_round_trips(items in proptest::collection::vec(arb_item(), 0..12)) {
            let state: CartState = items.into_iter().collect();
            let text = state.serialize().unwrap();
            let restored = CartState::deserialize(&text).unwrap();
            prop_assert!(restored.dropped.is_empty());
            prop_assert_eq!(&restored.state, &state);
            prop_assert_eq!(restored.state.serialize().unwrap(), text);
        }
    }
}
