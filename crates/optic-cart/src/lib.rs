//! Optic Cart
//!
//! A shopping cart that survives page loads: an ordered ledger of line items
//! keyed by a fingerprint of each product's displayed name and price, mirrored
//! to a durable key-value slot after every change.
//!
//! # Core Concepts
//!
//! - [`CartStore`]: Owns the cart, persists it, reports the unit total
//! - [`identify`]: Fingerprint of a product's name and price text
//! - [`CartState`]: Insertion-ordered `id -> LineItem` map and its JSON form
//! - [`KeyValueStore`]: The durable slot ([`MemoryStore`], [`FileStore`])
//! - [`DiagnosticSink`]: Where recovered failures are reported
//!
//! # Example
//!
//! ```rust
//! use optic_cart::{CartStore, MemoryStore, ProductInfo};
//!
//! let mut cart = CartStore::open(MemoryStore::new());
//! let id = cart.add_product(ProductInfo::new("Glasses X", "100 rub"));
//! cart.add_product(ProductInfo::new("Glasses X", "100 rub"));
//!
//! assert_eq!(cart.get(&id).map(|item| item.quantity), Some(2));
//! assert_eq!(cart.badge(), "Cart (2)");
//! ```

#![warn(unreachable_pub)]

// Core modules
pub mod badge;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fingerprint;
pub mod item;
pub mod state;
pub mod storage;
pub mod store;

// Re-exports for convenience
pub use badge::badge_text;
pub use config::CartConfig;
pub use diagnostics::{DiagnosticEvent, DiagnosticSink, RecordingSink, Report, TracingSink};
pub use error::{ConfigError, HydrateError, StorageError};
pub use fingerprint::{identify, identify_with_length};
pub use item::{ItemId, LineItem, ProductInfo};
pub use state::{CartState, DroppedEntry, Restored};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::CartStore;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the cart
    pub use crate::{
        CartConfig, CartStore, DiagnosticSink, FileStore, ItemId, KeyValueStore, LineItem,
        MemoryStore, ProductInfo,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
