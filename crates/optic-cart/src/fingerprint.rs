//! Product fingerprints
//!
//! A product has no external id, so it is identified by the text a shopper
//! sees: its name and its price. The fingerprint is a truncated Blake3 hex
//! digest of that text. Truncation means two different products can collide;
//! they are then grouped as one line item, same as two products whose
//! displayed name and price are identical.

use crate::item::ItemId;

/// Default fingerprint length in hex characters
pub const DEFAULT_ID_LENGTH: usize = 16;

/// Shortest accepted fingerprint length
pub const MIN_ID_LENGTH: usize = 8;

/// Longest fingerprint length (full 32-byte digest)
pub const MAX_ID_LENGTH: usize = 64;

/// Fingerprint a product with the default length
#[inline]
#[must_use]
pub fn identify(name: &str, price: &str) -> ItemId {
    identify_with_length(name, price, DEFAULT_ID_LENGTH)
}

/// Fingerprint a product, truncated to `length` hex characters
///
/// `length` is clamped to [`MIN_ID_LENGTH`]..=[`MAX_ID_LENGTH`].
#[must_use]
pub fn identify_with_length(name: &str, price: &str, length: usize) -> ItemId {
    let text = format!("{}-{}", normalize(name), normalize(price));
    let digest = blake3::hash(text.as_bytes());
    let mut id = hex::encode(digest.as_bytes());
    id.truncate(length.clamp(MIN_ID_LENGTH, MAX_ID_LENGTH));
    ItemId::new(id)
}

/// Trim and collapse whitespace runs, as text renders on the page
fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
