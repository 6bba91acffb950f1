//! Line items and the product data they are built from

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Placeholder name for products whose markup carried no name
pub const DEFAULT_NAME: &str = "Unknown item";

/// Placeholder price for products whose markup carried no price
pub const DEFAULT_PRICE: &str = "0";

/// Product identity in the cart
///
/// Normally produced by [`identify`](crate::identify), but any non-empty
/// string is accepted: ids read back from storage are taken as-is.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Wrap an existing id string
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Product details as extracted from a rendered product card
///
/// Every field is optional; [`ProductInfo::resolve`] substitutes the safe
/// placeholders when a new line item is created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductInfo {
    /// Displayed product name
    pub name: Option<String>,
    /// Displayed price text
    pub price: Option<String>,
    /// Image URL
    pub image: Option<String>,
    /// Crossed-out price text, when the product is discounted
    pub original_price: Option<String>,
}

impl ProductInfo {
    /// Info with a name and price
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price.into()),
            ..Self::default()
        }
    }

    /// With image URL
    #[inline]
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// With original (pre-discount) price
    #[inline]
    #[must_use]
    pub fn with_original_price(mut self, price: impl Into<String>) -> Self {
        self.original_price = Some(price.into());
        self
    }

    /// Name text used for identification (empty when missing)
    #[must_use]
    pub fn name_text(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Price text used for identification (empty when missing)
    #[must_use]
    pub fn price_text(&self) -> &str {
        self.price.as_deref().unwrap_or_default()
    }

    /// Build a fresh line item with quantity 1, filling placeholders
    #[must_use]
    pub fn resolve(self, id: ItemId) -> LineItem {
        LineItem {
            id,
            name: present(self.name).unwrap_or_else(|| DEFAULT_NAME.to_string()),
            price: present(self.price).unwrap_or_else(|| DEFAULT_PRICE.to_string()),
            image: present(self.image).unwrap_or_default(),
            original_price: present(self.original_price),
            quantity: 1,
        }
    }
}

/// Blank strings count as missing markup
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// One product entry in the cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Fingerprint this item is keyed by
    pub id: ItemId,
    /// Displayed name
    pub name: String,
    /// Display-formatted price, never parsed
    pub price: String,
    /// Image URL, possibly empty
    #[serde(default)]
    pub image: String,
    /// Pre-discount price, if any
    #[serde(default)]
    pub original_price: Option<String>,
    /// Units in the cart, always at least 1 while stored
    pub quantity: u64,
}
