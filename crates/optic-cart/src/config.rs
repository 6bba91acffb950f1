//! Cart configuration

use crate::error::ConfigError;
use crate::fingerprint::{DEFAULT_ID_LENGTH, MAX_ID_LENGTH, MIN_ID_LENGTH};
use serde::{Deserialize, Serialize};

/// Cart configuration
///
/// Every field has a default, so a partial config file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CartConfig {
    /// Application namespace; the durable slot key is `"{namespace}-cart"`
    pub namespace: String,
    /// Fingerprint length in hex characters
    pub id_length: usize,
    /// Text shown on the cart counter badge
    pub badge_label: String,
}

impl CartConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With namespace
    #[inline]
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// With fingerprint length
    #[inline]
    #[must_use]
    pub fn with_id_length(mut self, length: usize) -> Self {
        self.id_length = length;
        self
    }

    /// With badge label
    #[inline]
    #[must_use]
    pub fn with_badge_label(mut self, label: impl Into<String>) -> Self {
        self.badge_label = label.into();
        self
    }

    /// Key of the durable slot
    #[must_use]
    pub fn storage_key(&self) -> String {
        format!("{}-cart", self.namespace)
    }

    /// Check field values
    ///
    /// # Errors
    /// Returns error if the namespace is empty or not storage-safe, or the
    /// id length is outside the supported range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace.is_empty() {
            return Err(ConfigError::Invalid("namespace must not be empty".into()));
        }
        if !self
            .namespace
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-'))
        {
            return Err(ConfigError::Invalid(format!(
                "namespace '{}' may only contain ASCII letters, digits, '_' and '-'",
                self.namespace
            )));
        }
        if !(MIN_ID_LENGTH..=MAX_ID_LENGTH).contains(&self.id_length) {
            return Err(ConfigError::Invalid(format!(
                "id_length {} outside {MIN_ID_LENGTH}..={MAX_ID_LENGTH}",
                self.id_length
            )));
        }
        Ok(())
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            namespace: "moda-optic".to_string(),
            id_length: DEFAULT_ID_LENGTH,
            badge_label: "Cart".to_string(),
        }
    }
}
