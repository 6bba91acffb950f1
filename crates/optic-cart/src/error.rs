//! Error types for the cart core
//!
//! None of these escape a [`CartStore`](crate::CartStore) operation. They
//! surface at the seams instead:
//! - Durable slot reads and writes ([`KeyValueStore`](crate::KeyValueStore))
//! - Decoding a persisted blob
//! - Loading configuration

use std::path::PathBuf;

/// Errors raised by a durable key-value slot
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Backend cannot be reached at all
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Write would exceed the backend's capacity
    #[error("storage quota exceeded: needed {needed} bytes, limit {limit} bytes")]
    QuotaExceeded { needed: usize, limit: usize },

    /// Key contains characters the backend cannot store
    #[error("invalid storage key: '{0}'")]
    InvalidKey(String),

    /// IO error on a file-backed slot
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors while restoring cart state from the durable slot
#[derive(Debug, thiserror::Error)]
pub enum HydrateError {
    /// Slot could not be read
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Slot content is not a valid cart blob
    #[error("malformed cart data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors while loading or validating [`CartConfig`](crate::CartConfig)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid for its format
    #[error("config parse error: {0}")]
    Parse(String),

    /// A field holds an unusable value
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_error_display() {
        let err = StorageError::QuotaExceeded {
            needed: 120,
            limit: 100,
        };
        assert_eq!(
            err.to_string(),
            "storage quota exceeded: needed 120 bytes, limit 100 bytes"
        );
    }

    #[test]
    fn invalid_key_display() {
        let err = StorageError::InvalidKey("../cart".to_string());
        assert_eq!(err.to_string(), "invalid storage key: '../cart'");
    }

    #[test]
    fn hydrate_error_conversions() {
        let parse = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let err: HydrateError = parse.into();
        assert!(matches!(err, HydrateError::Parse(_)));

        let err: HydrateError = StorageError::Unavailable("offline".to_string()).into();
        assert!(err.to_string().contains("offline"));
    }
}
