//! Record store error types.

use thiserror::Error;

/// Record store errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage provider configuration error.
    #[error("storage configuration error: {0}")]
    Configuration(String),

    /// OpenDAL operation error.
    #[error("storage operation failed: {0}")]
    Operation(String),

    /// A stored collection could not be decoded.
    #[error("collection '{collection}' is corrupt: {reason}")]
    Corrupt {
        /// Collection key.
        collection: &'static str,
        /// Decoder message.
        reason: String,
    },

    /// A collection could not be encoded.
    #[error("failed to encode collection '{collection}': {reason}")]
    Encode {
        /// Collection key.
        collection: &'static str,
        /// Encoder message.
        reason: String,
    },
}

impl StorageError {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Returns the stable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "STORAGE_CONFIGURATION",
            Self::Operation(_) => "STORAGE_OPERATION",
            Self::Corrupt { .. } => "STORAGE_CORRUPT",
            Self::Encode { .. } => "STORAGE_ENCODE",
        }
    }
}

impl From<opendal::Error> for StorageError {
    fn from(err: opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::ConfigInvalid => Self::Configuration(err.to_string()),
            _ => Self::Operation(err.to_string()),
        }
    }
}
