//! Store error types.

use thiserror::Error;

/// Errors that can occur during store operations.
///
/// Note that parse failures on load are deliberately *not* represented
/// here: corrupt file content is downgraded to an empty collection by
/// the store itself and never surfaces to callers.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O error occurred while writing a collection file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A collection could not be serialized for writing.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
