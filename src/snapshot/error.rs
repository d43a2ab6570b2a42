//! Snapshot error types.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SnapshotError {
    /// Encoding to JSON or bincode failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Decoding from JSON or bincode failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The decoded data is well-formed but inconsistent
    #[error("Snapshot validation failed: {0}")]
    ValidationFailed(String),
}
