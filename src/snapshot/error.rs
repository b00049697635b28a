//! Snapshot error types.

use thiserror::Error;

/// Errors that can occur when capturing or restoring snapshots
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Encoding to JSON or the binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Decoding from JSON or the binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// The snapshot was written by an incompatible format version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The snapshot's state and history contradict each other
    #[error("Snapshot validation failed: {0}")]
    ValidationFailed(String),
}
