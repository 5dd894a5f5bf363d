//! Configuration error types.

/// Errors that can occur when loading, saving, or parsing a generator preset.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the preset file from disk.
    #[error("failed to read preset: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the preset file to disk.
    #[error("failed to write preset: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse preset: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize the preset to RON.
    #[error("failed to serialize preset: {0}")]
    SerializeError(#[source] ron::Error),
}
