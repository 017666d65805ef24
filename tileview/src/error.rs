//! Error types used by the crate.

use thiserror::Error;

/// Tileview error type.
///
/// Only loading and assembling a viewer can fail. Feature selection and info panel rendering
/// never return errors: unsupported input degrades to a display fallback instead.
#[derive(Debug, Error)]
pub enum TileviewError {
    /// Failed to fetch the tile descriptor over the network.
    #[error("failed to load data: {0}")]
    Http(String),
    /// Error decoding a JSON document.
    #[error("failed to decode data")]
    Decoding(#[from] serde_json::Error),
    /// The tile descriptor was decoded but is not usable.
    #[error("invalid tile descriptor: {0}")]
    InvalidDescriptor(String),
    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),
    /// A layer with the same id was already added to the rendering engine.
    #[error("layer already exists: {0}")]
    LayerExists(String),
    /// Layer not found.
    #[error("layer not found: {0}")]
    LayerNotFound(String),
    /// Error reading data from the FS.
    #[error("failed to read file")]
    FsIo(#[from] std::io::Error),
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for TileviewError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value.to_string())
    }
}
