use std::path::PathBuf;

/// Errors raised while loading scene assets from disk or memory.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to decode image {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: ::image::ImageError,
    },

    #[error("invalid image data: {0}")]
    InvalidData(String),
}
