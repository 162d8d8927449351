//! Error types for the renderer

use thiserror::Error;

/// Errors returned by [`Renderer`](super::Renderer) operations
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("triangle list length {len} is not a multiple of 3")]
    IncompleteTriangleList { len: usize },

    #[error("invalid texture handle: {0}")]
    InvalidTextureHandle(u32),

    #[error("texture data is {actual} bytes, expected {expected}")]
    TextureSizeMismatch { expected: usize, actual: usize },

    #[error("failed to decode texture: {0}")]
    TextureDecode(#[from] image::ImageError),
}

/// Errors from loading or saving a [`RendererConfig`](super::RendererConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),

    #[error("invalid frame dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Result type alias for renderer operations
pub type Result<T> = std::result::Result<T, RenderError>;
