//! Error types for the editor, cropping and configuration

use thiserror::Error;

/// Errors raised by the annotation engine
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("invalid base64 image data: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("no image loaded")]
    NoImage,
    #[error("invalid font data")]
    Font,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors raised while cropping an uploaded image
#[derive(Debug, Error)]
pub enum CropError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("crop region is empty")]
    EmptyRegion,
    #[error("invalid aspect ratio: {0:?}")]
    InvalidAspect(String),
}

/// Errors raised while reading or writing the config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config directory available")]
    NoConfigDir,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors from parsing values coming out of form controls
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid color: {0:?}")]
    Color(String),
    #[error("unknown tool: {0:?}")]
    Tool(String),
}
