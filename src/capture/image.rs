//! Base image type for an editing session

use base64::Engine;
use image::RgbaImage;

use crate::error::EditorError;

/// The decoded raster an editing session annotates. Never mutated once decoded.
#[derive(Clone, Debug)]
pub struct BaseImage {
    rgba: RgbaImage,
}

impl BaseImage {
    /// Decode an uploaded file (any format the image crate recognizes)
    pub fn decode(bytes: &[u8]) -> Result<Self, EditorError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        log::debug!("BaseImage decoded: {}x{} pixels", rgba.width(), rgba.height());
        Ok(Self { rgba })
    }

    /// Decode a generation result: bare base64 or a `data:` URL
    pub fn decode_base64(data: &str) -> Result<Self, EditorError> {
        let payload = match data.trim().strip_prefix("data:") {
            Some(url) => url
                .split_once(',')
                .map(|(_, payload)| payload)
                .unwrap_or_default(),
            None => data.trim(),
        };
        let bytes = base64::engine::general_purpose::STANDARD.decode(payload)?;
        Self::decode(&bytes)
    }

    pub fn from_rgba(rgba: RgbaImage) -> Self {
        Self { rgba }
    }

    pub fn rgba(&self) -> &RgbaImage {
        &self.rgba
    }

    /// Natural pixel width
    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    /// Natural pixel height
    pub fn height(&self) -> u32 {
        self.rgba.height()
    }
}
