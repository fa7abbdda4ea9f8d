//! Flattened export for handoff to downstream consumers

use std::io::{self, Write};
use std::path::Path;

use base64::Engine;
use image::RgbaImage;

use crate::error::EditorError;

/// File name given to an edited image on handoff
pub const EXPORT_FILE_NAME: &str = "edited-image.png";
pub const PNG_MIME_TYPE: &str = "image/png";

/// A flattened image packaged as a named file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedImage {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ExportedImage {
    pub fn png(bytes: Vec<u8>) -> Self {
        Self {
            file_name: EXPORT_FILE_NAME.to_string(),
            mime_type: PNG_MIME_TYPE.to_string(),
            bytes,
        }
    }

    /// `data:` URL suitable for an image preview
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }

    /// Write to `path`, or to `path/<file_name>` when `path` is a directory
    pub fn save_to(&self, path: &Path) -> Result<(), EditorError> {
        let target = if path.is_dir() {
            path.join(&self.file_name)
        } else {
            path.to_path_buf()
        };
        let dir = match target.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => std::env::current_dir()?,
        };
        let mut file = tempfile::Builder::new()
            .prefix("inkpea-")
            .suffix(".png")
            .tempfile_in(&dir)?;
        file.write_all(&self.bytes)?;
        file.persist(&target).map_err(|e| e.error)?;
        log::debug!("Exported {} bytes to {}", self.bytes.len(), target.display());
        Ok(())
    }
}

/// Encode an RGBA surface as PNG
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, EditorError> {
    let mut buffer = Vec::new();
    write_png(&mut buffer, image)?;
    Ok(buffer)
}

fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())?;
    writer.finish()
}
