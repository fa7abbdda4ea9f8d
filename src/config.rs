//! Configuration persistence for editor defaults

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::Point;
use crate::error::{ConfigError, ParseError};

/// Color as read from a color input, stored as a hex string in config files
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShapeColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for ShapeColor {
    fn default() -> Self {
        Self::rgb(0.9, 0.1, 0.1)
    }
}

impl ShapeColor {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const BLACK: ShapeColor = ShapeColor::rgb(0.0, 0.0, 0.0);
    pub const WHITE: ShapeColor = ShapeColor::rgb(1.0, 1.0, 1.0);

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`
    pub fn from_hex(s: &str) -> Result<Self, ParseError> {
        let err = || ParseError::Color(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize, len: usize| -> Result<f32, ParseError> {
            let digits = &hex[i..i + len];
            let v = u8::from_str_radix(digits, 16).map_err(|_| err())?;
            // Short form repeats the nibble: "f" means "ff"
            let v = if len == 1 { v * 17 } else { v };
            Ok(v as f32 / 255.0)
        };
        match hex.len() {
            3 => Ok(Self::rgb(channel(0, 1)?, channel(1, 1)?, channel(2, 1)?)),
            6 => Ok(Self::rgb(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?)),
            8 => Ok(Self {
                r: channel(0, 2)?,
                g: channel(2, 2)?,
                b: channel(4, 2)?,
                a: channel(6, 2)?,
            }),
            _ => Err(err()),
        }
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba_u8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Convert to image crate RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

impl TryFrom<String> for ShapeColor {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<ShapeColor> for String {
    fn from(c: ShapeColor) -> Self {
        c.to_hex()
    }
}

/// Editor defaults persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Initial brush color for shapes
    pub brush_color: ShapeColor,
    /// Initial brush width in surface pixels
    pub brush_size: f32,
    /// Initial text color
    pub text_color: ShapeColor,
    /// Initial font size in surface pixels
    pub font_size: f32,
    /// Where newly added text labels are placed
    pub text_anchor: Point,
    /// Length of each arrowhead stroke
    pub arrow_head_length: f32,
    /// Font file used for labels; the system `font_family` is used when unset
    pub font_path: Option<PathBuf>,
    pub font_family: String,
    /// Aspect ratio preselected for cropping uploads
    pub crop_aspect: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            brush_color: ShapeColor::default(),
            brush_size: 5.0,
            text_color: ShapeColor::WHITE,
            font_size: 24.0,
            text_anchor: Point::new(50.0, 50.0),
            arrow_head_length: 10.0,
            font_path: None,
            font_family: "sans-serif".to_string(),
            crop_aspect: "16:9".to_string(),
        }
    }
}

impl EditorConfig {
    /// Directory name under the platform config dir
    pub const ID: &'static str = "inkpea";

    /// Default location of the config file
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            log::warn!("No config directory, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {}", err);
                Self::default()
            }
        }
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let Some(path) = Self::path() else {
            log::error!("Could not save config: no config directory");
            return;
        };
        if let Err(err) = self.save_to(&path) {
            log::error!("Failed to save config: {}", err);
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// Write atomically: a temp file in the same directory is renamed over `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let dir = path.parent().ok_or(ConfigError::NoConfigDir)?;
        fs::create_dir_all(dir)?;
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut file, self)?;
        file.write_all(b"\n")?;
        file.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}
