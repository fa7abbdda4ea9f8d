//! Text measurement and rasterization
//!
//! Labels are laid out on a single baseline with ab_glyph. When no font can be
//! loaded a fallback typeface keeps hit-testing working with fixed-advance
//! metrics and draws nothing.

use std::path::Path;

use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont, point};
use image::RgbaImage;

use super::geometry;
use crate::config::EditorConfig;
use crate::domain::TextLabel;
use crate::error::EditorError;

/// Font used to measure and draw text labels
#[derive(Clone, Debug, Default)]
pub struct Typeface {
    font: Option<FontArc>,
}

impl Typeface {
    /// Fixed-advance metrics, no glyph output
    pub fn fallback() -> Self {
        Self { font: None }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, EditorError> {
        let font = FontArc::try_from_vec(bytes).map_err(|_| EditorError::Font)?;
        Ok(Self { font: Some(font) })
    }

    pub fn from_path(path: &Path) -> Result<Self, EditorError> {
        Self::from_bytes(std::fs::read(path)?)
    }

    /// Look up a system font by family name; `sans-serif`, `serif` and
    /// `monospace` map to the generic families.
    pub fn system(family: &str) -> Option<Self> {
        use font_kit::family_name::FamilyName;
        use font_kit::properties::Properties;
        use font_kit::source::SystemSource;

        let name = match family {
            "sans-serif" => FamilyName::SansSerif,
            "serif" => FamilyName::Serif,
            "monospace" => FamilyName::Monospace,
            other => FamilyName::Title(other.to_string()),
        };
        let handle = SystemSource::new()
            .select_best_match(&[name], &Properties::new())
            .ok()?;
        let font = handle.load().ok()?;
        let data = font.copy_font_data()?;
        Self::from_bytes((*data).clone()).ok()
    }

    /// Configured font file, then the configured system family, then fallback
    pub fn from_config(config: &EditorConfig) -> Self {
        if let Some(path) = &config.font_path {
            match Self::from_path(path) {
                Ok(typeface) => return typeface,
                Err(err) => log::warn!("Could not load font {}: {}", path.display(), err),
            }
        }
        match Self::system(&config.font_family) {
            Some(typeface) => typeface,
            None => {
                log::warn!(
                    "No system font for {:?}, text labels will not be drawn",
                    config.font_family
                );
                Self::fallback()
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.font.is_none()
    }

    /// Rendered width of `text` at `font_size`
    pub fn measure(&self, text: &str, font_size: f32) -> f32 {
        match &self.font {
            Some(font) => layout(font, text, font_size, 0.0).1,
            None => {
                text.chars().count() as f32 * font_size * geometry::text::FALLBACK_ADVANCE_NUM
                    / geometry::text::FALLBACK_ADVANCE_DEN
            }
        }
    }

    /// Draw a label with its baseline-left corner at the label position
    pub fn draw_label(&self, img: &mut RgbaImage, label: &TextLabel) {
        let Some(font) = &self.font else {
            return;
        };
        let [r, g, b, a] = label.color.to_rgba_u8();
        let scale = px_scale(font, label.font_size);
        let (glyphs, _) = layout(font, &label.text, label.font_size, label.position.x);

        for (id, x) in glyphs {
            let glyph = id.with_scale_and_position(scale, point(x, label.position.y));
            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i64 + gx as i64;
                let py = bounds.min.y as i64 + gy as i64;
                if px < 0 || py < 0 || px >= img.width() as i64 || py >= img.height() as i64 {
                    return;
                }
                let alpha = coverage.clamp(0.0, 1.0) * a as f32 / 255.0;
                blend(img.get_pixel_mut(px as u32, py as u32), [r, g, b], alpha);
            });
        }
    }
}

/// Scale that makes one em equal `font_size` pixels, as CSS sizes text
fn px_scale(font: &FontArc, font_size: f32) -> PxScale {
    match font.units_per_em() {
        Some(upem) if upem > 0.0 => PxScale::from(font_size * font.height_unscaled() / upem),
        _ => PxScale::from(font_size),
    }
}

/// Glyph ids with their pen x positions, and the total advance width
fn layout(font: &FontArc, text: &str, font_size: f32, origin_x: f32) -> (Vec<(GlyphId, f32)>, f32) {
    let scaled = font.as_scaled(px_scale(font, font_size));
    let mut glyphs = Vec::with_capacity(text.len());
    let mut caret = 0.0f32;
    let mut prev: Option<GlyphId> = None;

    for ch in text.chars() {
        let id = font.glyph_id(ch);
        if let Some(prev) = prev {
            caret += scaled.kern(prev, id);
        }
        glyphs.push((id, origin_x + caret));
        caret += scaled.h_advance(id);
        prev = Some(id);
    }

    (glyphs, caret)
}

/// Source-over blend of a straight-alpha color into a straight-alpha pixel
fn blend(dst: &mut image::Rgba<u8>, src: [u8; 3], alpha: f32) {
    if alpha <= 0.0 {
        return;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = alpha + da * (1.0 - alpha);
    if out_a <= 0.0 {
        return;
    }
    for (d, &s) in dst.0[..3].iter_mut().zip(src.iter()) {
        let (s, dc) = (s as f32, *d as f32);
        *d = ((s * alpha + dc * da * (1.0 - alpha)) / out_a).round() as u8;
    }
    dst[3] = (out_a * 255.0).round() as u8;
}

/// Draw all labels in insertion order
pub fn draw_labels_in_order(img: &mut RgbaImage, labels: &[TextLabel], typeface: &Typeface) {
    for label in labels {
        typeface.draw_label(img, label);
    }
}
