//! Aspect-ratio cropping of uploads before they are queued for generation

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use image::{DynamicImage, ImageFormat};

use crate::error::CropError;

/// Requested width/height ratio of a crop
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AspectRatio {
    Free,
    Fixed(f32),
}

impl FromStr for AspectRatio {
    type Err = CropError;

    /// Accepts `"16:9"`, `"1.7778"`, and `"free"` / `"NaN"` for no constraint
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CropError::InvalidAspect(s.to_string());
        let s = s.trim();
        if s.eq_ignore_ascii_case("free") || s.eq_ignore_ascii_case("nan") {
            return Ok(AspectRatio::Free);
        }
        let ratio = match s.split_once(':') {
            Some((w, h)) => {
                let w: f32 = w.trim().parse().map_err(|_| invalid())?;
                let h: f32 = h.trim().parse().map_err(|_| invalid())?;
                w / h
            }
            None => s.parse().map_err(|_| invalid())?,
        };
        if ratio.is_finite() && ratio > 0.0 {
            Ok(AspectRatio::Fixed(ratio))
        } else {
            Err(invalid())
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AspectRatio::Free => f.write_str("free"),
            AspectRatio::Fixed(r) => write!(f, "{r}"),
        }
    }
}

/// A crop rectangle in image pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    /// Largest centered region with the requested ratio that fits inside the image
    pub fn fit(width: u32, height: u32, aspect: AspectRatio) -> Self {
        let AspectRatio::Fixed(ratio) = aspect else {
            return Self {
                x: 0,
                y: 0,
                width,
                height,
            };
        };
        let (w, h) = if width as f32 / height.max(1) as f32 > ratio {
            // Image is wider than requested: full height
            let w = ((height as f32 * ratio).round() as u32).clamp(1, width.max(1));
            (w, height)
        } else {
            let h = ((width as f32 / ratio).round() as u32).clamp(1, height.max(1));
            (width, h)
        };
        Self {
            x: (width - w) / 2,
            y: (height - h) / 2,
            width: w,
            height: h,
        }
    }

    /// Shrink a user-supplied region so it lies inside the image
    pub fn clamp_to(self, width: u32, height: u32) -> Result<Self, CropError> {
        let x = self.x.min(width);
        let y = self.y.min(height);
        let region = Self {
            x,
            y,
            width: self.width.min(width - x),
            height: self.height.min(height - y),
        };
        if region.width == 0 || region.height == 0 {
            return Err(CropError::EmptyRegion);
        }
        Ok(region)
    }
}

/// A cropped upload, re-encoded for submission
#[derive(Clone, Debug)]
pub struct CroppedImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl CroppedImage {
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    pub fn extension(&self) -> &'static str {
        self.format.extensions_str().first().copied().unwrap_or("png")
    }
}

/// Formats an upload keeps after cropping; anything else becomes PNG
fn output_format(source: Option<ImageFormat>) -> ImageFormat {
    match source {
        Some(
            f @ (ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP | ImageFormat::Bmp),
        ) => f,
        _ => ImageFormat::Png,
    }
}

/// Crop an encoded image, keeping the source format where possible
pub fn crop_image(bytes: &[u8], region: CropRegion) -> Result<CroppedImage, CropError> {
    let source_format = image::guess_format(bytes).ok();
    let img = image::load_from_memory(bytes)?;
    encode_region(&img, source_format, region)
}

/// Crop to the largest centered region with the given ratio
pub fn crop_to_aspect(bytes: &[u8], aspect: AspectRatio) -> Result<CroppedImage, CropError> {
    let source_format = image::guess_format(bytes).ok();
    let img = image::load_from_memory(bytes)?;
    let region = CropRegion::fit(img.width(), img.height(), aspect);
    encode_region(&img, source_format, region)
}

fn encode_region(
    img: &DynamicImage,
    source_format: Option<ImageFormat>,
    region: CropRegion,
) -> Result<CroppedImage, CropError> {
    let region = region.clamp_to(img.width(), img.height())?;
    let cropped = img.crop_imm(region.x, region.y, region.width, region.height);
    let format = output_format(source_format);
    // JPEG has no alpha channel
    let cropped = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(cropped.to_rgb8()),
        _ => cropped,
    };

    let mut bytes = Vec::new();
    cropped.write_to(&mut Cursor::new(&mut bytes), format)?;
    log::debug!(
        "Cropped {}x{} at ({}, {}) as {:?}",
        region.width,
        region.height,
        region.x,
        region.y,
        format
    );

    Ok(CroppedImage {
        bytes,
        format,
        width: region.width,
        height: region.height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn png(w: u32, h: u32) -> Vec<u8> {
        let mut img = RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 255]));
        img.put_pixel(w / 2, h / 2, Rgba([255, 0, 0, 255]));
        crate::export::encode_png(&img).unwrap()
    }

    #[test]
    fn test_parse_aspect() {
        assert_eq!("16:9".parse::<AspectRatio>().unwrap(), AspectRatio::Fixed(16.0 / 9.0));
        assert_eq!("1".parse::<AspectRatio>().unwrap(), AspectRatio::Fixed(1.0));
        assert_eq!("0.5625".parse::<AspectRatio>().unwrap(), AspectRatio::Fixed(0.5625));
        assert_eq!("NaN".parse::<AspectRatio>().unwrap(), AspectRatio::Free);
        assert_eq!("free".parse::<AspectRatio>().unwrap(), AspectRatio::Free);
        assert!("16:0".parse::<AspectRatio>().is_err());
        assert!("-1".parse::<AspectRatio>().is_err());
        assert!("wide".parse::<AspectRatio>().is_err());
    }

    #[test]
    fn test_fit_wide_image_to_square() {
        let r = CropRegion::fit(400, 200, AspectRatio::Fixed(1.0));
        assert_eq!(
            r,
            CropRegion {
                x: 100,
                y: 0,
                width: 200,
                height: 200
            }
        );
    }

    #[test]
    fn test_fit_square_image_to_landscape() {
        let r = CropRegion::fit(320, 320, AspectRatio::Fixed(16.0 / 9.0));
        assert_eq!(r.width, 320);
        assert_eq!(r.height, 180);
        assert_eq!(r.y, 70);
        assert_eq!(r.x, 0);
    }

    #[test]
    fn test_fit_free_is_full_image() {
        let r = CropRegion::fit(33, 44, AspectRatio::Free);
        assert_eq!((r.x, r.y, r.width, r.height), (0, 0, 33, 44));
    }

    #[test]
    fn test_fit_stays_inside_image() {
        for (w, h) in [(1, 1000), (1000, 1), (7, 3), (1920, 1080)] {
            for ratio in [0.25, 9.0 / 16.0, 1.0, 16.0 / 9.0, 4.0] {
                let r = CropRegion::fit(w, h, AspectRatio::Fixed(ratio));
                assert!(r.width >= 1 && r.height >= 1);
                assert!(r.x + r.width <= w, "{w}x{h} @ {ratio}: {r:?}");
                assert!(r.y + r.height <= h, "{w}x{h} @ {ratio}: {r:?}");
            }
        }
    }

    #[test]
    fn test_clamp_to() {
        let r = CropRegion {
            x: 90,
            y: 10,
            width: 50,
            height: 50,
        };
        assert_eq!(
            r.clamp_to(100, 100).unwrap(),
            CropRegion {
                x: 90,
                y: 10,
                width: 10,
                height: 50
            }
        );
        let outside = CropRegion {
            x: 200,
            y: 0,
            width: 5,
            height: 5,
        };
        assert!(matches!(outside.clamp_to(100, 100), Err(CropError::EmptyRegion)));
    }

    #[test]
    fn test_crop_keeps_png_and_content() {
        let cropped = crop_to_aspect(&png(40, 20), AspectRatio::Fixed(1.0)).unwrap();
        assert_eq!(cropped.format, ImageFormat::Png);
        assert_eq!(cropped.mime_type(), "image/png");
        assert_eq!((cropped.width, cropped.height), (20, 20));

        let decoded = image::load_from_memory(&cropped.bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (20, 20));
        // The marker pixel at the source center lands at the crop center
        assert_eq!(decoded.get_pixel(10, 10), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_crop_jpeg_stays_jpeg() {
        let rgb = image::RgbImage::from_pixel(30, 30, image::Rgb([10, 200, 30]));
        let img = DynamicImage::ImageRgb8(rgb);
        let mut jpeg = Vec::new();
        img.write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg).unwrap();

        let cropped = crop_to_aspect(&jpeg, AspectRatio::Fixed(3.0)).unwrap();
        assert_eq!(cropped.format, ImageFormat::Jpeg);
        assert_eq!((cropped.width, cropped.height), (30, 10));
        assert_eq!(cropped.extension(), "jpg");
    }

    #[test]
    fn test_crop_garbage_is_error() {
        assert!(matches!(
            crop_to_aspect(b"nope", AspectRatio::Free),
            Err(CropError::Image(_))
        ));
    }
}
