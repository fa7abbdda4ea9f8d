//! Shape rasterization using tiny-skia
//!
//! These functions draw annotations onto an RgbaImage surface.

use image::RgbaImage;
use tiny_skia::{IntSize, Paint, PathBuilder, Pixmap, Stroke, Transform};

use super::geometry::{self, arrow};
use crate::domain::{Point, Shape, ShapeKind};

/// Convert RgbaImage to Pixmap, apply drawing function, and copy back
///
/// The pixmap works on premultiplied color, the image on straight alpha.
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) {
    let Some(size) = IntSize::from_wh(img.width(), img.height()) else {
        return;
    };
    let mut data = img.as_raw().clone();
    premultiply(&mut data);
    let Some(mut pixmap) = Pixmap::from_vec(data, size) else {
        return;
    };

    f(&mut pixmap);

    let mut data = pixmap.take();
    demultiply(&mut data);
    img.copy_from_slice(&data);
}

fn premultiply(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * a + 127) / 255) as u8;
        }
    }
}

fn demultiply(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u16;
        match a {
            255 => {}
            0 => px[..3].fill(0),
            _ => {
                for c in &mut px[..3] {
                    *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
                }
            }
        }
    }
}

/// Build an arrow path as stroked lines (shaft + two angled head lines)
fn build_arrow_path(start: Point, end: Point, head_length: f32) -> Option<tiny_skia::Path> {
    let (head1, head2) = arrow::head_points(start, end, head_length);

    let mut pb = PathBuilder::new();

    // Shaft line from start to end
    pb.move_to(start.x, start.y);
    pb.line_to(end.x, end.y);

    // First head line
    pb.line_to(head1.x, head1.y);

    // Second head line
    pb.move_to(end.x, end.y);
    pb.line_to(head2.x, head2.y);

    pb.finish()
}

fn build_rect_path(start: Point, end: Point) -> Option<tiny_skia::Path> {
    let (min_x, min_y, max_x, max_y) = geometry::normalize_rect(start, end);

    let mut pb = PathBuilder::new();
    pb.move_to(min_x, min_y);
    pb.line_to(max_x, min_y);
    pb.line_to(max_x, max_y);
    pb.line_to(min_x, max_y);
    pb.close();
    pb.finish()
}

fn build_segment_path(start: Point, end: Point) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(start.x, start.y);
    pb.line_to(end.x, end.y);
    pb.finish()
}

fn shape_path(shape: &Shape, head_length: f32) -> Option<tiny_skia::Path> {
    match shape.kind {
        ShapeKind::FreehandSegment => build_segment_path(shape.start, shape.end),
        ShapeKind::Arrow => build_arrow_path(shape.start, shape.end, head_length),
        ShapeKind::Rectangle => build_rect_path(shape.start, shape.end),
    }
}

/// Draw all shapes in insertion order; later shapes paint over earlier ones
pub fn draw_shapes_in_order(img: &mut RgbaImage, shapes: &[Shape], head_length: f32) {
    if shapes.is_empty() {
        return;
    }

    with_pixmap(img, |pixmap| {
        for shape in shapes {
            // Zero-length segments produce no path
            let Some(path) = shape_path(shape, head_length) else {
                continue;
            };
            let [r, g, b, a] = shape.color.to_rgba_u8();

            let mut paint = Paint::default();
            paint.set_color_rgba8(r, g, b, a);
            paint.anti_alias = true;

            // Butt caps and miter joins, like a plain 2D canvas stroke
            let stroke = Stroke {
                width: shape.stroke_width,
                ..Default::default()
            };
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    });
}
