use image::RgbaImage;

use crate::capture::BaseImage;
use crate::config::{EditorConfig, ShapeColor};
use crate::domain::{Point, Shape, TextLabel};
use crate::render::{self, Typeface};

/// What the current pointer gesture is doing
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum InteractionState {
    #[default]
    Idle,
    /// A shape gesture is in progress. `last` advances with each freehand segment.
    Drawing { start: Point, last: Point },
    /// A label is following the pointer, keeping `offset` between them
    DraggingText { index: usize, offset: Point },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }
}

/// Brush settings read when a shape is finalized
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrushStyle {
    pub color: ShapeColor,
    pub size: f32,
}

impl BrushStyle {
    pub fn new(color: ShapeColor, size: f32) -> Self {
        Self {
            color,
            size: size.max(1.0),
        }
    }
}

/// Text settings read when a label is added
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub color: ShapeColor,
    pub font_size: f32,
}

impl TextStyle {
    pub fn new(color: ShapeColor, font_size: f32) -> Self {
        Self {
            color,
            font_size: font_size.max(1.0),
        }
    }
}

/// Brush-sized indicator that follows the pointer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorPreview {
    pub visible: bool,
    /// Center in surface coordinates
    pub center: Point,
    pub diameter: f32,
    pub color: ShapeColor,
}

impl CursorPreview {
    pub fn new(brush: BrushStyle) -> Self {
        Self {
            visible: false,
            center: Point::default(),
            diameter: brush.size,
            color: brush.color,
        }
    }

    /// Top-left corner of the indicator box
    pub fn top_left(&self) -> Point {
        Point::new(
            self.center.x - self.diameter / 2.0,
            self.center.y - self.diameter / 2.0,
        )
    }
}

/// Editing state for one loaded image
///
/// The surface always has the base image's natural pixel size, and is rebuilt
/// from scratch on every redraw: base image, then shapes, then labels.
#[derive(Clone, Debug)]
pub struct EditorSession {
    base: BaseImage,
    surface: RgbaImage,
    shapes: Vec<Shape>,
    labels: Vec<TextLabel>,
    pub interaction: InteractionState,
}

impl EditorSession {
    pub fn new(base: BaseImage) -> Self {
        let surface = base.rgba().clone();
        Self {
            base,
            surface,
            shapes: Vec::new(),
            labels: Vec::new(),
            interaction: InteractionState::Idle,
        }
    }

    pub fn base(&self) -> &BaseImage {
        &self.base
    }

    pub fn surface(&self) -> &RgbaImage {
        &self.surface
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.surface.dimensions()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    pub fn push_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn push_label(&mut self, label: TextLabel) {
        self.labels.push(label);
    }

    /// Move a label; the only mutation a label allows
    pub fn move_label(&mut self, index: usize, position: Point) {
        if let Some(label) = self.labels.get_mut(index) {
            label.position = position;
        }
    }

    /// Drop all shapes and labels, keep the image
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.labels.clear();
        self.interaction = InteractionState::Idle;
    }

    /// Index of the label under `pos`.
    ///
    /// Every label is checked in insertion order and the last hit is returned,
    /// so a later label wins where two overlap.
    pub fn label_at(&self, pos: Point, typeface: &Typeface) -> Option<usize> {
        let mut hit = None;
        for (index, label) in self.labels.iter().enumerate() {
            let width = typeface.measure(&label.text, label.font_size);
            if label.bounds(width).contains(pos) {
                hit = Some(index);
            }
        }
        hit
    }

    /// Full replay onto a fresh copy of the base image
    pub fn redraw(&mut self, typeface: &Typeface, config: &EditorConfig) {
        self.surface.clone_from(self.base.rgba());
        render::image::draw_shapes_in_order(
            &mut self.surface,
            &self.shapes,
            config.arrow_head_length,
        );
        render::text::draw_labels_in_order(&mut self.surface, &self.labels, typeface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ShapeKind;
    use image::Rgba;

    fn session() -> EditorSession {
        EditorSession::new(BaseImage::from_rgba(RgbaImage::from_pixel(
            200,
            100,
            Rgba([255, 255, 255, 255]),
        )))
    }

    fn label(text: &str, x: f32, y: f32) -> TextLabel {
        TextLabel {
            text: text.into(),
            position: Point::new(x, y),
            color: ShapeColor::BLACK,
            font_size: 20.0,
        }
    }

    #[test]
    fn test_label_at_misses_outside() {
        let mut s = session();
        s.push_label(label("Hello", 50.0, 50.0));
        let tf = Typeface::fallback();

        assert_eq!(s.label_at(Point::new(60.0, 40.0), &tf), Some(0));
        // Above the box (one font size above the baseline)
        assert_eq!(s.label_at(Point::new(60.0, 25.0), &tf), None);
        // Below the baseline
        assert_eq!(s.label_at(Point::new(60.0, 55.0), &tf), None);
        // Past the measured width (5 chars * 12px)
        assert_eq!(s.label_at(Point::new(115.0, 40.0), &tf), None);
    }

    #[test]
    fn test_label_at_last_match_wins() {
        let mut s = session();
        s.push_label(label("first", 50.0, 50.0));
        s.push_label(label("second", 55.0, 55.0));
        s.push_label(label("elsewhere", 0.0, 95.0));
        let tf = Typeface::fallback();

        assert_eq!(s.label_at(Point::new(60.0, 45.0), &tf), Some(1));
        assert_eq!(s.label_at(Point::new(52.0, 33.0), &tf), Some(0));
    }

    #[test]
    fn test_clear_keeps_base_image() {
        let mut s = session();
        s.push_label(label("x", 1.0, 20.0));
        s.push_shape(Shape {
            kind: ShapeKind::Rectangle,
            color: ShapeColor::BLACK,
            stroke_width: 2.0,
            start: Point::new(1.0, 1.0),
            end: Point::new(10.0, 10.0),
        });
        s.interaction = InteractionState::Drawing {
            start: Point::default(),
            last: Point::default(),
        };

        s.clear();
        assert!(s.shapes().is_empty());
        assert!(s.labels().is_empty());
        assert!(s.interaction.is_idle());
        assert_eq!(s.base().width(), 200);
    }

    #[test]
    fn test_redraw_is_idempotent() {
        let mut s = session();
        s.push_shape(Shape {
            kind: ShapeKind::Arrow,
            color: ShapeColor::BLACK,
            stroke_width: 3.0,
            start: Point::new(10.0, 10.0),
            end: Point::new(150.0, 80.0),
        });
        let tf = Typeface::fallback();
        let config = EditorConfig::default();

        s.redraw(&tf, &config);
        let once = s.surface().clone();
        s.redraw(&tf, &config);
        assert_eq!(s.surface(), &once);
        assert_ne!(s.surface(), s.base().rgba());
    }

    #[test]
    fn test_cursor_top_left() {
        let mut cursor = CursorPreview::new(BrushStyle::new(ShapeColor::BLACK, 10.0));
        cursor.center = Point::new(20.0, 30.0);
        assert_eq!(cursor.top_left(), Point::new(15.0, 25.0));
    }
}
