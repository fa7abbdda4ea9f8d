//! Shared geometry calculations for annotations
//!
//! Constants and math used by the rasterizer and by hit-testing.

use crate::domain::Point;

/// Arrow geometry
pub mod arrow {
    use crate::domain::Point;

    /// Default arrowhead stroke length in surface pixels
    pub const HEAD_LENGTH: f32 = 10.0;
    /// Arrowhead angle from shaft in radians (30 degrees)
    pub const HEAD_ANGLE: f32 = std::f32::consts::FRAC_PI_6;

    /// Endpoints of the two head strokes, both drawn from `end`.
    ///
    /// Each stroke points back along the shaft, rotated by `HEAD_ANGLE` to either
    /// side. A zero-length arrow has direction angle 0.
    pub fn head_points(start: Point, end: Point, head_length: f32) -> (Point, Point) {
        let angle = (end.y - start.y).atan2(end.x - start.x);
        let head = |a: f32| {
            Point::new(
                end.x - head_length * a.cos(),
                end.y - head_length * a.sin(),
            )
        };
        (head(angle - HEAD_ANGLE), head(angle + HEAD_ANGLE))
    }
}

/// Text metrics for the fallback typeface
pub mod text {
    /// Advance per character as a fraction of the font size (3/5)
    pub const FALLBACK_ADVANCE_NUM: f32 = 3.0;
    pub const FALLBACK_ADVANCE_DEN: f32 = 5.0;
}

/// Normalize min/max coordinates from arbitrary start/end points
#[inline]
pub fn normalize_rect(a: Point, b: Point) -> (f32, f32, f32, f32) {
    let (min_x, max_x) = if a.x < b.x { (a.x, b.x) } else { (b.x, a.x) };
    let (min_y, max_y) = if a.y < b.y { (a.y, b.y) } else { (b.y, a.y) };
    (min_x, min_y, max_x, max_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_arrow_head_horizontal() {
        let end = Point::new(100.0, 0.0);
        let (h1, h2) = arrow::head_points(Point::new(0.0, 0.0), end, arrow::HEAD_LENGTH);

        // Both heads are 10 units from the tip
        for h in [h1, h2] {
            let len = ((h.x - end.x).powi(2) + (h.y - end.y).powi(2)).sqrt();
            assert!(approx(len, 10.0));
        }

        // Back along the shaft (pointing at 180°), rotated by ±30°
        let a1 = (h1.y - end.y).atan2(h1.x - end.x).to_degrees();
        let a2 = (h2.y - end.y).atan2(h2.x - end.x).to_degrees();
        assert!(approx(a1, 150.0), "got {a1}");
        assert!(approx(a2, -150.0), "got {a2}");

        assert!(approx(h1.x, 100.0 - 10.0 * 30f32.to_radians().cos()));
        assert!(approx(h1.y, 5.0));
        assert!(approx(h2.y, -5.0));
    }

    #[test]
    fn test_arrow_head_vertical() {
        let end = Point::new(0.0, 50.0);
        let (h1, h2) = arrow::head_points(Point::new(0.0, 0.0), end, 10.0);
        assert!(h1.y < end.y && h2.y < end.y);
        assert!(approx(h1.x, -h2.x));
    }

    #[test]
    fn test_zero_length_arrow_points_left() {
        let p = Point::new(20.0, 20.0);
        let (h1, h2) = arrow::head_points(p, p, 10.0);
        assert!(h1.x < p.x && h2.x < p.x);
    }

    #[test]
    fn test_normalize_rect() {
        let r = normalize_rect(Point::new(30.0, 5.0), Point::new(10.0, 25.0));
        assert_eq!(r, (10.0, 5.0, 30.0, 25.0));
    }
}
