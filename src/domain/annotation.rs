//! Annotation types for drawing on a base image
//!
//! All annotation types store coordinates in surface pixel coordinates
//! (the natural pixel grid of the loaded image).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::geometry::{Bounds, Point};
use crate::config::ShapeColor;
use crate::error::ParseError;

/// Kind of a drawn shape
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// One short piece of a freehand stroke
    FreehandSegment,
    Arrow,
    Rectangle,
}

/// A drawn annotation. Immutable once appended to a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub color: ShapeColor,
    pub stroke_width: f32,
    pub start: Point,
    pub end: Point,
}

/// A positioned text annotation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub text: String,
    /// Baseline-left anchor
    pub position: Point,
    pub color: ShapeColor,
    pub font_size: f32,
}

impl TextLabel {
    /// Hit box for a label whose rendered text is `width` pixels wide.
    ///
    /// Spans `[x, x + width]` horizontally and one font size above the baseline.
    pub fn bounds(&self, width: f32) -> Bounds {
        Bounds::new(
            self.position.x,
            self.position.y - self.font_size,
            self.position.x + width,
            self.position.y,
        )
    }
}

/// Active annotation tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    #[default]
    Pen,
    Arrow,
    Box,
}

impl ToolMode {
    /// Shape kind produced when a gesture with this tool is released
    pub fn shape_kind(self) -> ShapeKind {
        match self {
            ToolMode::Pen => ShapeKind::FreehandSegment,
            ToolMode::Arrow => ShapeKind::Arrow,
            ToolMode::Box => ShapeKind::Rectangle,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ToolMode::Pen => "pen",
            ToolMode::Arrow => "arrow",
            ToolMode::Box => "box",
        }
    }
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pen" => Ok(ToolMode::Pen),
            "arrow" => Ok(ToolMode::Arrow),
            "box" => Ok(ToolMode::Box),
            other => Err(ParseError::Tool(other.to_string())),
        }
    }
}
