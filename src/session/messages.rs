//! Commands that drive an editing session
//!
//! Each form control and pointer event on the editing surface maps to one of
//! these. Scripts of commands are stored as JSON arrays, for example
//! `[{"op": "set_tool", "tool": "arrow"}, {"op": "pointer_down", "x": 1, "y": 2}]`.

use serde::{Deserialize, Serialize};

use crate::config::ShapeColor;
use crate::domain::ToolMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditorCommand {
    /// Tool radio group changed
    SetTool { tool: ToolMode },
    /// Brush color or size control changed
    SetBrush { color: ShapeColor, size: f32 },
    /// Text color or font size control changed
    SetTextStyle { color: ShapeColor, font_size: f32 },
    /// Display size of the surface changed
    SetViewport { width: f32, height: f32 },
    PointerEnter,
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    PointerLeave,
    /// "Add text" button with the text input's content
    AddText { text: String },
    /// "Clear edits" button
    Clear,
}

impl EditorCommand {
    pub fn pointer_down(x: f32, y: f32) -> Self {
        Self::PointerDown { x, y }
    }
    pub fn pointer_move(x: f32, y: f32) -> Self {
        Self::PointerMove { x, y }
    }
    pub fn pointer_up(x: f32, y: f32) -> Self {
        Self::PointerUp { x, y }
    }
}

/// Parse a JSON array of commands
pub fn parse_script(json: &str) -> serde_json::Result<Vec<EditorCommand>> {
    serde_json::from_str(json)
}
