//! Editing session module
//!
//! This module contains:
//! - Session state (image, shapes, labels, pointer interaction)
//! - Command types for editor interactions

pub mod messages;
pub mod state;

pub use messages::EditorCommand;
pub use state::{BrushStyle, CursorPreview, EditorSession, InteractionState, TextStyle};
