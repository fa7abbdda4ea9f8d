//! Annotation command handling
//!
//! This module provides:
//! - Handlers that apply EditorCommand values to the engine
//! - Script replay for headless runs

pub mod handlers;

pub use handlers::{handle_command, replay};
