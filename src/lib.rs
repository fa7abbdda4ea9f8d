//! Image annotation engine
//!
//! Loads a base image, records freehand strokes, arrows, boxes and draggable
//! text labels on top of it, and flattens the result to PNG for handoff.
//! Uploads can also be cropped to a fixed aspect ratio beforehand.

pub mod annotations;
pub mod capture;
pub mod config;
pub mod crop;
pub mod domain;
pub mod editor;
pub mod error;
pub mod export;
pub mod render;
pub mod session;

pub use config::{EditorConfig, ShapeColor};
pub use editor::AnnotationEngine;
pub use error::{ConfigError, CropError, EditorError, ParseError};
pub use export::ExportedImage;
