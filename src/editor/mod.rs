//! Annotation canvas engine and its pointer/tool state machine

pub mod engine;

pub use engine::AnnotationEngine;
