//! Annotation rendering module
//!
//! This module contains:
//! - Geometry calculations shared between rendering and hit-testing
//! - Shape rasterization using tiny-skia
//! - Text measurement and rasterization using ab_glyph

pub mod geometry;
pub mod image;
pub mod text;

pub use text::Typeface;
