//! Pure domain types with minimal dependencies
//!
//! This module contains core types used throughout the editor.
//! Types here should have no rendering or I/O dependencies.

pub mod annotation;
pub mod geometry;

pub use annotation::*;
pub use geometry::*;
