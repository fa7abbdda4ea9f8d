//! Image intake module
//!
//! This module consolidates:
//! - Base image decoding from uploads and generation results (image.rs)

pub mod image;

pub use self::image::BaseImage;
