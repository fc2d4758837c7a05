//! ASCII Tesseract
//!
//! A rotating 4D hypercube drawn with text glyphs: vertices as depth-shaded
//! dots, edges as evenly spaced colons.

pub mod config;
pub mod input;
pub mod systems;
