//! Present pipeline components
//!
//! The tesseract is drawn on the CPU; this module gets the finished canvas
//! onto the window surface.

pub mod types;
pub mod present_pipeline;

pub use types::PresentUniforms;
pub use present_pipeline::PresentPipeline;
