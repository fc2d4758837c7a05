//! ASCII tesseract rendering
//!
//! This crate turns the rotating tesseract from `ascii4d_math` into glyphs on
//! a 2D canvas and gets that canvas onto a window.
//!
//! ## Key Components
//!
//! - [`projection::Projector`] - 4D rotation and double perspective divide to screen space
//! - [`raster::LineIter`] - Bresenham lattice walk between two screen points
//! - [`sampler::EdgeSampler`] - Picks the lattice points that receive edge glyphs
//! - [`font::SystemTextRenderer`] - Installed font files rasterized with `ab_glyph`
//! - [`glyph::GlyphRenderer`] - Depth-shaded vertex glyphs and fixed edge glyphs
//! - [`frame::FrameRenderer`] - One full frame: clear, vertices, edges
//! - [`surface::Framebuffer`] - CPU canvas implementing [`surface::DrawingSurface`]
//! - [`context::RenderContext`], [`pipeline::PresentPipeline`] - WGPU presentation

pub mod context;
pub mod font;
pub mod frame;
pub mod glyph;
pub mod pipeline;
pub mod projection;
pub mod raster;
pub mod sampler;
pub mod surface;
pub mod text;

pub use font::{system_font_dirs, SystemFont, SystemTextRenderer};
pub use frame::{FrameRenderer, FrameStats};
pub use glyph::{interpolate, GlyphRenderer, GlyphStyle};
pub use projection::{ProjectedPoint, ProjectionParams, Projector};
pub use raster::{rasterize, LineIter};
pub use sampler::{EdgeSampler, DEFAULT_STRIDE};
pub use surface::{DrawingSurface, Framebuffer, RenderError, Rgb};
pub use text::{BuiltinFont, BuiltinTextRenderer, FontSpec, GlyphBitmap, GlyphError, TextRenderer};

// Re-export math types for convenience
pub use ascii4d_math::{Edge, Half, RotationPlane, RotationSet, Tesseract4D, Vec4};
