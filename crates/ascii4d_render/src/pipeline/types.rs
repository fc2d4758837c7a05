//! GPU-compatible data types for the present pass
//!
//! These types match the shader layouts exactly.

use bytemuck::{Pod, Zeroable};

/// Uniforms of the present shader
/// Layout: 16 bytes (must match present.wgsl PresentUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct PresentUniforms {
    /// Framebuffer size in pixels
    pub canvas_size: [u32; 2],
    /// Surface size in pixels
    pub surface_size: [u32; 2],
}

impl PresentUniforms {
    pub fn new(canvas: (u32, u32), surface: (u32, u32)) -> Self {
        Self {
            canvas_size: [canvas.0, canvas.1],
            surface_size: [surface.0.max(1), surface.1.max(1)],
        }
    }
}
