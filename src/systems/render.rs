//! GPU rendering system
//!
//! Manages GPU presentation including:
//! - Render context and surface
//! - The CPU canvas that frames are drawn into
//! - Uploading and presenting the canvas

use std::sync::Arc;
use winit::window::Window;
use ascii4d_render::{
    context::RenderContext,
    pipeline::PresentPipeline,
    DrawingSurface, Framebuffer, GlyphBitmap, RenderError, Rgb,
};

/// Window-backed drawing surface
///
/// Glyphs are drawn into a CPU [`Framebuffer`]; `present` uploads it and
/// scales it onto the window.
pub struct RenderSystem {
    context: RenderContext,
    pipeline: PresentPipeline,
    canvas: Framebuffer,
}

impl RenderSystem {
    /// Create render system for a `canvas_size` canvas
    pub fn new(
        window: Arc<Window>,
        canvas_size: (u32, u32),
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;
        let pipeline = PresentPipeline::new(&context.device, context.config.format, canvas_size);

        Ok(Self {
            context,
            pipeline,
            canvas: Framebuffer::new(canvas_size.0, canvas_size.1),
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
    }

    /// Reconfigure the surface after it was lost
    pub fn reconfigure(&mut self) {
        self.context.reconfigure();
    }

    /// Get current surface size
    pub fn surface_size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}

impl DrawingSurface for RenderSystem {
    fn size(&self) -> (u32, u32) {
        self.canvas.size()
    }

    fn clear(&mut self, color: Rgb) {
        self.canvas.clear(color);
    }

    fn draw_glyph(&mut self, glyph: &GlyphBitmap, x: i32, y: i32) {
        self.canvas.draw_glyph(glyph, x, y);
    }

    fn present(&mut self) -> Result<(), RenderError> {
        let output = self
            .context
            .surface
            .get_current_texture()
            .map_err(map_surface_error)?;

        self.pipeline
            .upload(&self.context.queue, self.canvas.as_bytes(), self.surface_size());

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Present Encoder"),
            });

        self.pipeline.render(&mut encoder, &view);

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// Translate a surface acquisition failure
pub fn map_surface_error(err: wgpu::SurfaceError) -> RenderError {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::SurfaceLost,
        wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
        e => RenderError::Other(format!("{:?}", e)),
    }
}
