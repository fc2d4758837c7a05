//! Animation state and the per-frame driver
//!
//! The rotation angle is the only state that survives between frames. The
//! driver renders at the current angle, presents, and only then advances it.

use ascii4d_render::{
    DrawingSurface, EdgeSampler, FrameRenderer, FrameStats, GlyphRenderer, Projector, RenderError,
    SystemTextRenderer, TextRenderer,
};

use crate::config::AppConfig;

/// Rotation angle and its per-frame increment
///
/// [`FrameDriver::tick`] advances the angle only after a frame was presented,
/// not unconditionally once per frame. A frame lost to a surface error does
/// not consume a step and is redrawn at the same angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    pub angle: f32,
    pub speed: f32,
}

impl SimulationState {
    pub fn new(angle: f32, speed: f32) -> Self {
        Self { angle, speed }
    }

    /// Step the angle by one frame
    pub fn advance(&mut self) {
        self.angle += self.speed;
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(0.0, 0.005)
    }
}

/// Renders, presents and advances the animation, one frame per tick
pub struct FrameDriver<T: TextRenderer> {
    renderer: FrameRenderer<T>,
    state: SimulationState,
    frames: u64,
}

impl FrameDriver<SystemTextRenderer> {
    /// Build a driver drawing with installed fonts
    pub fn from_config(config: &AppConfig) -> Self {
        let text = SystemTextRenderer::new(config.glyphs.font_dirs.iter().cloned());
        let renderer = FrameRenderer::new(
            Projector::new(config.to_projection_params()),
            EdgeSampler::new(config.glyphs.edge_stride),
            GlyphRenderer::new(text, config.to_glyph_style()),
        );
        let state = SimulationState::new(config.animation.start_angle, config.animation.speed);
        Self::new(renderer, state)
    }
}

impl<T: TextRenderer> FrameDriver<T> {
    pub fn new(renderer: FrameRenderer<T>, state: SimulationState) -> Self {
        Self {
            renderer,
            state,
            frames: 0,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draw and present one frame.
    ///
    /// The angle is only advanced once the frame was presented, so a failed
    /// frame is retried at the same angle.
    pub fn tick<S: DrawingSurface>(&mut self, surface: &mut S) -> Result<FrameStats, RenderError> {
        let stats = self.renderer.render(self.state.angle, surface)?;
        surface.present()?;
        self.state.advance();
        self.frames += 1;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ascii4d_render::{Framebuffer, GlyphBitmap, Rgb};

    const EPSILON: f32 = 0.00001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    /// Counts presents and can be told to fail them
    #[derive(Default)]
    struct CountingSurface {
        presents: usize,
        fail_next: Option<RenderError>,
    }

    impl DrawingSurface for CountingSurface {
        fn size(&self) -> (u32, u32) {
            (800, 800)
        }
        fn clear(&mut self, _color: Rgb) {}
        fn draw_glyph(&mut self, _glyph: &GlyphBitmap, _x: i32, _y: i32) {}
        fn present(&mut self) -> Result<(), RenderError> {
            if let Some(err) = self.fail_next.take() {
                return Err(err);
            }
            self.presents += 1;
            Ok(())
        }
    }

    #[test]
    fn test_advance() {
        let mut state = SimulationState::default();
        for _ in 0..200 {
            state.advance();
        }
        assert!((state.angle - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_tick_presents_and_advances() {
        let mut driver = FrameDriver::from_config(&AppConfig::default());
        let mut surface = CountingSurface::default();

        let stats = driver.tick(&mut surface).unwrap();
        assert_eq!(stats.vertex_glyphs, 16);
        assert_eq!(surface.presents, 1);
        assert!(approx_eq(driver.state().angle, 0.005));

        driver.tick(&mut surface).unwrap();
        assert_eq!(surface.presents, 2);
        assert_eq!(driver.frames(), 2);
        assert!(approx_eq(driver.state().angle, 0.010));
    }

    #[test]
    fn test_failed_present_keeps_angle() {
        let mut driver = FrameDriver::from_config(&AppConfig::default());
        let mut surface = CountingSurface {
            fail_next: Some(RenderError::SurfaceLost),
            ..Default::default()
        };

        assert!(matches!(driver.tick(&mut surface), Err(RenderError::SurfaceLost)));
        assert_eq!(driver.state().angle, 0.0);
        assert_eq!(driver.frames(), 0);

        driver.tick(&mut surface).unwrap();
        assert!(approx_eq(driver.state().angle, 0.005));
    }

    #[test]
    fn test_start_angle_and_speed_from_config() {
        let mut config = AppConfig::default();
        config.animation.start_angle = 0.5;
        config.animation.speed = 0.1;
        let mut driver = FrameDriver::from_config(&config);
        assert_eq!(*driver.state(), SimulationState::new(0.5, 0.1));

        let mut fb = Framebuffer::new(800, 800);
        driver.tick(&mut fb).unwrap();
        assert!(approx_eq(driver.state().angle, 0.6));
    }

    #[test]
    fn test_stride_from_config_changes_edge_glyphs() {
        let mut dense = AppConfig::default();
        dense.glyphs.edge_stride = 3;
        let mut sparse_driver = FrameDriver::from_config(&AppConfig::default());
        let mut dense_driver = FrameDriver::from_config(&dense);

        let mut surface = CountingSurface::default();
        let sparse = sparse_driver.tick(&mut surface).unwrap();
        let dense = dense_driver.tick(&mut surface).unwrap();
        assert!(dense.edge_glyphs > sparse.edge_glyphs);
    }
}
