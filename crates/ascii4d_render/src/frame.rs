//! Full-frame rendering of the tesseract

use ascii4d_math::Tesseract4D;

use crate::glyph::GlyphRenderer;
use crate::projection::{ProjectedPoint, Projector};
use crate::sampler::EdgeSampler;
use crate::surface::{DrawingSurface, RenderError};
use crate::text::TextRenderer;

/// Glyph counts of one rendered frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub vertex_glyphs: usize,
    pub edge_glyphs: usize,
}

/// Renders one frame: vertices, then sampled edges
pub struct FrameRenderer<T: TextRenderer> {
    tesseract: Tesseract4D,
    projector: Projector,
    sampler: EdgeSampler,
    glyphs: GlyphRenderer<T>,
}

impl<T: TextRenderer> FrameRenderer<T> {
    pub fn new(projector: Projector, sampler: EdgeSampler, glyphs: GlyphRenderer<T>) -> Self {
        Self {
            tesseract: Tesseract4D::new(),
            projector,
            sampler,
            glyphs,
        }
    }

    pub fn tesseract(&self) -> &Tesseract4D {
        &self.tesseract
    }

    /// Screen positions and depth weights of all vertices at `angle`
    pub fn project(&self, angle: f32) -> [ProjectedPoint; 16] {
        self.projector.project_all(angle, self.tesseract.vertices())
    }

    /// Clear `surface` and draw the tesseract at `angle`. Does not present.
    pub fn render<S: DrawingSurface>(
        &mut self,
        angle: f32,
        surface: &mut S,
    ) -> Result<FrameStats, RenderError> {
        surface.clear(self.glyphs.style().background);

        let points = self.project(angle);
        let mut stats = FrameStats::default();

        for point in &points {
            self.glyphs.draw_vertex(surface, point)?;
            stats.vertex_glyphs += 1;
        }

        for edge in self.tesseract.edges() {
            for at in self.sampler.sample_edge(&points, *edge) {
                self.glyphs.draw_edge_glyph(surface, at)?;
                stats.edge_glyphs += 1;
            }
        }

        log::trace!(
            "Frame at angle {:.3}: {} vertex glyphs, {} edge glyphs",
            angle,
            stats.vertex_glyphs,
            stats.edge_glyphs
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::GlyphStyle;
    use crate::raster::rasterize;
    use crate::surface::Rgb;
    use crate::text::{BuiltinTextRenderer, GlyphBitmap};

    #[derive(Default)]
    struct RecordingSurface {
        clears: Vec<Rgb>,
        glyphs: Vec<(i32, i32, u32)>,
        presents: usize,
    }

    impl DrawingSurface for RecordingSurface {
        fn size(&self) -> (u32, u32) {
            (800, 800)
        }
        fn clear(&mut self, color: Rgb) {
            self.clears.push(color);
            self.glyphs.clear();
        }
        fn draw_glyph(&mut self, glyph: &GlyphBitmap, x: i32, y: i32) {
            self.glyphs.push((x, y, glyph.height()));
        }
        fn present(&mut self) -> Result<(), RenderError> {
            self.presents += 1;
            Ok(())
        }
    }

    fn frame_renderer() -> FrameRenderer<BuiltinTextRenderer> {
        FrameRenderer::new(
            Projector::default(),
            EdgeSampler::default(),
            GlyphRenderer::new(BuiltinTextRenderer::new(), GlyphStyle::default()),
        )
    }

    fn expected_edge_glyphs(renderer: &FrameRenderer<BuiltinTextRenderer>, angle: f32) -> usize {
        let points = renderer.project(angle);
        renderer
            .tesseract()
            .edges()
            .iter()
            .map(|e| {
                let n = rasterize(points[e.a].screen(), points[e.b].screen()).len();
                (n + 1) / 8
            })
            .sum()
    }

    #[test]
    fn test_render_clears_to_background_first() {
        let mut renderer = frame_renderer();
        let mut surface = RecordingSurface::default();
        renderer.render(0.0, &mut surface).unwrap();
        assert_eq!(surface.clears, vec![Rgb::new(13, 13, 13)]);
        assert_eq!(surface.presents, 0);
    }

    #[test]
    fn test_render_counts() {
        let mut renderer = frame_renderer();
        for angle in [0.0, 0.5, 1.7, 3.0] {
            let mut surface = RecordingSurface::default();
            let stats = renderer.render(angle, &mut surface).unwrap();
            assert_eq!(stats.vertex_glyphs, 16);
            assert_eq!(stats.edge_glyphs, expected_edge_glyphs(&renderer, angle));
            assert_eq!(surface.glyphs.len(), stats.vertex_glyphs + stats.edge_glyphs);
        }
    }

    #[test]
    fn test_vertex_glyphs_drawn_first_in_vertex_order() {
        let mut renderer = frame_renderer();
        let mut surface = RecordingSurface::default();
        renderer.render(0.0, &mut surface).unwrap();

        let points = renderer.project(0.0);
        for (i, p) in points.iter().enumerate() {
            let (x, _, height) = surface.glyphs[i];
            assert_eq!(x, p.x);
            assert!(height >= 50);
        }
        // Edge glyphs use the 20pt line font
        assert!(surface.glyphs[16..].iter().all(|&(_, _, h)| h == 20));
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut a = frame_renderer();
        let mut b = frame_renderer();
        let mut sa = RecordingSurface::default();
        let mut sb = RecordingSurface::default();
        a.render(0.8, &mut sa).unwrap();
        b.render(0.8, &mut sb).unwrap();
        assert_eq!(sa.glyphs, sb.glyphs);
    }

    #[test]
    fn test_first_edge_glyph_is_on_far_ring() {
        let mut renderer = frame_renderer();
        let mut surface = RecordingSurface::default();
        renderer.render(0.0, &mut surface).unwrap();

        // First edge is 8 -> 9: (320,320) -> (480,320), 161 points, glyph at x = 326
        assert_eq!((surface.glyphs[16].0, surface.glyphs[16].1), (326, 320));
    }
}
