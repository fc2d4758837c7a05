//! Glyph renderer
//!
//! Turns projected points into glyphs on a [`DrawingSurface`]. Vertices are
//! drawn with a depth-dependent color (from `z_depth`) and size (from
//! `w_depth`); edge glyphs are one fixed bitmap reused for every sampled point.
//!
//! Fonts are cached by [`FontSpec`], so a vertex size seen once is never
//! loaded again.

use std::collections::HashMap;

use crate::projection::ProjectedPoint;
use crate::surface::{DrawingSurface, RenderError, Rgb};
use crate::text::{FontSpec, GlyphBitmap, TextRenderer};

/// Linear map of `value` from `from` onto `to`, unclamped
#[inline]
pub fn interpolate(value: f32, from: [f32; 2], to: [f32; 2]) -> f32 {
    to[0] + (value - from[0]) * (to[1] - to[0]) / (from[1] - from[0])
}

/// Look of the rendered tesseract
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphStyle {
    pub background: Rgb,
    pub bright: Rgb,
    /// Depth-weight range mapped onto the color and size ranges
    pub depth_range: [f32; 2],
    /// Vertex point sizes at the ends of `depth_range`
    pub size_range: [f32; 2],
    pub vertex_char: char,
    pub edge_char: char,
    /// Font of edge glyphs
    pub line_font: FontSpec,
    /// Font of vertex glyphs; its size is used when size interpolation is off
    pub corner_font: FontSpec,
    pub interpolate_color: bool,
    pub interpolate_size: bool,
}

impl Default for GlyphStyle {
    fn default() -> Self {
        Self {
            background: Rgb::new(13, 13, 13),
            bright: Rgb::new(60, 180, 120),
            depth_range: [0.1, 0.27],
            size_range: [50.0, 76.0],
            vertex_char: '.',
            edge_char: ':',
            line_font: FontSpec::new("scheherazade", 20, false),
            corner_font: FontSpec::new("nachlieliclm", 24, true),
            interpolate_color: true,
            interpolate_size: true,
        }
    }
}

/// Draws vertex and edge glyphs through a [`TextRenderer`]
pub struct GlyphRenderer<T: TextRenderer> {
    text: T,
    style: GlyphStyle,
    fonts: HashMap<FontSpec, T::Font>,
    edge_glyph: Option<GlyphBitmap>,
}

impl<T: TextRenderer> GlyphRenderer<T> {
    pub fn new(text: T, style: GlyphStyle) -> Self {
        Self {
            text,
            style,
            fonts: HashMap::new(),
            edge_glyph: None,
        }
    }

    pub fn style(&self) -> &GlyphStyle {
        &self.style
    }

    pub fn text_renderer(&self) -> &T {
        &self.text
    }

    /// Number of distinct fonts loaded so far
    pub fn cached_fonts(&self) -> usize {
        self.fonts.len()
    }

    /// Vertex color for a `z_depth` weight.
    ///
    /// Channels are truncated toward zero and saturate at 0 and 255.
    pub fn vertex_color(&self, z_depth: f32) -> Rgb {
        if !self.style.interpolate_color {
            return self.style.bright;
        }
        let from = self.style.depth_range;
        let (bg, fg) = (self.style.background, self.style.bright);
        let channel = |a: u8, b: u8| interpolate(z_depth, from, [a as f32, b as f32]) as u8;
        Rgb::new(channel(bg.r, fg.r), channel(bg.g, fg.g), channel(bg.b, fg.b))
    }

    /// Vertex point size for a `w_depth` weight
    pub fn vertex_size(&self, w_depth: f32) -> u32 {
        if !self.style.interpolate_size {
            return self.style.corner_font.size;
        }
        interpolate(w_depth, self.style.depth_range, self.style.size_range) as u32
    }

    /// Draw the vertex glyph for `point`, raised by half its size.
    pub fn draw_vertex<S: DrawingSurface>(
        &mut self,
        surface: &mut S,
        point: &ProjectedPoint,
    ) -> Result<(), RenderError> {
        let size = self.vertex_size(point.w_depth);
        let color = self.vertex_color(point.z_depth);
        let spec = self.style.corner_font.with_size(size);

        let font = Self::font(&mut self.text, &mut self.fonts, &spec)?;
        let glyph = self.text.render(font, self.style.vertex_char, color)?;

        let y = (point.y as f32 - size as f32 / 2.0) as i32;
        surface.draw_glyph(&glyph, point.x, y);
        Ok(())
    }

    /// Draw the edge glyph with its top-left corner at `at`.
    pub fn draw_edge_glyph<S: DrawingSurface>(
        &mut self,
        surface: &mut S,
        at: (i32, i32),
    ) -> Result<(), RenderError> {
        if self.edge_glyph.is_none() {
            let spec = self.style.line_font.clone();
            let font = Self::font(&mut self.text, &mut self.fonts, &spec)?;
            let glyph = self.text.render(font, self.style.edge_char, self.style.bright)?;
            self.edge_glyph = Some(glyph);
        }
        if let Some(glyph) = &self.edge_glyph {
            surface.draw_glyph(glyph, at.0, at.1);
        }
        Ok(())
    }

    fn font<'a>(
        text: &mut T,
        fonts: &'a mut HashMap<FontSpec, T::Font>,
        spec: &FontSpec,
    ) -> Result<&'a T::Font, RenderError> {
        if !fonts.contains_key(spec) {
            let font = text.load_font(spec)?;
            fonts.insert(spec.clone(), font);
        }
        fonts
            .get(spec)
            .ok_or_else(|| RenderError::Other(format!("font '{}' missing from cache", spec.family)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Framebuffer;
    use crate::text::{BuiltinTextRenderer, GlyphError};

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn renderer(style: GlyphStyle) -> GlyphRenderer<BuiltinTextRenderer> {
        GlyphRenderer::new(BuiltinTextRenderer::new(), style)
    }

    /// Records the position of each glyph drawn
    #[derive(Default)]
    struct Recorder {
        glyphs: Vec<(i32, i32, u32, Rgb)>,
    }

    impl DrawingSurface for Recorder {
        fn size(&self) -> (u32, u32) {
            (800, 800)
        }
        fn clear(&mut self, _color: Rgb) {}
        fn draw_glyph(&mut self, glyph: &GlyphBitmap, x: i32, y: i32) {
            self.glyphs.push((x, y, glyph.height(), glyph.color()));
        }
        fn present(&mut self) -> Result<(), RenderError> {
            Ok(())
        }
    }

    #[test]
    fn test_interpolate_endpoints() {
        assert!(approx_eq(interpolate(0.1, [0.1, 0.27], [50.0, 76.0]), 50.0));
        assert!(approx_eq(interpolate(0.27, [0.1, 0.27], [50.0, 76.0]), 76.0));
        assert!(approx_eq(interpolate(0.185, [0.1, 0.27], [50.0, 76.0]), 63.0));
    }

    #[test]
    fn test_interpolate_is_monotonic_and_unclamped() {
        let mut last = f32::MIN;
        for i in 0..50 {
            let v = interpolate(i as f32 * 0.01, [0.1, 0.27], [50.0, 76.0]);
            assert!(v > last);
            last = v;
        }
        assert!(interpolate(0.0, [0.1, 0.27], [50.0, 76.0]) < 50.0);
        assert!(interpolate(0.3, [0.1, 0.27], [50.0, 76.0]) > 76.0);
    }

    #[test]
    fn test_vertex_color_endpoints() {
        let glyphs = renderer(GlyphStyle::default());
        assert_eq!(glyphs.vertex_color(0.1), Rgb::new(13, 13, 13));
        assert_eq!(glyphs.vertex_color(0.27), Rgb::new(60, 180, 120));
    }

    #[test]
    fn test_vertex_color_truncates() {
        let glyphs = renderer(GlyphStyle::default());
        // 13 + (0.2 - 0.1) * 47 / 0.17 = 40.6
        assert_eq!(glyphs.vertex_color(0.2).r, 40);
    }

    #[test]
    fn test_vertex_color_saturates() {
        let glyphs = renderer(GlyphStyle::default());
        assert_eq!(glyphs.vertex_color(1.0), Rgb::new(255, 255, 255));
        assert_eq!(glyphs.vertex_color(-1.0), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_vertex_size() {
        let glyphs = renderer(GlyphStyle::default());
        assert_eq!(glyphs.vertex_size(0.25), 72);
        assert_eq!(glyphs.vertex_size(1.0 / 6.0), 60);
    }

    #[test]
    fn test_interpolation_switches() {
        let style = GlyphStyle {
            interpolate_color: false,
            interpolate_size: false,
            ..Default::default()
        };
        let glyphs = renderer(style);
        assert_eq!(glyphs.vertex_color(0.12), Rgb::new(60, 180, 120));
        assert_eq!(glyphs.vertex_size(0.12), 24);
    }

    #[test]
    fn test_draw_vertex_raises_by_half_size() {
        let mut glyphs = renderer(GlyphStyle::default());
        let mut surface = Recorder::default();
        let point = ProjectedPoint { x: 213, y: 213, z_depth: 0.25, w_depth: 0.25 };
        glyphs.draw_vertex(&mut surface, &point).unwrap();

        assert_eq!(surface.glyphs.len(), 1);
        let (x, y, height, _) = surface.glyphs[0];
        assert_eq!((x, y, height), (213, 177, 72));
    }

    #[test]
    fn test_fonts_cached_by_size() {
        let mut glyphs = renderer(GlyphStyle::default());
        let mut surface = Recorder::default();
        let near = ProjectedPoint { x: 0, y: 0, z_depth: 0.2, w_depth: 0.25 };
        let far = ProjectedPoint { x: 0, y: 0, z_depth: 0.2, w_depth: 1.0 / 6.0 };

        for _ in 0..3 {
            glyphs.draw_vertex(&mut surface, &near).unwrap();
            glyphs.draw_vertex(&mut surface, &far).unwrap();
        }
        assert_eq!(glyphs.cached_fonts(), 2);
        assert_eq!(glyphs.text_renderer().fonts_loaded(), 2);
    }

    #[test]
    fn test_edge_glyph_rendered_once() {
        let mut glyphs = renderer(GlyphStyle::default());
        let mut surface = Recorder::default();
        for i in 0..10 {
            glyphs.draw_edge_glyph(&mut surface, (i, 2 * i)).unwrap();
        }
        assert_eq!(glyphs.text_renderer().fonts_loaded(), 1);
        assert_eq!(surface.glyphs.len(), 10);
        assert!(surface
            .glyphs
            .iter()
            .all(|&(_, _, h, c)| h == 20 && c == Rgb::new(60, 180, 120)));
        assert_eq!((surface.glyphs[3].0, surface.glyphs[3].1), (3, 6));
    }

    #[test]
    fn test_unsupported_char_is_an_error() {
        let style = GlyphStyle { edge_char: 'Z', ..Default::default() };
        let mut glyphs = renderer(style);
        let mut fb = Framebuffer::new(16, 16);
        match glyphs.draw_edge_glyph(&mut fb, (0, 0)) {
            Err(RenderError::Glyph(GlyphError::UnsupportedChar('Z'))) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
