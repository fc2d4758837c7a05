//! Drawing surfaces
//!
//! The frame renderer only needs three operations from its target: clear,
//! draw a glyph bitmap at a position, and present. [`Framebuffer`] is the CPU
//! implementation; the windowed app wraps one and uploads it on present.

use std::fmt;

use crate::text::{GlyphBitmap, GlyphError};

/// 8-bit RGB color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Opaque RGBA bytes
    #[inline]
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Glyph could not be produced
    Glyph(GlyphError),
    /// Other surface error
    Other(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Glyph(err) => write!(f, "Glyph error: {}", err),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Glyph(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GlyphError> for RenderError {
    fn from(err: GlyphError) -> Self {
        RenderError::Glyph(err)
    }
}

/// Target the frame renderer draws into
pub trait DrawingSurface {
    /// Logical canvas size in pixels (width, height)
    fn size(&self) -> (u32, u32);

    /// Fill the whole canvas
    fn clear(&mut self, color: Rgb);

    /// Blend `glyph` with its top-left corner at (`x`, `y`). Parts outside
    /// the canvas are clipped.
    fn draw_glyph(&mut self, glyph: &GlyphBitmap, x: i32, y: i32);

    /// Make the drawn frame visible
    fn present(&mut self) -> Result<(), RenderError>;
}

/// CPU RGBA8 canvas
#[derive(Clone, Debug)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 255]; (width * height) as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixels in row-major order
    #[inline]
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Raw RGBA bytes for upload
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Color at (`x`, `y`), or `None` outside the canvas
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        self.index(x, y).map(|i| {
            let [r, g, b, _] = self.pixels[i];
            Rgb::new(r, g, b)
        })
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

impl DrawingSurface for Framebuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color.to_rgba());
    }

    fn draw_glyph(&mut self, glyph: &GlyphBitmap, x: i32, y: i32) {
        let color = glyph.color();
        for gy in 0..glyph.height() {
            for gx in 0..glyph.width() {
                let coverage = glyph.coverage(gx, gy);
                if coverage == 0 {
                    continue;
                }
                let Some(i) = self.index(x + gx as i32, y + gy as i32) else {
                    continue;
                };
                let dst = &mut self.pixels[i];
                dst[0] = blend(dst[0], color.r, coverage);
                dst[1] = blend(dst[1], color.g, coverage);
                dst[2] = blend(dst[2], color.b, coverage);
            }
        }
    }

    fn present(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Blend `src` over `dst` with 8-bit alpha
#[inline]
fn blend(dst: u8, src: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((src as u32 * a + dst as u32 * (255 - a) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_glyph(w: u32, h: u32, color: Rgb) -> GlyphBitmap {
        GlyphBitmap::new(w, h, color, vec![255; (w * h) as usize])
    }

    #[test]
    fn test_clear_fills_every_pixel() {
        let mut fb = Framebuffer::new(4, 3);
        fb.clear(Rgb::new(13, 13, 13));
        assert!(fb.pixels().iter().all(|p| *p == [13, 13, 13, 255]));
    }

    #[test]
    fn test_draw_glyph_opaque() {
        let mut fb = Framebuffer::new(8, 8);
        fb.clear(Rgb::new(0, 0, 0));
        fb.draw_glyph(&solid_glyph(2, 2, Rgb::new(60, 180, 120)), 3, 4);

        assert_eq!(fb.pixel(3, 4), Some(Rgb::new(60, 180, 120)));
        assert_eq!(fb.pixel(4, 5), Some(Rgb::new(60, 180, 120)));
        assert_eq!(fb.pixel(2, 4), Some(Rgb::new(0, 0, 0)));
        assert_eq!(fb.pixel(5, 4), Some(Rgb::new(0, 0, 0)));
    }

    #[test]
    fn test_draw_glyph_clips_at_edges() {
        let mut fb = Framebuffer::new(4, 4);
        fb.clear(Rgb::new(0, 0, 0));
        fb.draw_glyph(&solid_glyph(3, 3, Rgb::new(255, 255, 255)), -2, 3);

        assert_eq!(fb.pixel(0, 3), Some(Rgb::new(255, 255, 255)));
        assert_eq!(fb.pixel(1, 3), Some(Rgb::new(0, 0, 0)));
        assert_eq!(fb.pixel(0, 2), Some(Rgb::new(0, 0, 0)));
        assert_eq!(fb.pixel(0, 4), None);
    }

    #[test]
    fn test_partial_coverage_blends() {
        let mut fb = Framebuffer::new(1, 1);
        fb.clear(Rgb::new(0, 100, 200));
        let half = GlyphBitmap::new(1, 1, Rgb::new(200, 100, 0), vec![128]);
        fb.draw_glyph(&half, 0, 0);

        let Rgb { r, g, b } = fb.pixel(0, 0).unwrap();
        assert!((r as i32 - 100).abs() <= 1, "r = {}", r);
        assert_eq!(g, 100);
        assert!((b as i32 - 100).abs() <= 1, "b = {}", b);
    }

    #[test]
    fn test_as_bytes_is_rgba_rows() {
        let mut fb = Framebuffer::new(2, 1);
        fb.clear(Rgb::new(1, 2, 3));
        assert_eq!(fb.as_bytes(), &[1, 2, 3, 255, 1, 2, 3, 255]);
    }

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
        let glyph = RenderError::from(GlyphError::UnsupportedChar('#'));
        assert!(format!("{}", glyph).contains("'#'"));
    }
}
