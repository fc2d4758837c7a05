//! Text rendering: characters to glyph bitmaps
//!
//! [`TextRenderer`] is the seam between the glyph renderer and whatever
//! rasterizes characters. Fonts are loaded once per [`FontSpec`] and then used
//! to render single characters in a color.
//!
//! [`BuiltinTextRenderer`] ships a small procedural face: each supported
//! character is a handful of anti-aliased dots and bars laid out on an em box
//! `size` pixels tall and `size / 2` wide. It needs no font files, and is what
//! [`crate::font::SystemTextRenderer`] falls back to.

use std::fmt;

use crate::surface::Rgb;

/// Font identity: family, point size and weight
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontSpec {
    pub family: String,
    pub size: u32,
    pub bold: bool,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: u32, bold: bool) -> Self {
        Self {
            family: family.into(),
            size,
            bold,
        }
    }

    /// Same family and weight at a different size
    pub fn with_size(&self, size: u32) -> Self {
        Self {
            family: self.family.clone(),
            size,
            bold: self.bold,
        }
    }
}

/// Glyph error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlyphError {
    /// The face has no glyph for this character
    UnsupportedChar(char),
    /// Point size of zero
    InvalidSize(u32),
}

impl fmt::Display for GlyphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlyphError::UnsupportedChar(c) => write!(f, "No glyph for character {:?}", c),
            GlyphError::InvalidSize(size) => write!(f, "Invalid font size: {}", size),
        }
    }
}

impl std::error::Error for GlyphError {}

/// A rendered character: a coverage mask tinted with one color
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphBitmap {
    width: u32,
    height: u32,
    color: Rgb,
    coverage: Vec<u8>,
}

impl GlyphBitmap {
    /// Create a bitmap from a row-major coverage mask.
    ///
    /// # Panics
    /// If `coverage.len() != width * height`.
    pub fn new(width: u32, height: u32, color: Rgb, coverage: Vec<u8>) -> Self {
        assert_eq!(coverage.len(), (width * height) as usize, "coverage size mismatch");
        Self {
            width,
            height,
            color,
            coverage,
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

    #[inline]
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Coverage at (`x`, `y`), 0 = transparent, 255 = opaque
    #[inline]
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        self.coverage[(y * self.width + x) as usize]
    }

    /// Number of pixels with any coverage
    pub fn ink(&self) -> usize {
        self.coverage.iter().filter(|&&c| c > 0).count()
    }
}

/// Rasterizes characters
pub trait TextRenderer {
    /// Loaded font resource
    type Font;

    /// Load (or look up) the font for `spec`
    fn load_font(&mut self, spec: &FontSpec) -> Result<Self::Font, GlyphError>;

    /// Render `ch` in `color`
    fn render(&self, font: &Self::Font, ch: char, color: Rgb) -> Result<GlyphBitmap, GlyphError>;
}

/// Primitive of the built-in face, in em units (x across the em width,
/// y down the em height)
#[derive(Clone, Copy, Debug)]
enum Stroke {
    Dot { cx: f32, cy: f32, r: f32 },
    Bar { x0: f32, y0: f32, x1: f32, y1: f32 },
}

fn strokes_for(ch: char) -> Option<&'static [Stroke]> {
    use Stroke::*;
    const PERIOD: &[Stroke] = &[Dot { cx: 0.5, cy: 0.78, r: 0.09 }];
    const COLON: &[Stroke] = &[
        Dot { cx: 0.5, cy: 0.40, r: 0.09 },
        Dot { cx: 0.5, cy: 0.78, r: 0.09 },
    ];
    const COMMA: &[Stroke] = &[
        Dot { cx: 0.5, cy: 0.78, r: 0.09 },
        Bar { x0: 0.42, y0: 0.78, x1: 0.54, y1: 0.95 },
    ];
    const APOSTROPHE: &[Stroke] = &[Bar { x0: 0.44, y0: 0.12, x1: 0.56, y1: 0.36 }];
    const HYPHEN: &[Stroke] = &[Bar { x0: 0.15, y0: 0.52, x1: 0.85, y1: 0.60 }];
    const BAR: &[Stroke] = &[Bar { x0: 0.44, y0: 0.10, x1: 0.56, y1: 0.92 }];
    const BLANK: &[Stroke] = &[];
    const PLUS: &[Stroke] = &[
        Bar { x0: 0.15, y0: 0.52, x1: 0.85, y1: 0.60 },
        Bar { x0: 0.44, y0: 0.26, x1: 0.56, y1: 0.86 },
    ];

    match ch {
        '.' => Some(PERIOD),
        ':' => Some(COLON),
        ',' => Some(COMMA),
        '\'' => Some(APOSTROPHE),
        '-' => Some(HYPHEN),
        '|' => Some(BAR),
        '+' => Some(PLUS),
        ' ' => Some(BLANK),
        _ => None,
    }
}

/// Font handle of the built-in face
#[derive(Clone, Debug, PartialEq)]
pub struct BuiltinFont {
    spec: FontSpec,
    width: u32,
    weight: f32,
}

impl BuiltinFont {
    /// Bitmap dimensions (width, height) for this size
    pub fn cell_size(&self) -> (u32, u32) {
        (self.width, self.spec.size)
    }
}

/// Procedural text renderer with no external font files
#[derive(Debug, Default)]
pub struct BuiltinTextRenderer {
    fonts_loaded: usize,
}

impl BuiltinTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many fonts have been loaded so far
    pub fn fonts_loaded(&self) -> usize {
        self.fonts_loaded
    }

    /// Whether the built-in face can draw `ch`
    pub fn supports(ch: char) -> bool {
        strokes_for(ch).is_some()
    }
}

impl TextRenderer for BuiltinTextRenderer {
    type Font = BuiltinFont;

    fn load_font(&mut self, spec: &FontSpec) -> Result<BuiltinFont, GlyphError> {
        if spec.size == 0 {
            return Err(GlyphError::InvalidSize(spec.size));
        }
        self.fonts_loaded += 1;
        log::debug!(
            "Loading built-in face for '{}' at {}pt{}",
            spec.family,
            spec.size,
            if spec.bold { " bold" } else { "" }
        );
        Ok(BuiltinFont {
            spec: spec.clone(),
            width: ((spec.size as f32 * 0.5).round() as u32).max(1),
            weight: if spec.bold { 1.35 } else { 1.0 },
        })
    }

    fn render(&self, font: &BuiltinFont, ch: char, color: Rgb) -> Result<GlyphBitmap, GlyphError> {
        let strokes = strokes_for(ch).ok_or(GlyphError::UnsupportedChar(ch))?;
        let (width, height) = font.cell_size();
        let em_w = width as f32;
        let em_h = height as f32;

        let mut coverage = vec![0u8; (width * height) as usize];
        for py in 0..height {
            for px in 0..width {
                let x = px as f32 + 0.5;
                let y = py as f32 + 0.5;
                let cover = strokes
                    .iter()
                    .map(|s| stroke_coverage(s, x, y, em_w, em_h, font.weight))
                    .fold(0.0f32, f32::max);
                coverage[(py * width + px) as usize] = (cover * 255.0).round() as u8;
            }
        }

        Ok(GlyphBitmap::new(width, height, color, coverage))
    }
}

/// Anti-aliased coverage of a pixel centered at (`x`, `y`) in pixels
fn stroke_coverage(stroke: &Stroke, x: f32, y: f32, em_w: f32, em_h: f32, weight: f32) -> f32 {
    let distance = match *stroke {
        Stroke::Dot { cx, cy, r } => {
            // Radius is relative to the em height so dots stay round
            let dx = x - cx * em_w;
            let dy = y - cy * em_h;
            (dx * dx + dy * dy).sqrt() - r * em_h * weight
        }
        Stroke::Bar { x0, y0, x1, y1 } => {
            let half_w = (x1 - x0) * em_w * 0.5 * weight;
            let half_h = (y1 - y0) * em_h * 0.5 * weight;
            let mx = (x0 + x1) * 0.5 * em_w;
            let my = (y0 + y1) * 0.5 * em_h;
            ((x - mx).abs() - half_w).max((y - my).abs() - half_h)
        }
    };
    (0.5 - distance).clamp(0.0, 1.0)
}
