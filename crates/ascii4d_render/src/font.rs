//! Font-file text rendering
//!
//! [`SystemTextRenderer`] resolves the family of a [`FontSpec`] to a TrueType
//! or OpenType file in the font directories and rasterizes characters with
//! `ab_glyph`. A point size is the em height in pixels, and bitmaps are one
//! line tall (ascent to descent) and one advance wide.
//!
//! Families with no matching file, or whose file cannot be parsed, fall back
//! to the built-in face.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::{point, Font, FontArc, PxScale, ScaleFont};

use crate::surface::Rgb;
use crate::text::{BuiltinFont, BuiltinTextRenderer, FontSpec, GlyphBitmap, GlyphError, TextRenderer};

/// Platform font directories, searched recursively
pub const SYSTEM_FONT_DIRS: &[&str] = &[
    "/usr/share/fonts",
    "/usr/local/share/fonts",
    "/Library/Fonts",
    "/System/Library/Fonts",
    "C:\\Windows\\Fonts",
];

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc"];

/// Per-user font directories followed by [`SYSTEM_FONT_DIRS`]
pub fn system_font_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(home) = std::env::var("HOME") {
        let home = PathBuf::from(home);
        dirs.push(home.join(".local/share/fonts"));
        dirs.push(home.join(".fonts"));
    }
    dirs.extend(SYSTEM_FONT_DIRS.iter().map(PathBuf::from));
    dirs
}

/// Lowercase ASCII letters and digits of `name`
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// A font file, named `Family-Style.ext`
#[derive(Clone, Debug, PartialEq, Eq)]
struct FontFile {
    path: PathBuf,
    family: String,
    style: String,
}

impl FontFile {
    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if !FONT_EXTENSIONS.contains(&ext.as_str()) {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        let (family, style) = stem
            .split_once(|c: char| c == '-' || c == '_')
            .unwrap_or((stem, ""));
        Some(Self {
            path: path.to_path_buf(),
            family: normalize(family),
            style: normalize(style),
        })
    }

    fn is_bold(&self) -> bool {
        self.style.contains("bold")
    }

    fn is_slanted(&self) -> bool {
        self.style.contains("italic") || self.style.contains("oblique")
    }
}

/// All font files under `dirs`
fn scan_dirs(dirs: &[PathBuf]) -> Vec<FontFile> {
    let mut files = Vec::new();
    let mut pending = dirs.to_vec();
    while let Some(dir) = pending.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else if let Some(file) = FontFile::from_path(&path) {
                files.push(file);
            }
        }
    }
    files
}

/// Best face of `family`: exact family names before prefix matches, then
/// the requested weight, then upright faces and the plainest style name.
fn find_face<'a>(files: &'a [FontFile], family: &str, bold: bool) -> Option<&'a FontFile> {
    let wanted = normalize(family);
    if wanted.is_empty() {
        return None;
    }
    files
        .iter()
        .filter_map(|file| {
            let name_rank = if file.family == wanted {
                0
            } else if file.family.starts_with(&wanted) {
                1
            } else {
                return None;
            };
            let weight_rank = u8::from(file.is_bold() != bold);
            let slant_rank = u8::from(file.is_slanted());
            Some(((name_rank, weight_rank, slant_rank, file.style.len()), file))
        })
        .min_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.path.cmp(&b.1.path)))
        .map(|(_, file)| file)
}

/// Spread coverage `strength` pixels to the right
fn embolden(coverage: &mut [u8], width: u32, strength: u32) {
    for row in coverage.chunks_mut(width as usize) {
        let source = row.to_vec();
        for (x, cell) in row.iter_mut().enumerate() {
            let from = x.saturating_sub(strength as usize);
            *cell = source[from..=x].iter().copied().max().unwrap_or(0);
        }
    }
}

/// A parsed font file at one size
#[derive(Clone)]
pub struct OutlineFont {
    font: FontArc,
    scale: PxScale,
    /// Synthetic bold strength in pixels, 0 for none
    embolden: u32,
    path: PathBuf,
}

impl OutlineFont {
    fn new(font: FontArc, spec: &FontSpec, face: &FontFile) -> Self {
        let size = spec.size as f32;
        // Scale is the ascent-to-descent height, so convert from em size
        let height = match font.units_per_em() {
            Some(upem) if upem > 0.0 => size * font.height_unscaled() / upem,
            _ => size,
        };
        let embolden = if spec.bold && !face.is_bold() {
            ((size / 24.0).round() as u32).max(1)
        } else {
            0
        };
        Self {
            font,
            scale: PxScale::from(height),
            embolden,
            path: face.path.clone(),
        }
    }

    fn render(&self, ch: char, color: Rgb) -> Result<GlyphBitmap, GlyphError> {
        let scaled = self.font.as_scaled(self.scale);
        let id = self.font.glyph_id(ch);
        if id.0 == 0 {
            return Err(GlyphError::UnsupportedChar(ch));
        }

        let width = (scaled.h_advance(id).ceil() as u32).max(1) + self.embolden;
        let height = (scaled.height().ceil() as u32).max(1);
        let mut coverage = vec![0u8; (width * height) as usize];

        let glyph = id.with_scale_and_position(self.scale, point(0.0, scaled.ascent()));
        if let Some(outline) = self.font.outline_glyph(glyph) {
            let bounds = outline.px_bounds();
            outline.draw(|x, y, c| {
                let px = bounds.min.x as i32 + x as i32;
                let py = bounds.min.y as i32 + y as i32;
                if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
                    let idx = (py as u32 * width + px as u32) as usize;
                    let value = (c * 255.0).clamp(0.0, 255.0) as u8;
                    coverage[idx] = coverage[idx].max(value);
                }
            });
        }

        if self.embolden > 0 {
            embolden(&mut coverage, width, self.embolden);
        }
        Ok(GlyphBitmap::new(width, height, color, coverage))
    }
}

/// Font handle of [`SystemTextRenderer`]
#[derive(Clone)]
pub enum SystemFont {
    Outline(OutlineFont),
    Builtin(BuiltinFont),
}

impl SystemFont {
    pub fn is_builtin(&self) -> bool {
        matches!(self, SystemFont::Builtin(_))
    }

    /// File the font was loaded from
    pub fn path(&self) -> Option<&Path> {
        match self {
            SystemFont::Outline(font) => Some(&font.path),
            SystemFont::Builtin(_) => None,
        }
    }
}

/// Text renderer backed by installed font files
pub struct SystemTextRenderer {
    search_dirs: Vec<PathBuf>,
    files: Option<Vec<FontFile>>,
    builtin: BuiltinTextRenderer,
    missing: HashSet<String>,
    fonts_loaded: usize,
}

impl SystemTextRenderer {
    /// Search `extra_dirs` first, then the system font directories
    pub fn new(extra_dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut dirs: Vec<PathBuf> = extra_dirs.into_iter().collect();
        dirs.extend(system_font_dirs());
        Self::with_search_dirs(dirs)
    }

    /// Search only `dirs`
    pub fn with_search_dirs(dirs: Vec<PathBuf>) -> Self {
        Self {
            search_dirs: dirs,
            files: None,
            builtin: BuiltinTextRenderer::new(),
            missing: HashSet::new(),
            fonts_loaded: 0,
        }
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// How many fonts have been loaded so far
    pub fn fonts_loaded(&self) -> usize {
        self.fonts_loaded
    }

    /// Font files found in the search directories, scanned on first use
    fn font_files(&mut self) -> &[FontFile] {
        let dirs = &self.search_dirs;
        self.files.get_or_insert_with(|| {
            let files = scan_dirs(dirs);
            log::debug!("Found {} font files in {} directories", files.len(), dirs.len());
            files
        })
    }

    fn open(face: &FontFile, spec: &FontSpec) -> Result<OutlineFont, String> {
        let data = fs::read(&face.path).map_err(|e| e.to_string())?;
        let font = FontArc::try_from_vec(data).map_err(|e| e.to_string())?;
        Ok(OutlineFont::new(font, spec, face))
    }
}

impl Default for SystemTextRenderer {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl TextRenderer for SystemTextRenderer {
    type Font = SystemFont;

    fn load_font(&mut self, spec: &FontSpec) -> Result<SystemFont, GlyphError> {
        if spec.size == 0 {
            return Err(GlyphError::InvalidSize(spec.size));
        }

        let face = find_face(self.font_files(), &spec.family, spec.bold).cloned();
        match face {
            Some(face) => match Self::open(&face, spec) {
                Ok(font) => {
                    self.fonts_loaded += 1;
                    log::debug!(
                        "Loaded '{}' at {}pt from {}",
                        spec.family,
                        spec.size,
                        face.path.display()
                    );
                    return Ok(SystemFont::Outline(font));
                }
                Err(err) => {
                    if self.missing.insert(spec.family.clone()) {
                        log::warn!("Failed to load font {}: {}", face.path.display(), err);
                    }
                }
            },
            None => {
                if self.missing.insert(spec.family.clone()) {
                    log::warn!("No font file for family '{}', using the built-in face", spec.family);
                }
            }
        }

        let font = self.builtin.load_font(spec)?;
        self.fonts_loaded += 1;
        Ok(SystemFont::Builtin(font))
    }

    fn render(&self, font: &SystemFont, ch: char, color: Rgb) -> Result<GlyphBitmap, GlyphError> {
        match font {
            SystemFont::Outline(font) => font.render(ch, color),
            SystemFont::Builtin(font) => self.builtin.render(font, ch, color),
        }
    }
}
