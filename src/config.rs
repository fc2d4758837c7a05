//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`A4D_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

use ascii4d_render::{FontSpec, GlyphStyle, ProjectionParams, RotationPlane, Rgb};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Animation configuration
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Projection configuration
    #[serde(default)]
    pub projection: ProjectionConfig,
    /// Glyph configuration
    #[serde(default)]
    pub glyphs: GlyphConfig,
    /// Color palette
    #[serde(default)]
    pub colors: ColorConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`A4D_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // A4D_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("A4D_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the renderer cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::invalid("window size must be non-zero"));
        }
        if self.animation.fps == 0 {
            return Err(ConfigError::invalid("animation.fps must be at least 1"));
        }
        if self.projection.distance <= 0.0 {
            return Err(ConfigError::invalid("projection.distance must be positive"));
        }
        let [lo, hi] = self.glyphs.depth_range;
        if lo == hi {
            return Err(ConfigError::invalid("glyphs.depth_range must span a non-empty range"));
        }
        if self.glyphs.line_font_size == 0 || self.glyphs.corner_font_size == 0 {
            return Err(ConfigError::invalid("font sizes must be non-zero"));
        }
        Ok(())
    }

    /// Canvas size in pixels
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.window.width, self.window.height)
    }

    /// Projection constants, centered on the canvas
    pub fn to_projection_params(&self) -> ProjectionParams {
        ProjectionParams {
            distance: self.projection.distance,
            scale: self.projection.scale,
            center: ((self.window.width / 2) as i32, (self.window.height / 2) as i32),
            planes: self.projection.rotation_planes.clone(),
        }
    }

    /// Glyph style from the glyph and color sections
    pub fn to_glyph_style(&self) -> GlyphStyle {
        let glyphs = &self.glyphs;
        GlyphStyle {
            background: Rgb::from(self.colors.background),
            bright: Rgb::from(self.colors.bright),
            depth_range: glyphs.depth_range,
            size_range: glyphs.size_range,
            vertex_char: glyphs.vertex_char,
            edge_char: glyphs.edge_char,
            line_font: FontSpec::new(glyphs.line_font.clone(), glyphs.line_font_size, glyphs.line_bold),
            corner_font: FontSpec::new(glyphs.corner_font.clone(), glyphs.corner_font_size, glyphs.corner_bold),
            interpolate_color: glyphs.interpolate_color,
            interpolate_size: glyphs.interpolate_size,
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Center the window on the primary monitor
    pub centered: bool,
    /// Allow the window to be resized (the canvas keeps its size)
    pub resizable: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "ASCII TESSERACT".to_string(),
            width: 800,
            height: 800,
            centered: true,
            resizable: false,
            vsync: true,
        }
    }
}

/// Animation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Angle increment per frame in radians
    pub speed: f32,
    /// Target frames per second
    pub fps: u32,
    /// Angle of the first frame
    pub start_angle: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            speed: 0.005,
            fps: 60,
            start_angle: 0.0,
        }
    }
}

/// Projection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Viewer distance for both perspective divides
    pub distance: f32,
    /// Pixels per projected unit
    pub scale: f32,
    /// 4D rotations applied in order
    pub rotation_planes: Vec<RotationPlane>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            distance: 5.0,
            scale: 2800.0,
            rotation_planes: vec![RotationPlane::XY, RotationPlane::ZW],
        }
    }
}

/// Glyph configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphConfig {
    /// Lattice spacing parameter for edge glyphs
    pub edge_stride: u32,
    pub vertex_char: char,
    pub edge_char: char,
    /// Edge glyph font
    pub line_font: String,
    pub line_font_size: u32,
    pub line_bold: bool,
    /// Vertex glyph font
    pub corner_font: String,
    pub corner_font_size: u32,
    pub corner_bold: bool,
    /// Shade vertices by depth
    pub interpolate_color: bool,
    /// Size vertices by 4D depth
    pub interpolate_size: bool,
    /// Depth weights mapped onto the color and size ranges
    pub depth_range: [f32; 2],
    /// Vertex point sizes at the ends of the depth range
    pub size_range: [f32; 2],
    /// Font directories searched before the system ones
    pub font_dirs: Vec<PathBuf>,
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            edge_stride: 7,
            vertex_char: '.',
            edge_char: ':',
            line_font: "scheherazade".to_string(),
            line_font_size: 20,
            line_bold: false,
            corner_font: "nachlieliclm".to_string(),
            corner_font_size: 24,
            corner_bold: true,
            interpolate_color: true,
            interpolate_size: true,
            depth_range: [0.1, 0.27],
            size_range: [50.0, 76.0],
            font_dirs: Vec::new(),
        }
    }
}

/// Color palette as [r, g, b] bytes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub background: [u8; 3],
    pub bright: [u8; 3],
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: [13, 13, 13],
            bright: [60, 180, 120],
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Log frame timing and glyph counts once per second
    pub log_frame_stats: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_frame_stats: false,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn invalid(message: &str) -> Self {
        ConfigError {
            message: message.to_string(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
