//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`PIEFALL_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use piefall_core::{FallConfig, KindConfig, UniformRange};
use piefall_render::{color_from_hex, KindPalette};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Falling-object configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Template loading
    #[serde(default)]
    pub assets: AssetsConfig,
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
    /// 3. Environment variables (`PIEFALL_*`)
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

        // PIEFALL_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("PIEFALL_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Coming Soon".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position [x, y, z]
    pub position: [f32; 3],
    /// Look-at target [x, y, z]
    pub target: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 30.0],
            target: [0.0, 0.0, 0.0],
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Instance buffer capacity
    pub max_instances: u32,
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
    /// Light direction [x, y, z], normalized on upload
    pub light_dir: [f32; 3],
    /// Ambient light strength
    pub ambient_strength: f32,
    /// Diffuse light strength
    pub diffuse_strength: f32,
    /// Model color as `0xRRGGBB`
    pub model_color: u32,
    /// Text color as `0xRRGGBB`
    pub text_color: u32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            max_instances: 1024,
            background_color: [0.0, 0.0, 0.0, 1.0],
            light_dir: [0.0, 1.0, 1.0],
            ambient_strength: 0.5,
            diffuse_strength: 1.0,
            model_color: 0xc4a160,
            text_color: 0xffffff,
        }
    }
}

impl RenderingConfig {
    /// Per-kind instance colors
    pub fn palette(&self) -> KindPalette {
        KindPalette {
            model: color_from_hex(self.model_color),
            text: color_from_hex(self.text_color),
        }
    }
}

/// Which preset the scene starts from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Models only
    #[default]
    Base,
    /// Fewer models plus falling text
    Extended,
}

/// Falling-object configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Preset to start from
    #[serde(default)]
    pub variant: Variant,
    /// RNG seed; drawn from entropy when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Per-field overrides for model objects
    #[serde(default)]
    pub model: KindOverride,
    /// Per-field overrides for text objects (ignored by the base variant)
    #[serde(default)]
    pub text: KindOverride,
}

impl SimulationConfig {
    /// Build the simulation parameters: preset first, then overrides
    pub fn fall_config(&self) -> FallConfig {
        let preset = match self.variant {
            Variant::Base => FallConfig::base(),
            Variant::Extended => FallConfig::extended(),
        };
        FallConfig {
            model: self.model.apply(preset.model),
            text: preset.text.map(|text| self.text.apply(text)),
        }
    }
}

/// Optional replacements for individual [`KindConfig`] fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_speed_range: Option<UniformRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fall_speed_range: Option<UniformRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separation_threshold: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separation_gain: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recycle_bound_y: Option<f32>,
    /// Turn recycling off entirely
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_recycling: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spawn_range_x: Option<UniformRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spawn_range_y: Option<UniformRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spawn_range_z: Option<UniformRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
}

impl KindOverride {
    /// Replace every field of `base` that this override sets
    pub fn apply(&self, base: KindConfig) -> KindConfig {
        let recycle_bound_y = if self.disable_recycling == Some(true) {
            None
        } else {
            self.recycle_bound_y.or(base.recycle_bound_y)
        };

        KindConfig {
            count: self.count.unwrap_or(base.count),
            rotation_speed_range: self.rotation_speed_range.unwrap_or(base.rotation_speed_range),
            fall_speed_range: self.fall_speed_range.unwrap_or(base.fall_speed_range),
            separation_threshold: self.separation_threshold.unwrap_or(base.separation_threshold),
            separation_gain: self.separation_gain.unwrap_or(base.separation_gain),
            recycle_bound_y,
            spawn_range_x: self.spawn_range_x.unwrap_or(base.spawn_range_x),
            spawn_range_y: self.spawn_range_y.unwrap_or(base.spawn_range_y),
            spawn_range_z: self.spawn_range_z.unwrap_or(base.spawn_range_z),
            scale: self.scale.unwrap_or(base.scale),
        }
    }
}

/// Template loading configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Artificial delay before each template is delivered
    pub load_delay_ms: u64,
    /// Text shown on the text slabs
    pub text: String,
    /// Edge length of one glyph pixel
    pub text_pixel: f32,
    /// Thickness of the text slab
    pub text_depth: f32,
    /// Pie radius
    pub pie_radius: f32,
    /// Pie thickness
    pub pie_thickness: f32,
    /// Segments around the full circle
    pub pie_segments: u32,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            load_delay_ms: 0,
            text: "COMING SOON".to_string(),
            text_pixel: 0.25,
            text_depth: 0.5,
            pie_radius: 1.5,
            pie_thickness: 0.5,
            pie_segments: 32,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Run without a window, rendering to the log
    pub headless: bool,
    /// Frames to run in headless mode
    pub headless_frames: u64,
    /// Headless tick rate
    pub headless_fps: f64,
    /// Frames between stats log lines (0 disables them)
    pub stats_interval: u64,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            headless: false,
            headless_frames: 600,
            headless_fps: 60.0,
            stats_interval: 300,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
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
