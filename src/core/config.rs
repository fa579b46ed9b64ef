//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.prompter/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::animator::SpeedSampling;
use crate::core::controls::{DEFAULT_FONT_RANGE, DEFAULT_SPEED_RANGE, SliderRange};
use crate::core::state::{DEFAULT_FONT_SIZE, DEFAULT_SCROLL_SPEED};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PrompterConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub controls: ControlsConfig,
    #[serde(default)]
    pub fullscreen: FullscreenConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub speed: Option<f64>,
    pub font_size: Option<f64>,
    pub mirrored: Option<bool>,
    pub speed_sampling: Option<SpeedSampling>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    pub cell_height_px: Option<f64>,
    pub frame_interval_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ControlsConfig {
    pub speed_min: Option<f64>,
    pub speed_max: Option<f64>,
    pub speed_step: Option<f64>,
    pub font_min: Option<f64>,
    pub font_max: Option<f64>,
    pub font_step: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FullscreenConfig {
    /// Ordered method names to try, e.g. `["xterm-fullscreen", "xterm-maximize"]`.
    pub methods: Option<Vec<String>>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_CELL_HEIGHT_PX: f64 = 20.0;
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;
pub const DEFAULT_FULLSCREEN_METHODS: &[&str] = &["xterm-fullscreen", "xterm-maximize"];

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub speed: f64,
    pub font_size: f64,
    pub mirrored: bool,
    pub speed_sampling: SpeedSampling,
    pub cell_height_px: f64,
    pub frame_interval_ms: u64,
    pub speed_range: SliderRange,
    pub font_range: SliderRange,
    pub fullscreen_methods: Vec<String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SCROLL_SPEED,
            font_size: DEFAULT_FONT_SIZE,
            mirrored: false,
            speed_sampling: SpeedSampling::default(),
            cell_height_px: DEFAULT_CELL_HEIGHT_PX,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            speed_range: DEFAULT_SPEED_RANGE,
            font_range: DEFAULT_FONT_RANGE,
            fullscreen_methods: DEFAULT_FULLSCREEN_METHODS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Values given on the command line. `None` means "not specified".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub speed: Option<f64>,
    pub font_size: Option<f64>,
    pub mirrored: Option<bool>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.prompter/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".prompter").join("config.toml"))
}

/// Load config from `~/.prompter/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PrompterConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<PrompterConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(PrompterConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(PrompterConfig::default());
    }

    load_config_from(&path)
}

/// Parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<PrompterConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: PrompterConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Prompter Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# speed = 2.0                        # Or PROMPTER_SPEED
# font_size = 40                     # Or PROMPTER_FONT_SIZE
# mirrored = false                   # Or PROMPTER_MIRROR
# speed_sampling = "live"            # "live" or "at_start"

# [display]
# cell_height_px = 20                # Logical pixels per terminal row
# frame_interval_ms = 16             # Poll timeout while scrolling

# [controls]
# speed_min = 0.5
# speed_max = 10.0
# speed_step = 0.5
# font_min = 20
# font_max = 100
# font_step = 2

# [fullscreen]
# methods = ["xterm-fullscreen", "xterm-maximize"]   # Tried in order
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &PrompterConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env<F>(config: &PrompterConfig, cli: &CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = ResolvedConfig::default();

    // Speed: CLI → env → config → default
    let speed = cli
        .speed
        .or_else(|| parse_env(&env, "PROMPTER_SPEED"))
        .or(config.general.speed)
        .unwrap_or(defaults.speed);

    // Font size: CLI → env → config → default
    let font_size = cli
        .font_size
        .or_else(|| parse_env(&env, "PROMPTER_FONT_SIZE"))
        .or(config.general.font_size)
        .unwrap_or(defaults.font_size);

    // Mirror: CLI → env → config → default
    let mirrored = cli
        .mirrored
        .or_else(|| parse_env(&env, "PROMPTER_MIRROR"))
        .or(config.general.mirrored)
        .unwrap_or(defaults.mirrored);

    let speed_range = resolve_range(
        defaults.speed_range,
        config.controls.speed_min,
        config.controls.speed_max,
        config.controls.speed_step,
    );
    let font_range = resolve_range(
        defaults.font_range,
        config.controls.font_min,
        config.controls.font_max,
        config.controls.font_step,
    );

    let cell_height_px = config
        .display
        .cell_height_px
        .filter(|px| *px > 0.0)
        .unwrap_or(defaults.cell_height_px);

    let frame_interval_ms = config
        .display
        .frame_interval_ms
        .filter(|ms| *ms > 0)
        .unwrap_or(defaults.frame_interval_ms);

    ResolvedConfig {
        speed,
        font_size,
        mirrored,
        speed_sampling: config.general.speed_sampling.unwrap_or_default(),
        cell_height_px,
        frame_interval_ms,
        speed_range,
        font_range,
        fullscreen_methods: config
            .fullscreen
            .methods
            .clone()
            .unwrap_or(defaults.fullscreen_methods),
    }
}

fn parse_env<F, T>(env: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = env(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unparsable {}={:?}", key, raw);
            None
        }
    }
}

/// Build a slider range from sparse overrides. Ranges must stay positive and
/// non-empty; anything else falls back to the default.
fn resolve_range(
    default: SliderRange,
    min: Option<f64>,
    max: Option<f64>,
    step: Option<f64>,
) -> SliderRange {
    let range = SliderRange::new(
        min.unwrap_or(default.min),
        max.unwrap_or(default.max),
        step.unwrap_or(default.step),
    );
    if range.min > 0.0 && range.max >= range.min && range.step > 0.0 {
        range
    } else {
        warn!("Invalid slider range {:?}, using {:?}", range, default);
        default
    }
}
