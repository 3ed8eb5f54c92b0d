//! Configuration file support for annoview.
//!
//! Settings are stored as pretty-printed JSON. Every field has a serde default,
//! so files written by older versions (or edited by hand) load with the
//! missing values filled in.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::display::DEFAULT_CIRCLE_RADIUS;
use crate::dispatch::{DEFAULT_DOUBLE_CLICK_DISTANCE, DEFAULT_DOUBLE_CLICK_MS};
use crate::keybindings::{KeyBindings, KeyCode};

/// Verbosity of annoview's own log output. Other crates stay at `warn`
/// unless `RUST_LOG` says otherwise.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

/// What happens to the overlays when another image is selected.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayPolicy {
    /// Start every image with an empty overlay set
    #[default]
    Reset,
    /// Remember overlays per image path for the rest of the session
    PerImage,
}

/// Format version written to new files. Files with a higher version are refused.
pub const CONFIG_VERSION: u32 = 1;

/// Name of the file inside the per-user config directory.
pub const CONFIG_FILE_NAME: &str = "annoview-config.json";

/// Application configuration persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default)]
    pub preferences: UserPreferences,

    #[serde(default)]
    pub style: StyleConfig,

    #[serde(default)]
    pub keybindings: KeyBindingsConfig,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_app_name() -> String {
    "annoview".to_string()
}

/// Behavior settings. The `preferences` object of the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub log_level: LogLevel,

    /// Folder opened on the previous run
    #[serde(default)]
    pub last_folder: Option<PathBuf>,

    /// Draw the image frame and tick marks
    #[serde(default)]
    pub show_axes: bool,

    #[serde(default)]
    pub overlay_policy: OverlayPolicy,

    /// Radius of point annotations, in image pixels
    #[serde(default = "default_circle_radius")]
    pub circle_radius: f32,

    /// Only place circles on a double click of the secondary button
    #[serde(default)]
    pub circle_on_double_click: bool,

    #[serde(default = "default_double_click_ms")]
    pub double_click_ms: u64,

    /// Maximum pointer travel between the two clicks, in window pixels
    #[serde(default = "default_double_click_distance")]
    pub double_click_distance: f32,

    /// File extensions listed when a folder is opened (case-insensitive)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Space reserved around the image for the axes, in window pixels
    #[serde(default = "default_axes_margin")]
    pub axes_margin: f32,
}

fn default_circle_radius() -> f32 {
    DEFAULT_CIRCLE_RADIUS
}

fn default_double_click_ms() -> u64 {
    DEFAULT_DOUBLE_CLICK_MS
}

fn default_double_click_distance() -> f32 {
    DEFAULT_DOUBLE_CLICK_DISTANCE
}

pub(crate) fn default_extensions() -> Vec<String> {
    ["png", "jpg", "jpeg"].iter().map(|s| s.to_string()).collect()
}

fn default_axes_margin() -> f32 {
    32.0
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            last_folder: None,
            show_axes: false,
            overlay_policy: OverlayPolicy::default(),
            circle_radius: default_circle_radius(),
            circle_on_double_click: false,
            double_click_ms: default_double_click_ms(),
            double_click_distance: default_double_click_distance(),
            extensions: default_extensions(),
            axes_margin: default_axes_margin(),
        }
    }
}

/// Colors and line widths of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    #[serde(default = "default_rectangle_color")]
    pub rectangle_color: [u8; 3],
    #[serde(default = "default_circle_color")]
    pub circle_color: [u8; 3],
    /// Color of the image frame and tick marks
    #[serde(default = "default_axes_color")]
    pub axes_color: [u8; 3],
    /// Window background around the image
    #[serde(default = "default_background")]
    pub background: [u8; 3],
    /// Rectangle outline width, in window pixels
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,
}

fn default_rectangle_color() -> [u8; 3] {
    [255, 0, 0]
}

fn default_circle_color() -> [u8; 3] {
    [0, 0, 255]
}

fn default_axes_color() -> [u8; 3] {
    [200, 200, 200]
}

fn default_background() -> [u8; 3] {
    [47, 47, 47]
}

fn default_stroke_width() -> f32 {
    2.0
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            rectangle_color: default_rectangle_color(),
            circle_color: default_circle_color(),
            axes_color: default_axes_color(),
            background: default_background(),
            stroke_width: default_stroke_width(),
        }
    }
}

/// Keybinding configuration section. Unlisted actions keep their default key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindingsConfig {
    pub open_folder: KeyCode,
    pub next_image: KeyCode,
    pub previous_image: KeyCode,
    pub first_image: KeyCode,
    pub last_image: KeyCode,
    pub toggle_axes: KeyCode,
    pub clear_overlays: KeyCode,
    pub quit: KeyCode,
}

impl Default for KeyBindingsConfig {
    fn default() -> Self {
        Self::from(&KeyBindings::default())
    }
}

impl From<&KeyBindings> for KeyBindingsConfig {
    fn from(bindings: &KeyBindings) -> Self {
        Self {
            open_folder: bindings.open_folder,
            next_image: bindings.next_image,
            previous_image: bindings.previous_image,
            first_image: bindings.first_image,
            last_image: bindings.last_image,
            toggle_axes: bindings.toggle_axes,
            clear_overlays: bindings.clear_overlays,
            quit: bindings.quit,
        }
    }
}

impl KeyBindingsConfig {
    pub fn to_keybindings(&self) -> KeyBindings {
        let bindings = KeyBindings {
            open_folder: self.open_folder,
            next_image: self.next_image,
            previous_image: self.previous_image,
            first_image: self.first_image,
            last_image: self.last_image,
            toggle_axes: self.toggle_axes,
            clear_overlays: self.clear_overlays,
            quit: self.quit,
        };
        for (key, first, second) in bindings.conflicts() {
            log::warn!(
                "Key {} is bound to both {} and {}; {} wins",
                key,
                first.name(),
                second.name(),
                first.name()
            );
        }
        bindings
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app_name: default_app_name(),
            preferences: UserPreferences::default(),
            style: StyleConfig::default(),
            keybindings: KeyBindingsConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a config file's contents, refusing versions newer than [`CONFIG_VERSION`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        match config.version {
            found if found > CONFIG_VERSION => Err(ConfigError::TooNew {
                found,
                supported: CONFIG_VERSION,
            }),
            _ => Ok(config),
        }
    }

    /// `<config dir>/annoview/annoview-config.json`, with `~/.config` standing
    /// in for platforms without a config directory.
    pub fn default_path() -> Option<PathBuf> {
        let base = dirs::config_dir().or_else(|| dirs::home_dir().map(|home| home.join(".config")))?;
        Some(base.join("annoview").join(CONFIG_FILE_NAME))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Write the configuration, creating parent directories if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        log::info!("Saved configuration to {}", path.display());
        Ok(())
    }
}

/// The configuration chosen at startup and where it may be written back.
#[derive(Debug)]
pub struct StartupConfig {
    pub config: AppConfig,
    /// The file that was consulted, if a config location is known.
    pub path: Option<PathBuf>,
    /// Why that file was ignored. Reported once logging is set up.
    pub error: Option<ConfigError>,
}

impl StartupConfig {
    /// Read `explicit`, or the per-user file when no path is given.
    pub fn load(explicit: Option<&Path>) -> Self {
        match explicit.map(Path::to_path_buf).or_else(AppConfig::default_path) {
            Some(path) => Self::load_path(path),
            None => Self {
                config: AppConfig::default(),
                path: None,
                error: Some(ConfigError::NoConfigDir),
            },
        }
    }

    /// A missing file yields the defaults and may be created on exit. An
    /// unusable file yields the defaults and stays as it is.
    pub fn load_path(path: PathBuf) -> Self {
        if !path.exists() {
            return Self {
                config: AppConfig::default(),
                path: Some(path),
                error: None,
            };
        }
        match AppConfig::load_from(&path) {
            Ok(config) => Self {
                config,
                path: Some(path),
                error: None,
            },
            Err(e) => Self {
                config: AppConfig::default(),
                path: Some(path),
                error: Some(e),
            },
        }
    }

    /// Where the config may be written on exit. `None` when the file on disk
    /// could not be used, so it is never overwritten.
    pub fn save_path(&self) -> Option<PathBuf> {
        match self.error {
            Some(_) => None,
            None => self.path.clone(),
        }
    }
}

impl AppConfig {
    /// Write back to `path` on exit. Returns `false` when there is nowhere to write.
    pub fn save_on_exit(&self, path: Option<&Path>) -> Result<bool, ConfigError> {
        match path {
            Some(path) => self.save_to(path).map(|()| true),
            None => Ok(false),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config file version {found} is newer than the supported version {supported}")]
    TooNew { found: u32, supported: u32 },

    #[error("config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("no config directory for this user")]
    NoConfigDir,
}
