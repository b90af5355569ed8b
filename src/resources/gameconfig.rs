//! Game configuration resource.
//!
//! Settings loaded from an INI configuration file. Missing files and missing
//! keys fall back to safe defaults.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 736
//! fullscreen = false
//! vsync = true
//! target_fps = 60
//!
//! [game]
//! seed = 1234
//!
//! [assets]
//! dir = ./assets
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 736;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_FULLSCREEN: bool = false;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";
const DEFAULT_ASSETS_DIR: &str = "./assets";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config file {path:?}: {reason}")]
    Load { path: PathBuf, reason: String },
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("invalid value for [{section}] {key}: {reason}")]
    Value {
        section: &'static str,
        key: &'static str,
        reason: String,
    },
}

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second. One simulation tick runs per frame.
    pub target_fps: u32,
    pub vsync: bool,
    pub fullscreen: bool,
    /// Seed for the gameplay RNG. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Root of the image/sound/level asset tree.
    pub assets_dir: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            fullscreen: DEFAULT_FULLSCREEN,
            seed: None,
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file at `config_path`.
    ///
    /// Missing values retain their current values.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config.load(&self.config_path).map_err(|reason| ConfigError::Load {
            path: self.config_path.clone(),
            reason,
        })?;
        self.apply(&config)
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(ConfigError::Parse)?;
        self.apply(&config)
    }

    /// Like [`GameConfig::load_from_file`], but a missing file keeps the defaults.
    pub fn load_or_default(&mut self) -> Result<(), ConfigError> {
        if !self.config_path.exists() {
            info!(
                "No config file at {:?}, using defaults",
                self.config_path
            );
            return Ok(());
        }
        self.load_from_file()
    }

    fn apply(&mut self, config: &Ini) -> Result<(), ConfigError> {
        // [window] section
        if let Some(width) = uint(config, "window", "width")? {
            self.window_width = width as u32;
        }
        if let Some(height) = uint(config, "window", "height")? {
            self.window_height = height as u32;
        }
        if let Some(fps) = uint(config, "window", "target_fps")? {
            if fps == 0 {
                return Err(ConfigError::Value {
                    section: "window",
                    key: "target_fps",
                    reason: "must be positive".to_string(),
                });
            }
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = boolean(config, "window", "vsync")? {
            self.vsync = vsync;
        }
        if let Some(fullscreen) = boolean(config, "window", "fullscreen")? {
            self.fullscreen = fullscreen;
        }

        // [game] section
        if let Some(seed) = uint(config, "game", "seed")? {
            self.seed = Some(seed);
        }

        // [assets] section
        if let Some(dir) = config.get("assets", "dir") {
            self.assets_dir = PathBuf::from(dir);
        }

        info!(
            "Loaded config: {}x{} window, fps={}, vsync={}, fullscreen={}, seed={:?}, assets={:?}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.fullscreen,
            self.seed,
            self.assets_dir
        );

        Ok(())
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

fn uint(config: &Ini, section: &'static str, key: &'static str) -> Result<Option<u64>, ConfigError> {
    config
        .getuint(section, key)
        .map_err(|reason| ConfigError::Value {
            section,
            key,
            reason,
        })
}

fn boolean(
    config: &Ini,
    section: &'static str,
    key: &'static str,
) -> Result<Option<bool>, ConfigError> {
    config
        .getbool(section, key)
        .map_err(|reason| ConfigError::Value {
            section,
            key,
            reason,
        })
}
