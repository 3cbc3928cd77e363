//! Configuration module
//!
//! Handles loading and saving mirrorview configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::input::ShortcutMods;
use crate::util::file;
use crate::window::{WindowFlags, WindowParams};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Path error: {0}")]
    Path(#[from] file::FileError),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// File name looked up next to the executable and in the current directory
pub const CONFIG_FILE_NAME: &str = "mirrorview.toml";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Window settings
    #[serde(default)]
    pub window: WindowConfig,

    /// Input settings
    #[serde(default)]
    pub input: InputConfig,
}

/// General configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging
    #[serde(default)]
    pub verbose: bool,
    /// Log file path (optional, `~` and `$VAR` are expanded)
    pub log_file: Option<String>,
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    /// Horizontal position (platform default if not set)
    pub x: Option<i32>,
    /// Vertical position (platform default if not set)
    pub y: Option<i32>,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_true")]
    pub resizable: bool,
    #[serde(default)]
    pub borderless: bool,
    #[serde(default)]
    pub always_on_top: bool,
    #[serde(default)]
    pub fullscreen: bool,
}

fn default_title() -> String {
    "mirrorview".to_string()
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_true() -> bool {
    true
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            x: None,
            y: None,
            width: default_width(),
            height: default_height(),
            resizable: default_true(),
            borderless: false,
            always_on_top: false,
            fullscreen: false,
        }
    }
}

impl WindowConfig {
    pub fn flags(&self) -> WindowFlags {
        let mut flags = WindowFlags::empty();
        flags.set(WindowFlags::RESIZABLE, self.resizable);
        flags.set(WindowFlags::BORDERLESS, self.borderless);
        flags.set(WindowFlags::ALWAYS_ON_TOP, self.always_on_top);
        flags.set(WindowFlags::FULLSCREEN, self.fullscreen);
        flags
    }

    pub fn params(&self) -> WindowParams {
        WindowParams {
            title: self.title.clone(),
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            flags: self.flags(),
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Capture the mouse in relative mode on click
    #[serde(default = "default_true")]
    pub mouse_capture: bool,
    /// Modifier keys used as shortcut and capture toggle (e.g., "lalt,lsuper")
    #[serde(default)]
    pub shortcut_mod: ShortcutMods,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_capture: default_true(),
            shortcut_mod: ShortcutMods::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Paths searched by [`Config::load_default`], in order
    pub fn search_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("mirrorview/config.toml")),
            file::local_path(CONFIG_FILE_NAME).ok(),
            Some(PathBuf::from(".").join(CONFIG_FILE_NAME)),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load configuration from the default location
    pub fn load_default() -> ConfigResult<Self> {
        for path in Self::search_paths() {
            if file::is_regular(&path) {
                tracing::debug!("Loading configuration from {}", path.display());
                return Self::load(&path);
            }
        }

        // Return default config if no file found
        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            file::mkdirs(parent)?;
        }

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Expanded log file path, if one is configured
    pub fn log_file(&self) -> ConfigResult<Option<PathBuf>> {
        match &self.general.log_file {
            Some(path) => Ok(Some(file::expand_path(path)?)),
            None => Ok(None),
        }
    }
}

/// Generate a sample configuration file
pub fn generate_sample_config() -> ConfigResult<String> {
    let config = Config {
        general: GeneralConfig {
            verbose: false,
            log_file: Some("~/.local/state/mirrorview/mirrorview.log".to_string()),
        },
        window: WindowConfig {
            title: "Pixel 7".to_string(),
            x: Some(100),
            y: Some(100),
            ..Default::default()
        },
        input: InputConfig {
            mouse_capture: true,
            shortcut_mod: ShortcutMods::LCTRL,
        },
    };

    Ok(toml::to_string_pretty(&config)?)
}
