//! Platform-specific location of the settings file.
//!
//! - Linux: `~/.config/tonekit/settings.toml`
//! - macOS: `~/Library/Application Support/tonekit/settings.toml`
//! - Windows: `%APPDATA%\tonekit\settings.toml`

use crate::error::ConfigError;
use crate::settings::Settings;
use std::path::{Path, PathBuf};

/// Application name used for directory paths.
const APP_NAME: &str = "tonekit";

/// Settings file name inside the config directory.
const SETTINGS_FILE: &str = "settings.toml";

/// Returns the user-specific configuration directory.
///
/// Falls back to `./tonekit` if the platform config directory cannot be
/// determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the path of the user settings file.
pub fn settings_path() -> PathBuf {
    user_config_dir().join(SETTINGS_FILE)
}

/// Creates the user config directory if it does not exist.
pub fn ensure_user_config_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_config_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// Loads settings from `explicit` if given, else from the user settings file.
///
/// An explicit path must exist. A missing user settings file yields
/// [`Settings::default`].
pub fn load_or_default(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    match explicit {
        Some(path) => Settings::load(path),
        None => load_if_exists(&settings_path()),
    }
}

fn load_if_exists(path: &Path) -> Result<Settings, ConfigError> {
    if path.exists() {
        Settings::load(path)
    } else {
        Ok(Settings::default())
    }
}
