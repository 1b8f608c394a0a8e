//! Configuration loading for the magic lamp effect.
//!
//! The configuration file supports JSONC format (JSON with comments). Both
//! single-line (`//`) and multi-line (`/* */`) comments are allowed.
//!
//! The effect reads its configuration once at construction and again
//! whenever the host delivers a reconfigure signal. A missing file means
//! defaults; a broken file means defaults plus a warning. Loading never
//! fails the effect.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

pub use types::{EffectConfig, ShapeCurve};

use crate::error::EffectError;

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Directory name under the user configuration root.
const CONFIG_DIR_NAME: &str = "magiclamp";

/// Returns the possible configuration file paths in priority order.
///
/// The function checks the following locations (both `.jsonc` and `.json`
/// variants):
/// 1. `$XDG_CONFIG_HOME/magiclamp/` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/magiclamp/`
/// 3. the platform configuration directory reported by `dirs`
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        let dir = PathBuf::from(xdg_config).join(CONFIG_DIR_NAME);
        for filename in CONFIG_FILE_NAMES {
            paths.push(dir.join(filename));
        }
    }

    if let Some(home) = dirs::home_dir() {
        let dir = home.join(".config").join(CONFIG_DIR_NAME);
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            // XDG_CONFIG_HOME might already point at ~/.config
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let dir = config_dir.join(CONFIG_DIR_NAME);
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    paths
}

/// Loads the configuration from the first available config file.
///
/// # Errors
///
/// Returns [`EffectError::ConfigNotFound`] if no configuration file exists in
/// any of the expected locations, [`EffectError::ConfigIo`] if a file exists
/// but could not be read, and [`EffectError::ConfigParse`] if it contains
/// invalid JSON.
pub fn load_config() -> Result<(EffectConfig, PathBuf), EffectError> {
    for path in config_paths() {
        if path.exists() {
            let config = load_config_from_path(&path)?;
            return Ok((config, path));
        }
    }

    Err(EffectError::ConfigNotFound)
}

/// Loads the configuration from a specific file.
///
/// # Errors
///
/// Returns [`EffectError::ConfigIo`] if the file could not be read and
/// [`EffectError::ConfigParse`] if it contains invalid JSON.
pub fn load_config_from_path(path: &Path) -> Result<EffectConfig, EffectError> {
    let file = fs::File::open(path)?;
    // Strip comments from JSONC before parsing
    let reader = json_comments::StripComments::new(file);
    let config: EffectConfig = serde_json::from_reader(reader)?;
    Ok(config)
}

/// Loads the configuration, falling back to defaults when no file exists or
/// the file cannot be used.
#[must_use]
pub fn load_or_default() -> EffectConfig {
    match load_config() {
        Ok((config, path)) => {
            tracing::debug!(path = %path.display(), "magic-lamp: loaded configuration");
            config
        }
        Err(EffectError::ConfigNotFound) => EffectConfig::default(),
        Err(err) => {
            tracing::warn!(
                error = %err,
                "magic-lamp: failed to load configuration, using defaults"
            );
            EffectConfig::default()
        }
    }
}
