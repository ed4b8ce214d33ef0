//! User settings stored as TOML in the platform config directory.
//!
//! - macOS: ~/Library/Application Support/org.ecrf-mapper.eCRF Mapper/
//! - Windows: %APPDATA%/ecrf-mapper/eCRF Mapper/config/
//! - Linux: ~/.config/ecrf-mapper/
//!
//! Command-line flags always win over values from this file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use ecrf_core::ExportPolicy;

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "ecrf-mapper";
const APP_NAME: &str = "eCRF Mapper";
const CONFIG_FILENAME: &str = "settings.toml";

/// Persisted defaults for the `map` and `studies` commands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// CSV delimiter used when `--delimiter` is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,
    /// Study selected when `--study` is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_study: Option<String>,
    /// Catalog file replacing the built-in one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
    pub export_policy: ExportPolicy,
    /// Apply the study's value corrections on export.
    pub correct_values: bool,
    /// Directory for timestamped exports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

/// Get the path to the settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings.
///
/// An explicit path must exist and parse. Without one, the platform file is
/// used when present and any problem with it falls back to defaults.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        return read_settings(path);
    }

    let Some(path) = settings_path() else {
        tracing::warn!("could not determine settings path, using defaults");
        return Ok(Settings::default());
    };

    match fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::info!(path = %path.display(), "loaded settings");
                Ok(settings)
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "invalid settings file, using defaults");
                Ok(Settings::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Ok(Settings::default())
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "unreadable settings file, using defaults");
            Ok(Settings::default())
        }
    }
}

fn read_settings(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read settings file {}", path.display()))?;
    let settings = toml::from_str(&content)
        .with_context(|| format!("parse settings file {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded settings");
    Ok(settings)
}
