//! Settings file.
//!
//! Settings are read from `--config PATH` when given, otherwise from the
//! platform config directory (`settings.toml` under the `QC Lab` project
//! directory). Missing keys fall back to their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use qc_model::{OutlierOptions, ReportCleanup};
use serde::{Deserialize, Serialize};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "qc-lab";
const APP_NAME: &str = "QC Lab";
const CONFIG_FILENAME: &str = "settings.toml";

/// Persisted defaults for the CLI commands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub outliers: OutlierOptions,
    pub report: ReportCleanup,
}

/// Default settings path, `None` when the platform directory is unknown.
pub fn default_settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

impl Settings {
    /// Parse settings from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read settings {}", path.display()))?;
        let settings: Self = toml::from_str(&content)
            .with_context(|| format!("parse settings {}", path.display()))?;
        settings
            .outliers
            .validate()
            .with_context(|| format!("invalid outlier settings in {}", path.display()))?;
        Ok(settings)
    }

    /// Resolve settings for a run.
    ///
    /// An explicit path must exist and parse. The default file is optional:
    /// when it is missing or unreadable the built-in defaults are used.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        let Some(path) = default_settings_path() else {
            tracing::debug!("no platform config directory, using default settings");
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        match Self::load_from(&path) {
            Ok(settings) => {
                tracing::info!(path = %path.display(), "loaded settings");
                Ok(settings)
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), "{error:#}, using default settings");
                Ok(Self::default())
            }
        }
    }
}
