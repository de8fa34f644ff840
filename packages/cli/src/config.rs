//! Settings file holding the persisted backend properties.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::CliError;

pub const CONFIG_ENV: &str = "HUBIC_CONFIG";

/// Location of the settings file: `--config`, then `$HUBIC_CONFIG`, then
/// `<config dir>/hubic/settings.json`.
pub fn resolve_path(explicit: Option<PathBuf>) -> Result<PathBuf, CliError> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|dir| dir.join("hubic").join("settings.json"))
        .ok_or(CliError::NoConfigDir)
}

/// A JSON object of property id to value.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored properties; a missing file holds none.
    pub fn load(&self) -> Result<BTreeMap<String, String>, CliError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no config file yet");
                return Ok(BTreeMap::new());
            }
            Err(source) => {
                return Err(CliError::Config {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&text).map_err(|source| CliError::ConfigFormat {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, values: &BTreeMap<String, String>) -> Result<(), CliError> {
        let io_error = |source| CliError::Config {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }

        let text = serde_json::to_string_pretty(values).map_err(|source| CliError::ConfigFormat {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, text).map_err(io_error)?;

        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }
}
