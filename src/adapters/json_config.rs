//! JSON file adapter for [`ConfigPort`].
//!
//! Boiler characteristics are stored as a single pretty-printed JSON
//! document.  Values are validated on both load and save; an invalid file
//! is reported, never silently repaired.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::BoilerCharacteristics;
use crate::error::Error;

/// Characteristics stored in a JSON file at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigPort for JsonConfigStore {
    fn load(&self) -> Result<BoilerCharacteristics, ConfigError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound,
            _ => {
                warn!("JsonConfigStore: read {} failed: {e}", self.path.display());
                ConfigError::IoError
            }
        })?;
        let config: BoilerCharacteristics = serde_json::from_str(&text).map_err(|e| {
            warn!("JsonConfigStore: {} is not valid: {e}", self.path.display());
            ConfigError::Corrupted
        })?;
        config.validate().map_err(validation_error)?;
        info!(
            "JsonConfigStore: loaded {} pumps from {}",
            config.number_of_pumps(),
            self.path.display()
        );
        Ok(config)
    }

    fn save(&self, config: &BoilerCharacteristics) -> Result<(), ConfigError> {
        config.validate().map_err(validation_error)?;
        let text = serde_json::to_string_pretty(config).map_err(|_| ConfigError::IoError)?;
        std::fs::write(&self.path, text).map_err(|e| {
            warn!("JsonConfigStore: write {} failed: {e}", self.path.display());
            ConfigError::IoError
        })?;
        info!("JsonConfigStore: saved to {}", self.path.display());
        Ok(())
    }
}

fn validation_error(err: Error) -> ConfigError {
    match err {
        Error::Config(msg) => ConfigError::ValidationFailed(msg),
        _ => ConfigError::ValidationFailed("invalid characteristics"),
    }
}
