//! Config management use case

use crate::domain::BackendKind;
use crate::error::{Result, SurveyError};
use crate::infrastructure::{Config, SurveyRepository, WorkspaceRepository};
use std::str::FromStr;

const VALID_KEYS: &str = "backend, data_file, log_level";

/// Service for managing workspace configuration
pub struct ConfigService {
    repository: WorkspaceRepository,
    config: Config,
}

impl ConfigService {
    /// Create a new config service over an already loaded config
    pub fn new(repository: WorkspaceRepository, config: Config) -> Self {
        ConfigService { repository, config }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = &self.config;

        match key {
            "backend" => Ok(config.backend.to_string()),
            "data_file" => Ok(config.data_file.clone()),
            "log_level" => Ok(config.log_level.clone().unwrap_or_default()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(SurveyError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: {}",
                key, VALID_KEYS
            ))),
        }
    }

    /// Set a config value
    ///
    /// Switching backends does not migrate existing records; the data file is
    /// reset to the new backend's default unless it was customized.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut config = self.config.clone();

        match key {
            "backend" => {
                let backend = BackendKind::from_str(value).map_err(SurveyError::Config)?;
                if config.data_file == config.backend.default_data_file() {
                    config.data_file = backend.default_data_file().to_string();
                }
                config.backend = backend;
            }
            "data_file" => {
                if value.trim().is_empty() {
                    return Err(SurveyError::Config(
                        "data_file cannot be empty".to_string(),
                    ));
                }
                config.data_file = value.trim().to_string();
            }
            "log_level" => {
                config.log_level = match value.trim() {
                    "" => None,
                    level => Some(level.to_lowercase()),
                };
            }
            "created" => {
                return Err(SurveyError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(SurveyError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: {}",
                    key, VALID_KEYS
                )));
            }
        }

        self.repository.save_config(&config)?;
        self.config = config;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> &Config {
        &self.config
    }
}
