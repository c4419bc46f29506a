//! Configuration management

use crate::domain::BackendKind;
use crate::error::{Result, SurveyError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Name of the workspace metadata directory
pub const SURVEY_DIR: &str = ".survey";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub backend: BackendKind,
    /// Data file (or database directory), relative to the workspace root unless absolute
    pub data_file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    pub created: DateTime<Utc>,
}

impl Config {
    /// Create a new config using the backend's default data file
    pub fn new(backend: BackendKind) -> Self {
        Config {
            backend,
            data_file: backend.default_data_file().to_string(),
            log_level: None,
            created: Utc::now(),
        }
    }

    /// Load config from .survey/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(SURVEY_DIR).join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SurveyError::NotSurveyDirectory(path.to_path_buf())
            } else {
                SurveyError::Io(e)
            }
        })?;

        Ok(toml::from_str(&contents)?)
    }

    /// Save config to .survey/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let survey_dir = path.join(SURVEY_DIR);
        let config_path = survey_dir.join("config.toml");

        if !survey_dir.exists() {
            fs::create_dir(&survey_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Config actually in effect, honoring the SURVEY_BACKEND override
    pub fn effective(&self) -> Result<Config> {
        let value = std::env::var("SURVEY_BACKEND").ok();
        self.with_backend_override(value.as_deref())
    }

    /// Apply a backend override.
    ///
    /// The data file follows the override only while it is still the
    /// configured backend's default; a customized data file holds the
    /// configured format and cannot be reinterpreted.
    pub fn with_backend_override(&self, value: Option<&str>) -> Result<Config> {
        let backend = match value.map(str::trim) {
            Some(value) if !value.is_empty() => {
                BackendKind::from_str(value).map_err(SurveyError::Config)?
            }
            _ => return Ok(self.clone()),
        };
        if backend == self.backend {
            return Ok(self.clone());
        }
        if self.data_file != self.backend.default_data_file() {
            return Err(SurveyError::Config(format!(
                "SURVEY_BACKEND={} conflicts with data_file '{}', which holds {} data. \
                Unset SURVEY_BACKEND or change the backend with 'survey config backend'.",
                backend, self.data_file, self.backend
            )));
        }

        let mut config = self.clone();
        config.backend = backend;
        config.data_file = backend.default_data_file().to_string();
        Ok(config)
    }

    /// Resolve the data file against the workspace root
    pub fn data_path(&self, root: &Path) -> PathBuf {
        let data_file = Path::new(&self.data_file);
        if data_file.is_absolute() {
            data_file.to_path_buf()
        } else {
            root.join(data_file)
        }
    }

    /// Log level, checking SURVEY_LOG first
    pub fn get_log_level(&self) -> String {
        std::env::var("SURVEY_LOG")
            .ok()
            .filter(|level| !level.trim().is_empty())
            .or_else(|| self.log_level.clone())
            .unwrap_or_else(|| "info".to_string())
    }
}
