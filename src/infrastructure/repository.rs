//! Survey workspace repository

use crate::error::{Result, SurveyError};
use crate::infrastructure::config::{Config, SURVEY_DIR};
use crate::infrastructure::storage::{open_storage, CustomerStorage};
use std::fs;
use std::path::{Path, PathBuf};

/// Abstract repository for workspace operations
pub trait SurveyRepository {
    /// Get the root directory of this workspace
    fn root(&self) -> &Path;

    /// Load configuration from .survey/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .survey/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .survey directory exists
    fn is_initialized(&self) -> bool;

    /// Create .survey directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of SurveyRepository
#[derive(Debug, Clone)]
pub struct WorkspaceRepository {
    pub root: PathBuf,
}

impl WorkspaceRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        WorkspaceRepository { root }
    }

    /// Discover workspace root by walking up from current directory
    /// First checks SURVEY_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("SURVEY_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_survey_dir(&path) {
                return Ok(WorkspaceRepository::new(fs::canonicalize(&path)?));
            } else {
                return Err(SurveyError::Config(format!(
                    "SURVEY_ROOT is set to '{}' but no .survey directory found. \
                    Run 'survey init' in that directory or unset SURVEY_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover workspace root by walking up from a specific starting directory
    ///
    /// The returned root is canonical, so paths derived from it are absolute.
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = fs::canonicalize(start)?;

        loop {
            if Self::has_survey_dir(&current) {
                return Ok(WorkspaceRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(SurveyError::NotSurveyDirectory(start.to_path_buf())),
            }
        }
    }

    fn has_survey_dir(path: &Path) -> bool {
        path.join(SURVEY_DIR).is_dir()
    }

    /// Directory that holds rotated log files
    pub fn log_dir(&self) -> PathBuf {
        self.root.join(SURVEY_DIR).join("logs")
    }

    /// Storage adapter for the backend and data file in effect
    pub fn storage(&self, config: &Config) -> Result<Box<dyn CustomerStorage>> {
        let config = config.effective()?;
        Ok(open_storage(config.backend, config.data_path(&self.root)))
    }
}

impl SurveyRepository for WorkspaceRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_survey_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let survey_dir = self.root.join(SURVEY_DIR);

        if survey_dir.exists() {
            return Err(SurveyError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&survey_dir)?;
        Ok(())
    }
}
