//! Error types for survey

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the survey application
#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("Not a survey directory: {0}")]
    NotSurveyDirectory(PathBuf),

    #[error("Duplicate email: {0}")]
    DuplicateKey(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl SurveyError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SurveyError::NotSurveyDirectory(_) => 2,
            SurveyError::DuplicateKey(_) => 3,
            SurveyError::Validation(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            SurveyError::NotSurveyDirectory(path) => {
                format!(
                    "Not a survey directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'survey init' in this directory to create a workspace\n\
                    • Navigate to an existing survey directory\n\
                    • Set SURVEY_ROOT environment variable to your workspace path",
                    path.display()
                )
            }
            SurveyError::DuplicateKey(email) => {
                format!(
                    "Duplicate email found: '{}'\n\n\
                    Each customer is keyed by email and can only be recorded once.\n\
                    Use 'survey list' to see recorded customers.",
                    email
                )
            }
            SurveyError::Validation(msg) => {
                if msg.contains("flag") {
                    format!(
                        "Invalid input: {}\n\n\
                        Accepted flag values: true, false, yes, no, y, n, 1, 0\n\
                        Example: survey add ana@example.com true 7",
                        msg
                    )
                } else if msg.contains("number") {
                    format!(
                        "Invalid input: {}\n\n\
                        The favorite number must be a whole number (e.g., 7 or -12)\n\
                        Example: survey add ana@example.com true 7",
                        msg
                    )
                } else {
                    self.to_string()
                }
            }
            SurveyError::Config(msg) => {
                if msg.contains("Invalid backend") {
                    format!(
                        "{}\n\n\
                        Valid backends: csv, sqlite, document\n\
                        Example: survey config backend sqlite",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using SurveyError
pub type Result<T> = std::result::Result<T, SurveyError>;
