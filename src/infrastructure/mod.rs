//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod repository;
pub mod storage;

pub use config::Config;
pub use repository::{SurveyRepository, WorkspaceRepository};
pub use storage::{open_storage, CsvStorage, CustomerStorage, DocumentStorage, SqliteStorage};
