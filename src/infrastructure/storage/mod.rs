//! Storage adapters for customer records
//!
//! Each backend loads the whole collection into memory and writes it back in
//! full. A backing store that does not exist yet loads as an empty list.

pub mod csv;
pub mod document;
pub mod sqlite;

pub use self::csv::CsvStorage;
pub use document::DocumentStorage;
pub use sqlite::SqliteStorage;

use crate::domain::{BackendKind, Customer};
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Bulk load/save contract shared by every backend
pub trait CustomerStorage {
    /// Which backend this adapter writes to
    fn kind(&self) -> BackendKind;

    /// Load every stored record in stored order (empty if nothing exists yet)
    fn load(&self) -> Result<Vec<Customer>>;

    /// Replace the stored content with exactly `records`
    fn save(&self, records: &[Customer]) -> Result<()>;
}

/// Construct the adapter for `kind` rooted at `path`
pub fn open_storage(kind: BackendKind, path: impl Into<PathBuf>) -> Box<dyn CustomerStorage> {
    let path = path.into();
    match kind {
        BackendKind::Csv => Box::new(CsvStorage::new(path)),
        BackendKind::Sqlite => Box::new(SqliteStorage::new(path)),
        BackendKind::Document => Box::new(DocumentStorage::new(path)),
    }
}

/// Create the parent directory of `path` if it is missing
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
