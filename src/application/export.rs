//! Export use case

use crate::domain::{BackendKind, RecordStore};
use crate::error::{Result, SurveyError};
use crate::infrastructure::{open_storage, Config, SurveyRepository, WorkspaceRepository};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Outcome of an export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub records: usize,
}

/// Service for writing all records to a standalone file
pub struct ExportService {
    repository: WorkspaceRepository,
    config: Config,
}

impl ExportService {
    pub fn new(repository: WorkspaceRepository, config: Config) -> Self {
        ExportService { repository, config }
    }

    /// Write every record to `output` (default: the format's default file in
    /// the workspace root) in `format`, replacing any existing content.
    pub fn execute(&self, format: BackendKind, output: Option<&Path>) -> Result<ExportSummary> {
        if !format.is_exportable() {
            return Err(SurveyError::Config(format!(
                "Cannot export to '{}'. Export formats are: csv, sqlite",
                format
            )));
        }

        let store = RecordStore::open(self.repository.storage(&self.config)?)?;

        let requested = match output {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => std::env::current_dir()?.join(path),
            None => self.repository.root().join(format.default_data_file()),
        };
        let path = normalize_path(&requested);

        // The live data file may only be rewritten in its own format.
        let live = self.config.effective()?;
        let source = normalize_path(&live.data_path(self.repository.root()));
        if path == source && format != live.backend {
            return Err(SurveyError::Config(format!(
                "Refusing to overwrite the workspace data file: {}",
                path.display()
            )));
        }

        let records = store.export_to(open_storage(format, path.clone()).as_ref())?;
        Ok(ExportSummary { path, records })
    }
}

/// Absolute path with `.`/`..` folded and symlinks resolved as far as the
/// path exists
fn normalize_path(path: &Path) -> PathBuf {
    let mut lexical = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                lexical.pop();
            }
            other => lexical.push(other.as_os_str()),
        }
    }

    if let Ok(canonical) = fs::canonicalize(&lexical) {
        return canonical;
    }
    if let (Some(parent), Some(name)) = (lexical.parent(), lexical.file_name()) {
        if let Ok(parent) = fs::canonicalize(parent) {
            return parent.join(name);
        }
    }
    lexical
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::init::init;
    use crate::domain::Customer;
    use crate::infrastructure::CustomerStorage;
    use tempfile::TempDir;

    fn seeded_workspace(backend: BackendKind) -> (TempDir, ExportService) {
        let temp = TempDir::new().unwrap();
        let config = init(temp.path(), backend, None).unwrap();
        open_storage(backend, config.data_path(temp.path()))
            .save(&[
                Customer::new("a@x.com", true, 7),
                Customer::new("b@x.com", false, 2),
            ])
            .unwrap();
        let service = ExportService::new(
            WorkspaceRepository::new(temp.path().to_path_buf()),
            config,
        );
        (temp, service)
    }

    #[test]
    fn test_export_document_workspace_to_csv() {
        let (temp, service) = seeded_workspace(BackendKind::Document);

        let summary = service.execute(BackendKind::Csv, None).unwrap();

        assert_eq!(summary.records, 2);
        assert_eq!(
            summary.path,
            fs::canonicalize(temp.path()).unwrap().join("customer_data.csv")
        );
        let exported = open_storage(BackendKind::Csv, summary.path).load().unwrap();
        assert_eq!(exported.len(), 2);
    }

    #[test]
    fn test_export_csv_workspace_to_sqlite_path() {
        let (temp, service) = seeded_workspace(BackendKind::Csv);
        let output = temp.path().join("out").join("copy.db");

        let summary = service.execute(BackendKind::Sqlite, Some(&output)).unwrap();

        assert_eq!(
            summary.path,
            fs::canonicalize(temp.path()).unwrap().join("out").join("copy.db")
        );
        let exported = open_storage(BackendKind::Sqlite, output).load().unwrap();
        assert_eq!(exported[1], Customer::new("b@x.com", false, 2));
    }

    #[test]
    fn test_export_to_document_is_rejected() {
        let (_temp, service) = seeded_workspace(BackendKind::Csv);
        assert!(matches!(
            service.execute(BackendKind::Document, None),
            Err(SurveyError::Config(_))
        ));
    }

    #[test]
    fn test_export_refuses_to_clobber_live_data_in_other_format() {
        let (temp, service) = seeded_workspace(BackendKind::Csv);
        let live = temp.path().join("customer_data.csv");

        assert!(service.execute(BackendKind::Sqlite, Some(&live)).is_err());
        assert_eq!(
            open_storage(BackendKind::Csv, live).load().unwrap().len(),
            2
        );
    }

    #[test]
    fn test_export_refuses_live_data_through_parent_spelling() {
        let (temp, service) = seeded_workspace(BackendKind::Csv);
        let spelled = temp
            .path()
            .join("missing")
            .join("..")
            .join(".")
            .join("customer_data.csv");

        assert!(matches!(
            service.execute(BackendKind::Sqlite, Some(&spelled)),
            Err(SurveyError::Config(_))
        ));
        assert_eq!(
            open_storage(BackendKind::Csv, temp.path().join("customer_data.csv"))
                .load()
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn test_normalize_path_folds_dots() {
        let temp = TempDir::new().unwrap();
        let root = fs::canonicalize(temp.path()).unwrap();

        assert_eq!(
            normalize_path(&root.join("a").join("..").join("b.csv")),
            root.join("b.csv")
        );
        assert_eq!(normalize_path(&root.join(".").join("c.db")), root.join("c.db"));
    }
}
