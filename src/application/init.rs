//! Initialize workspace use case

use crate::domain::BackendKind;
use crate::error::Result;
use crate::infrastructure::{Config, SurveyRepository, WorkspaceRepository};
use log::info;
use std::fs;
use std::path::Path;

/// Initialize a new survey workspace at the specified path.
///
/// Writes `.survey/config.toml` selecting `backend`; `data_file` overrides
/// the backend's default data file name.
pub fn init(path: &Path, backend: BackendKind, data_file: Option<&str>) -> Result<Config> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = WorkspaceRepository::new(path.to_path_buf());
    repo.initialize()?;

    let mut config = Config::new(backend);
    if let Some(data_file) = data_file {
        config.data_file = data_file.to_string();
    }
    repo.save_config(&config)?;

    info!(
        "event=workspace_init module=app status=ok backend={}",
        config.backend
    );
    Ok(config)
}
