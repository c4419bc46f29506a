//! List customers use case

use crate::domain::{Customer, RecordStore};
use crate::error::Result;
use crate::infrastructure::{Config, WorkspaceRepository};

/// List every recorded customer in insertion order.
pub fn list_customers(
    repository: &WorkspaceRepository,
    config: &Config,
) -> Result<Vec<Customer>> {
    let store = RecordStore::open(repository.storage(config)?)?;
    Ok(store.list().to_vec())
}
