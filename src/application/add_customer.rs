//! Add customer use case

use crate::domain::{Customer, RecordStore};
use crate::error::Result;
use crate::infrastructure::{Config, WorkspaceRepository};

/// Raw form input for one survey response
#[derive(Debug, Clone)]
pub struct AddCustomerRequest {
    pub email: String,
    pub flag: String,
    pub number: String,
}

/// Service for recording new survey responses
pub struct AddCustomerService {
    repository: WorkspaceRepository,
    config: Config,
}

impl AddCustomerService {
    pub fn new(repository: WorkspaceRepository, config: Config) -> Self {
        AddCustomerService { repository, config }
    }

    /// Validate the request, then add it to the configured backend.
    ///
    /// Input is validated before any storage is touched, so malformed
    /// requests never load or write data.
    pub fn execute(&self, request: &AddCustomerRequest) -> Result<Customer> {
        let customer = Customer::parse(&request.email, &request.flag, &request.number)?;

        let mut store = RecordStore::open(self.repository.storage(&self.config)?)?;
        store.add(customer.clone())?;

        Ok(customer)
    }
}
