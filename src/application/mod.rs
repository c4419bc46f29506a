//! Application layer - Use cases and orchestration

pub mod add_customer;
pub mod export;
pub mod init;
pub mod list_customers;
pub mod manage_config;

pub use add_customer::{AddCustomerRequest, AddCustomerService};
pub use export::{ExportService, ExportSummary};
pub use list_customers::list_customers;
pub use manage_config::ConfigService;
