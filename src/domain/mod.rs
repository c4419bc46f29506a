//! Domain layer - Customer records and the record store

pub mod backend;
pub mod customer;
pub mod record_store;

pub use backend::BackendKind;
pub use customer::Customer;
pub use record_store::RecordStore;
