//! In-memory record store backed by a storage adapter

use crate::domain::Customer;
use crate::error::{Result, SurveyError};
use crate::infrastructure::storage::CustomerStorage;
use log::{info, warn};
use std::collections::HashSet;

/// Owns the in-process customer list and keeps it in sync with storage.
///
/// Every successful `add` writes the full list back through the adapter, so
/// the backing store always mirrors `list()` after a mutation.
pub struct RecordStore {
    storage: Box<dyn CustomerStorage>,
    customers: Vec<Customer>,
}

impl RecordStore {
    /// Load all records from `storage` into memory.
    ///
    /// Stored data that repeats an email keeps only its first occurrence;
    /// the next save writes the deduplicated list back.
    pub fn open(storage: Box<dyn CustomerStorage>) -> Result<Self> {
        let customers = dedup_by_email(storage.load()?);
        info!(
            "event=store_open module=store status=ok backend={} records={}",
            storage.kind(),
            customers.len()
        );
        Ok(RecordStore { storage, customers })
    }

    /// Append a new customer and persist.
    ///
    /// Rejects with `DuplicateKey` when the email is already recorded; the
    /// store is left untouched in that case and when the save fails.
    pub fn add(&mut self, customer: Customer) -> Result<()> {
        if self.contains(&customer.email) {
            warn!("event=customer_add module=store status=rejected reason=duplicate_key");
            return Err(SurveyError::DuplicateKey(customer.email));
        }

        self.customers.push(customer);
        if let Err(err) = self.storage.save(&self.customers) {
            self.customers.pop();
            return Err(err);
        }

        info!(
            "event=customer_add module=store status=ok backend={} records={}",
            self.storage.kind(),
            self.customers.len()
        );
        Ok(())
    }

    /// Current records in insertion order
    pub fn list(&self) -> &[Customer] {
        &self.customers
    }

    pub fn contains(&self, email: &str) -> bool {
        self.customers.iter().any(|c| c.email == email)
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Write the current records to another backend (full replace)
    pub fn export_to(&self, target: &dyn CustomerStorage) -> Result<usize> {
        target.save(&self.customers)?;
        info!(
            "event=export module=store status=ok backend={} records={}",
            target.kind(),
            self.customers.len()
        );
        Ok(self.customers.len())
    }
}

fn dedup_by_email(customers: Vec<Customer>) -> Vec<Customer> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(customers.len());
    for customer in customers {
        if seen.insert(customer.email.clone()) {
            unique.push(customer);
        } else {
            warn!(
                "event=store_open module=store status=duplicate_dropped email={}",
                customer.email
            );
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BackendKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Storage double recording every save and optionally failing them
    #[derive(Clone, Default)]
    struct MemoryStorage {
        saved: Rc<RefCell<Vec<Customer>>>,
        saves: Rc<RefCell<usize>>,
        fail_saves: bool,
    }

    impl CustomerStorage for MemoryStorage {
        fn kind(&self) -> BackendKind {
            BackendKind::Csv
        }

        fn load(&self) -> Result<Vec<Customer>> {
            Ok(self.saved.borrow().clone())
        }

        fn save(&self, records: &[Customer]) -> Result<()> {
            if self.fail_saves {
                return Err(SurveyError::Storage("disk full".to_string()));
            }
            *self.saves.borrow_mut() += 1;
            *self.saved.borrow_mut() = records.to_vec();
            Ok(())
        }
    }

    #[test]
    fn test_add_then_list() {
        let storage = MemoryStorage::default();
        let mut store = RecordStore::open(Box::new(storage.clone())).unwrap();
        assert!(store.is_empty());

        store.add(Customer::new("a@x.com", true, 7)).unwrap();

        assert_eq!(store.list(), &[Customer::new("a@x.com", true, 7)]);
        assert_eq!(*storage.saved.borrow(), vec![Customer::new("a@x.com", true, 7)]);
    }

    #[test]
    fn test_duplicate_rejected_without_mutation() {
        let storage = MemoryStorage::default();
        let mut store = RecordStore::open(Box::new(storage.clone())).unwrap();
        store.add(Customer::new("a@x.com", true, 7)).unwrap();

        let err = store.add(Customer::new("a@x.com", false, 2)).unwrap_err();

        match err {
            SurveyError::DuplicateKey(email) => assert_eq!(email, "a@x.com"),
            other => panic!("Expected DuplicateKey, got {other:?}"),
        }
        assert_eq!(store.list(), &[Customer::new("a@x.com", true, 7)]);
        assert_eq!(*storage.saves.borrow(), 1);
    }

    #[test]
    fn test_every_add_persists_full_list() {
        let storage = MemoryStorage::default();
        let mut store = RecordStore::open(Box::new(storage.clone())).unwrap();

        store.add(Customer::new("a@x.com", true, 1)).unwrap();
        store.add(Customer::new("b@x.com", false, 2)).unwrap();

        assert_eq!(*storage.saves.borrow(), 2);
        assert_eq!(storage.saved.borrow().len(), 2);
        assert_eq!(storage.saved.borrow()[1].email, "b@x.com");
    }

    #[test]
    fn test_open_loads_existing_records() {
        let storage = MemoryStorage::default();
        storage
            .saved
            .borrow_mut()
            .push(Customer::new("seed@x.com", false, 3));

        let store = RecordStore::open(Box::new(storage)).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.contains("seed@x.com"));
    }

    #[test]
    fn test_open_drops_stored_duplicates_keeping_first() {
        let storage = MemoryStorage::default();
        storage.saved.borrow_mut().extend([
            Customer::new("a@x.com", true, 7),
            Customer::new("b@x.com", false, 1),
            Customer::new("a@x.com", true, 7),
            Customer::new("a@x.com", false, 9),
        ]);

        let mut store = RecordStore::open(Box::new(storage.clone())).unwrap();
        assert_eq!(
            store.list(),
            &[
                Customer::new("a@x.com", true, 7),
                Customer::new("b@x.com", false, 1),
            ]
        );

        store.add(Customer::new("c@x.com", true, 3)).unwrap();
        let emails: Vec<String> = storage
            .saved
            .borrow()
            .iter()
            .map(|c| c.email.clone())
            .collect();
        assert_eq!(emails, vec!["a@x.com", "b@x.com", "c@x.com"]);
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let storage = MemoryStorage {
            fail_saves: true,
            ..Default::default()
        };
        let mut store = RecordStore::open(Box::new(storage)).unwrap();

        assert!(store.add(Customer::new("a@x.com", true, 7)).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_email_comparison_is_exact() {
        let mut store = RecordStore::open(Box::new(MemoryStorage::default())).unwrap();
        store.add(Customer::new("a@x.com", true, 7)).unwrap();
        store.add(Customer::new("A@x.com", true, 7)).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_export_to_other_storage() {
        let mut store = RecordStore::open(Box::new(MemoryStorage::default())).unwrap();
        store.add(Customer::new("a@x.com", true, 7)).unwrap();

        let target = MemoryStorage::default();
        let written = store.export_to(&target).unwrap();

        assert_eq!(written, 1);
        assert_eq!(*target.saved.borrow(), store.list().to_vec());
    }
}
