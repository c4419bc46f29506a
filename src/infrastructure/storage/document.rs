//! Document collection storage
//!
//! A database is a directory; the `customers` collection inside it is a
//! JSON-lines file holding one document per record.

use super::CustomerStorage;
use crate::domain::{BackendKind, Customer};
use crate::error::{Result, SurveyError};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File name of the customers collection inside the database directory
pub const COLLECTION_FILE: &str = "customers.jsonl";

#[derive(Debug, Serialize, Deserialize)]
struct CustomerDocument {
    email: String,
    boolean_value: bool,
    favorite_number: i64,
}

impl From<&Customer> for CustomerDocument {
    fn from(customer: &Customer) -> Self {
        CustomerDocument {
            email: customer.email.clone(),
            boolean_value: customer.flag,
            favorite_number: customer.number,
        }
    }
}

impl From<CustomerDocument> for Customer {
    fn from(doc: CustomerDocument) -> Self {
        Customer::new(doc.email, doc.boolean_value, doc.favorite_number)
    }
}

/// Customer storage as a document collection
#[derive(Debug, Clone)]
pub struct DocumentStorage {
    database_dir: PathBuf,
}

impl DocumentStorage {
    pub fn new(database_dir: PathBuf) -> Self {
        DocumentStorage { database_dir }
    }

    /// Path of the collection file
    pub fn collection_path(&self) -> PathBuf {
        self.database_dir.join(COLLECTION_FILE)
    }

    pub fn database_dir(&self) -> &Path {
        &self.database_dir
    }
}

impl CustomerStorage for DocumentStorage {
    fn kind(&self) -> BackendKind {
        BackendKind::Document
    }

    fn load(&self) -> Result<Vec<Customer>> {
        let path = self.collection_path();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("event=document_load module=storage status=missing");
                return Ok(Vec::new());
            }
            Err(e) => return Err(SurveyError::Io(e)),
        };

        let mut customers = Vec::new();
        for (idx, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let doc: CustomerDocument = serde_json::from_str(line).map_err(|e| {
                SurveyError::Storage(format!("{}: line {}: {}", path.display(), idx + 1, e))
            })?;
            customers.push(doc.into());
        }

        info!(
            "event=document_load module=storage status=ok records={}",
            customers.len()
        );
        Ok(customers)
    }

    fn save(&self, records: &[Customer]) -> Result<()> {
        fs::create_dir_all(&self.database_dir)?;

        let mut contents = String::new();
        for customer in records {
            contents.push_str(&serde_json::to_string(&CustomerDocument::from(customer))?);
            contents.push('\n');
        }

        // Write beside the collection, then swap it in.
        let path = self.collection_path();
        let staging = self.database_dir.join(format!("{}.tmp", COLLECTION_FILE));
        fs::write(&staging, contents)?;
        fs::rename(&staging, &path)?;

        info!(
            "event=document_save module=storage status=ok records={}",
            records.len()
        );
        Ok(())
    }
}
