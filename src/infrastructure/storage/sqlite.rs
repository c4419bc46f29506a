//! Embedded relational table storage
//!
//! # Invariants
//! - Records live in `customers(email TEXT, boolean_value INTEGER,
//!   favorite_number INTEGER)`, read back in `rowid` order.
//! - Loading never creates the database file.
//! - Saving replaces every row inside a single transaction.

use super::{ensure_parent_dir, CustomerStorage};
use crate::domain::{BackendKind, Customer};
use crate::error::Result;
use log::{debug, error, info};
use rusqlite::{params, Connection, OpenFlags, Row};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS customers (
    email TEXT,
    boolean_value INTEGER,
    favorite_number INTEGER
);";

const CUSTOMER_SELECT_SQL: &str = "SELECT
    email,
    boolean_value,
    favorite_number
FROM customers
ORDER BY rowid ASC;";

/// Customer storage in a SQLite database file
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    path: PathBuf,
}

impl SqliteStorage {
    pub fn new(path: PathBuf) -> Self {
        SqliteStorage { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self, flags: OpenFlags) -> Result<Connection> {
        let started_at = Instant::now();
        match Connection::open_with_flags(&self.path, flags) {
            Ok(conn) => {
                conn.busy_timeout(Duration::from_secs(5))?;
                debug!(
                    "event=db_open module=storage status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(conn)
            }
            Err(err) => {
                error!(
                    "event=db_open module=storage status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }
}

impl CustomerStorage for SqliteStorage {
    fn kind(&self) -> BackendKind {
        BackendKind::Sqlite
    }

    fn load(&self) -> Result<Vec<Customer>> {
        if !self.path.exists() {
            debug!("event=db_load module=storage status=missing");
            return Ok(Vec::new());
        }

        let conn = self.open(OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        if !table_exists(&conn)? {
            debug!("event=db_load module=storage status=missing_table");
            return Ok(Vec::new());
        }

        let mut stmt = conn.prepare(CUSTOMER_SELECT_SQL)?;
        let customers = stmt
            .query_map([], parse_customer_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        info!(
            "event=db_load module=storage status=ok records={}",
            customers.len()
        );
        Ok(customers)
    }

    fn save(&self, records: &[Customer]) -> Result<()> {
        ensure_parent_dir(&self.path)?;
        let mut conn = self.open(OpenFlags::default())?;

        let tx = conn.transaction()?;
        tx.execute_batch(CREATE_TABLE_SQL)?;
        tx.execute("DELETE FROM customers;", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO customers (email, boolean_value, favorite_number)
                 VALUES (?1, ?2, ?3);",
            )?;
            for customer in records {
                insert.execute(params![
                    customer.email.as_str(),
                    bool_to_int(customer.flag),
                    customer.number,
                ])?;
            }
        }
        tx.commit()?;

        info!(
            "event=db_save module=storage status=ok records={}",
            records.len()
        );
        Ok(())
    }
}

fn table_exists(conn: &Connection) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'customers';",
        [],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn parse_customer_row(row: &Row<'_>) -> rusqlite::Result<Customer> {
    let email: String = row.get(0)?;
    let flag: i64 = row.get(1)?;
    let number: i64 = row.get(2)?;
    Ok(Customer::new(email, flag != 0, number))
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
