//! Storage backend selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The persistence mechanism a workspace records customers into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Delimited text file with a header row
    #[default]
    Csv,
    /// Embedded relational table (`customers`)
    Sqlite,
    /// Document collection, one JSON document per record
    Document,
}

impl BackendKind {
    /// Default data file (or directory, for documents) name for this backend
    pub fn default_data_file(&self) -> &'static str {
        match self {
            BackendKind::Csv => "customer_data.csv",
            BackendKind::Sqlite => "customer_data.db",
            BackendKind::Document => "customer_data",
        }
    }

    /// Whether records can be exported to a standalone file in this format
    pub fn is_exportable(&self) -> bool {
        matches!(self, BackendKind::Csv | BackendKind::Sqlite)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Csv => "csv",
            BackendKind::Sqlite => "sqlite",
            BackendKind::Document => "document",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" | "text" => Ok(BackendKind::Csv),
            "sqlite" | "table" | "db" => Ok(BackendKind::Sqlite),
            "document" | "mongo" | "mongodb" | "json" => Ok(BackendKind::Document),
            _ => Err(format!(
                "Invalid backend: '{}'. Valid backends are: csv, sqlite, document",
                s
            )),
        }
    }
}
