//! survey - Customer survey recorder
//!
//! Records customer survey responses (email, a yes/no answer, a favorite
//! number) into a delimited text file, a SQLite table, or a document
//! collection, and lists or exports them back.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

pub use error::SurveyError;
