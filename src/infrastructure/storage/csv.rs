//! Delimited text storage
//!
//! File layout: a header row followed by one row per customer, CRLF line
//! endings, booleans written as `True`/`False`. Fields that contain a comma,
//! quote or line break are quoted with inner quotes doubled.

use super::{ensure_parent_dir, CustomerStorage};
use crate::domain::{BackendKind, Customer};
use crate::error::{Result, SurveyError};
use log::{debug, info};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Header row written at the top of every file
pub const CSV_HEADERS: [&str; 3] = ["Email", "Boolean Value", "Favorite Number"];

const LINE_TERMINATOR: &str = "\r\n";

/// Customer storage in a single delimited text file
#[derive(Debug, Clone)]
pub struct CsvStorage {
    path: PathBuf,
}

impl CsvStorage {
    pub fn new(path: PathBuf) -> Self {
        CsvStorage { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CustomerStorage for CsvStorage {
    fn kind(&self) -> BackendKind {
        BackendKind::Csv
    }

    fn load(&self) -> Result<Vec<Customer>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("event=csv_load module=storage status=missing");
                return Ok(Vec::new());
            }
            Err(e) => return Err(SurveyError::Io(e)),
        };

        let customers = parse_customers(&contents)
            .map_err(|msg| SurveyError::Storage(format!("{}: {}", self.path.display(), msg)))?;
        info!(
            "event=csv_load module=storage status=ok records={}",
            customers.len()
        );
        Ok(customers)
    }

    fn save(&self, records: &[Customer]) -> Result<()> {
        ensure_parent_dir(&self.path)?;
        fs::write(&self.path, render_customers(records))?;
        info!(
            "event=csv_save module=storage status=ok records={}",
            records.len()
        );
        Ok(())
    }
}

/// Render records (with header) into file contents
pub fn render_customers(records: &[Customer]) -> String {
    let mut output = String::new();
    push_row(&mut output, &CSV_HEADERS);
    for customer in records {
        let number = customer.number.to_string();
        push_row(
            &mut output,
            &[customer.email.as_str(), customer.flag_text(), number.as_str()],
        );
    }
    output
}

fn push_row(output: &mut String, fields: &[&str]) {
    for (idx, field) in fields.iter().enumerate() {
        if idx > 0 {
            output.push(',');
        }
        output.push_str(&escape_field(field));
    }
    output.push_str(LINE_TERMINATOR);
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Parse file contents (header row first) into records
pub fn parse_customers(contents: &str) -> std::result::Result<Vec<Customer>, String> {
    let rows = split_rows(contents)?;

    rows.into_iter()
        .skip(1)
        .filter(|(_, fields)| !(fields.len() == 1 && fields[0].is_empty()))
        .map(|(line, fields)| parse_row(line, &fields))
        .collect()
}

fn parse_row(line: usize, fields: &[String]) -> std::result::Result<Customer, String> {
    if fields.len() != CSV_HEADERS.len() {
        return Err(format!(
            "line {}: expected {} fields, found {}",
            line,
            CSV_HEADERS.len(),
            fields.len()
        ));
    }

    let flag = match fields[1].as_str() {
        "True" => true,
        "False" => false,
        other => {
            return Err(format!(
                "line {}: invalid boolean value '{}' (expected True or False)",
                line, other
            ))
        }
    };

    let number = fields[2]
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("line {}: invalid favorite number '{}'", line, fields[2]))?;

    Ok(Customer::new(fields[0].clone(), flag, number))
}

/// Split contents into rows of fields, tracking the line each row starts on.
fn split_rows(contents: &str) -> std::result::Result<Vec<(usize, Vec<String>)>, String> {
    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut row_start = 1;
    let mut chars = contents.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                fields.push(std::mem::take(&mut field));
                rows.push((row_start, std::mem::take(&mut fields)));
                line += 1;
                row_start = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(format!("line {}: unterminated quoted field", row_start));
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        rows.push((row_start, fields));
    }

    Ok(rows)
}
