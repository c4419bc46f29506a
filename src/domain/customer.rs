//! Customer record and input validation

use crate::error::{Result, SurveyError};
use regex::Regex;
use std::sync::OnceLock;

fn email_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[^@\s[:cntrl:]]+@[^@\s[:cntrl:]]+$").unwrap())
}

/// One survey response, keyed by email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub email: String,
    pub flag: bool,
    pub number: i64,
}

impl Customer {
    pub fn new(email: impl Into<String>, flag: bool, number: i64) -> Self {
        Customer {
            email: email.into(),
            flag,
            number,
        }
    }

    /// Build a customer from raw form input, validating every field.
    pub fn parse(email: &str, flag: &str, number: &str) -> Result<Self> {
        Ok(Customer {
            email: validate_email(email)?,
            flag: parse_flag(flag)?,
            number: parse_number(number)?,
        })
    }

    /// Text form of the flag as stored in delimited files and shown in lists
    pub fn flag_text(&self) -> &'static str {
        if self.flag {
            "True"
        } else {
            "False"
        }
    }
}

/// Trim and check that an email has the `local@domain` shape.
pub fn validate_email(input: &str) -> Result<String> {
    let email = input.trim();
    if email.is_empty() {
        return Err(SurveyError::Validation("email cannot be empty".to_string()));
    }
    if !email_regex().is_match(email) {
        return Err(SurveyError::Validation(format!(
            "invalid email '{}': expected the form name@domain",
            email
        )));
    }
    Ok(email.to_string())
}

/// Parse a yes/no style flag (case-insensitive).
pub fn parse_flag(input: &str) -> Result<bool> {
    match input.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(SurveyError::Validation(format!(
            "invalid flag '{}'",
            input.trim()
        ))),
    }
}

/// Parse a favorite number as a signed 64-bit integer.
pub fn parse_number(input: &str) -> Result<i64> {
    input.trim().parse::<i64>().map_err(|_| {
        SurveyError::Validation(format!("invalid favorite number '{}'", input.trim()))
    })
}
