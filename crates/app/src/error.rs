//! Boundary error types.
//!
//! These cover input that never reaches the domain: process configuration and
//! command-line arguments.

use thiserror::Error;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `ORDERS_LOG_FORMAT` is not a known format.
    #[error("Invalid log format '{0}' (expected 'pretty' or 'json')")]
    InvalidLogFormat(String),

    /// A boolean variable holds something other than true/false/1/0.
    #[error("Invalid boolean for {var}: '{value}'")]
    InvalidBool { var: &'static str, value: String },
}

/// Errors raised while parsing an `ITEM_ID:QTY` order line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineParseError {
    /// The separator is missing.
    #[error("Expected ITEM_ID:QTY, got '{0}'")]
    MissingSeparator(String),

    /// One side is not a non-negative integer.
    #[error("Invalid {field} '{value}' (expected a non-negative integer)")]
    InvalidNumber { field: &'static str, value: String },
}
