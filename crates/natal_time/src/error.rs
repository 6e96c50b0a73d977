//! Error types for calendar validation and parsing.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from constructing or parsing a UTC instant.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimeError {
    /// A calendar field is out of range.
    InvalidDate(&'static str),
    /// The input string is not a recognised timestamp.
    Parse(String),
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(msg) => write!(f, "invalid date: {msg}"),
            Self::Parse(msg) => write!(f, "timestamp parse error: {msg}"),
        }
    }
}

impl Error for TimeError {}

impl From<chrono::ParseError> for TimeError {
    fn from(e: chrono::ParseError) -> Self {
        Self::Parse(e.to_string())
    }
}
