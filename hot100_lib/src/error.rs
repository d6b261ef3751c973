//! Error types for the library layer.

use std::fmt;

/// The markup did not have the structure the extractor expects.
///
/// Not retryable: it usually means the chart page layout changed.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
    #[error("pattern compile error: {0}")]
    Pattern(#[from] regex::Error),
    #[error("row {rank}: missing {field}")]
    MissingField { rank: u32, field: &'static str },
    #[error("row {rank}: empty {field}")]
    EmptyField { rank: u32, field: &'static str },
    #[error("no chart rows found in page")]
    NoRows,
}

/// A mandatory numeric field of one row failed to parse.
#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("row {rank}: {field} must be a positive integer, got '{value}'")]
    InvalidNumber {
        rank: u32,
        field: &'static str,
        value: String,
    },
}

/// Errors surfaced by the chart fetch service.
#[derive(Debug)]
pub enum ChartError {
    /// Transport failure from the HTTP client.
    Fetch(hot100_api::Error),
    /// The page markup could not be parsed.
    Parse(ParseError),
    /// A row carried an invalid mandatory number.
    Validation(ValidationError),
    /// The requested chart date was malformed or out of range.
    InvalidDate(String),
}

impl ChartError {
    /// Only transport failures are worth retrying; everything else
    /// will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_retryable(),
            _ => false,
        }
    }
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(e) => write!(f, "Fetch error: {}", e),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::InvalidDate(msg) => write!(f, "Invalid date: {}", msg),
        }
    }
}

impl std::error::Error for ChartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fetch(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Validation(e) => Some(e),
            Self::InvalidDate(_) => None,
        }
    }
}

impl From<hot100_api::Error> for ChartError {
    fn from(e: hot100_api::Error) -> Self {
        Self::Fetch(e)
    }
}

impl From<ParseError> for ChartError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<ValidationError> for ChartError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}
