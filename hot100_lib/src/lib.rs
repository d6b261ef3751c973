//! Library layer for the Hot 100 scraper: markup extraction, record
//! building, the chart fetch service and week-over-week analysis.
//!
//! Wraps the `hot100_api` transport with HTML parsing, artist credit
//! normalization, input validation and movement metrics.

pub mod analysis;
pub mod chart;
pub mod credits;
pub mod error;
pub mod record;
pub mod scrape;
pub mod service;
pub mod validation;

pub use hot100_api;
pub use hot100_api::Client;

pub use chart::{Change, ChartEntry, ChartSnapshot, ChartWeeks};
pub use credits::CreditParser;
pub use error::{ChartError, ParseError, ValidationError};
pub use scrape::{ChartExtractor, RawChartRow};
pub use service::{ChartService, HttpGet};

/// Transport failures surfaced by the fetch service.
pub type FetchError = hot100_api::Error;
