//! Chart fetch service: date in, complete snapshot out.

use std::future::Future;

use crate::chart::{ChartSnapshot, ChartWeeks};
use crate::error::{ChartError, ParseError};
use crate::record::build_entries;
use crate::scrape::ChartExtractor;
use crate::validation::{format_date, previous_week, validate_date};

pub const DEFAULT_BASE_URL: &str = "https://www.billboard.com";
pub const CHART_PATH: &str = "/charts/hot-100";

/// The HTTP capability the service depends on: fetch a URL, return its body.
pub trait HttpGet: Sync {
    fn get(&self, url: &str) -> impl Future<Output = Result<String, hot100_api::Error>> + Send;
}

impl HttpGet for hot100_api::Client {
    async fn get(&self, url: &str) -> Result<String, hot100_api::Error> {
        self.get_html(url).await
    }
}

/// Fetches Hot 100 chart pages and turns them into [`ChartSnapshot`]s.
///
/// Holds no state between calls beyond its configuration, so one service
/// can serve concurrent fetches for different dates.
pub struct ChartService<H> {
    http: H,
    base_url: String,
    extractor: ChartExtractor,
}

impl<H: HttpGet> ChartService<H> {
    /// Creates a service against the production chart site.
    pub fn new(http: H) -> Result<Self, ChartError> {
        Self::with_base_url(http, DEFAULT_BASE_URL)
    }

    /// Creates a service using `HOT100_BASE_URL` when set.
    pub fn from_env(http: H) -> Result<Self, ChartError> {
        let base_url = std::env::var("HOT100_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(http, &base_url)
    }

    /// Creates a service with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(http: H, base_url: &str) -> Result<Self, ChartError> {
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            extractor: ChartExtractor::new()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn chart_url(&self, date: &str) -> String {
        format!("{}{}/{}", self.base_url, CHART_PATH, date)
    }

    /// Fetches and parses the chart for a `YYYY-MM-DD` date.
    ///
    /// Either every row builds or the call fails; no partial snapshot is
    /// returned. Nothing is retried here.
    pub async fn fetch_chart(&self, date: &str) -> Result<ChartSnapshot, ChartError> {
        let date = format_date(validate_date(date)?);
        let url = self.chart_url(&date);
        tracing::debug!("Fetching chart for {} from {}", date, url);

        let html = self.http.get(&url).await?;
        let rows = self.extractor.extract(&html)?;
        if rows.is_empty() {
            tracing::warn!("Chart page for {} contained no rows", date);
            return Err(ParseError::NoRows.into());
        }
        let entries = build_entries(&rows)?;

        tracing::info!("Loaded {} entries for chart {}", entries.len(), date);
        Ok(ChartSnapshot::new(date, entries))
    }

    /// Fetches the chart for `date` and the week before it concurrently.
    ///
    /// The prior week is exactly seven days before `date`. Pass the resolved
    /// chart date (see [`crate::validation::effective_chart_date`]), not the
    /// day a user picked, so both requests land on published chart dates.
    pub async fn fetch_weeks(&self, date: &str) -> Result<ChartWeeks, ChartError> {
        let current_date = validate_date(date)?;
        let prior_date = format_date(previous_week(current_date));
        let current_date = format_date(current_date);

        let (current, prior) = tokio::try_join!(
            self.fetch_chart(&current_date),
            self.fetch_chart(&prior_date)
        )?;
        Ok(ChartWeeks { current, prior })
    }
}
