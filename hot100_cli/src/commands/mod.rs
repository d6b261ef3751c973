//! CLI subcommand implementations.

pub mod chart;
pub mod movers;
pub mod stats;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;
use hot100_lib::validation::{
    effective_chart_date, format_date, validate_chart_date, validate_date,
};
use hot100_lib::{ChartService, Client};

#[derive(Args)]
pub struct DateArgs {
    /// Chart date (YYYY-MM-DD). Any day of a past week selects that week's chart.
    #[arg(long)]
    pub date: Option<String>,
}

impl DateArgs {
    /// Resolves the requested date to the date the chart is published under.
    pub fn chart_date(&self) -> Result<String> {
        self.chart_date_on(Local::now().date_naive())
    }

    /// Same as [`DateArgs::chart_date`], relative to a given `today`.
    pub fn chart_date_on(&self, today: NaiveDate) -> Result<String> {
        let selected = match self.date.as_deref() {
            Some(input) => validate_chart_date(validate_date(input)?, today)?,
            None => today,
        };
        Ok(format_date(effective_chart_date(selected, today)))
    }
}

/// Builds the fetch service from `HOT100_*` environment settings.
pub fn build_service() -> Result<ChartService<Client>> {
    let client = Client::from_env()?;
    Ok(ChartService::from_env(client)?)
}
