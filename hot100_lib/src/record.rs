//! Builds typed chart entries from raw scraped rows.

use crate::chart::{Change, ChartEntry};
use crate::credits::abbreviate_featuring;
use crate::error::ValidationError;
use crate::scrape::RawChartRow;

/// Converts one raw row at the given 1-based rank into a [`ChartEntry`].
///
/// Peak position and total weeks are mandatory; anything other than a
/// positive integer is rejected. Last week is optional and any
/// placeholder (`-`, blank, `0`) means "not charted last week".
pub fn build_entry(rank: u32, row: &RawChartRow) -> Result<ChartEntry, ValidationError> {
    let last_week = parse_last_week(&row.last_week);
    let peak_pos = parse_positive(rank, "peak position", &row.peak)?;
    let total_weeks = parse_positive(rank, "total weeks", &row.weeks)?;

    if row.artists.is_empty() {
        tracing::warn!(
            "Row {} '{}' has no parseable artist names in credit '{}'",
            rank,
            row.title,
            row.credits
        );
    }

    Ok(ChartEntry {
        rank,
        title: row.title.clone(),
        credits_text: abbreviate_featuring(&row.credits),
        artists: row.artists.clone(),
        change: Change::derive(rank, last_week, total_weeks),
        last_week,
        peak_pos,
        total_weeks,
    })
}

/// Builds every row, ranking them by position. Fails on the first bad row.
pub fn build_entries(rows: &[RawChartRow]) -> Result<Vec<ChartEntry>, ValidationError> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| build_entry(i as u32 + 1, row))
        .collect()
}

/// Numeric only if every character is an ASCII digit.
pub fn parse_last_week(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<u32>().ok().filter(|n| *n > 0)
}

fn parse_positive(rank: u32, field: &'static str, raw: &str) -> Result<u32, ValidationError> {
    let trimmed = raw.trim();
    let invalid = || ValidationError::InvalidNumber {
        rank,
        field,
        value: trimmed.to_string(),
    };
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    match trimmed.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid()),
    }
}
