//! HTML extraction for Hot 100 chart pages.

use scraper::{ElementRef, Html, Selector};

use crate::credits::CreditParser;
use crate::error::ParseError;

const ROW_SELECTOR: &str = "div.o-chart-results-list-row-container";
const TITLE_SELECTOR: &str = "h3#title-of-a-story";
const CREDITS_SELECTOR: &str = "span.a-no-trucate";
const STATS_SELECTOR: &str = "span.u-font-size-12";

// Positions of the value cells among a row's stat spans; the others are labels.
const LAST_WEEK_STAT: usize = 1;
const PEAK_STAT: usize = 3;
const WEEKS_STAT: usize = 5;

/// Raw fields of one chart row, before any numeric conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChartRow {
    pub title: String,
    /// Credit text as displayed, whitespace-trimmed.
    pub credits: String,
    /// Performer names parsed from the credit's text segments.
    pub artists: Vec<String>,
    pub last_week: String,
    pub peak: String,
    pub weeks: String,
}

/// Pulls [`RawChartRow`]s out of a chart page.
pub struct ChartExtractor {
    row: Selector,
    title: Selector,
    credits: Selector,
    stats: Selector,
    parser: CreditParser,
}

impl ChartExtractor {
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self {
            row: parse_selector(ROW_SELECTOR)?,
            title: parse_selector(TITLE_SELECTOR)?,
            credits: parse_selector(CREDITS_SELECTOR)?,
            stats: parse_selector(STATS_SELECTOR)?,
            parser: CreditParser::new()?,
        })
    }

    /// Extracts every chart row in document order, which is rank order.
    ///
    /// A page without rows yields an empty list. A row that lacks any
    /// expected field fails the whole extraction, since skipping it would
    /// shift every later rank.
    pub fn extract(&self, html: &str) -> Result<Vec<RawChartRow>, ParseError> {
        let document = Html::parse_document(html);
        let rows = document
            .select(&self.row)
            .enumerate()
            .map(|(i, row)| self.extract_row(row, i as u32 + 1))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!("Extracted {} chart rows", rows.len());
        Ok(rows)
    }

    fn extract_row(&self, row: ElementRef<'_>, rank: u32) -> Result<RawChartRow, ParseError> {
        let title_el = row
            .select(&self.title)
            .next()
            .ok_or(ParseError::MissingField {
                rank,
                field: "title",
            })?;
        let title = element_text(title_el);
        if title.is_empty() {
            return Err(ParseError::EmptyField {
                rank,
                field: "title",
            });
        }

        let credits_el = row
            .select(&self.credits)
            .next()
            .ok_or(ParseError::MissingField {
                rank,
                field: "artists",
            })?;
        let credits = element_text(credits_el);
        let segments: Vec<&str> = credits_el.text().collect();
        let artists = self.parser.parse_segments(&segments);

        let stats: Vec<ElementRef<'_>> = row.select(&self.stats).collect();
        let stat = |index: usize, field: &'static str| {
            stats
                .get(index)
                .map(|el| element_text(*el))
                .ok_or(ParseError::MissingField { rank, field })
        };

        Ok(RawChartRow {
            title,
            credits,
            artists,
            last_week: stat(LAST_WEEK_STAT, "last week")?,
            peak: stat(PEAK_STAT, "peak position")?,
            weeks: stat(WEEKS_STAT, "total weeks")?,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ParseError> {
    Selector::parse(selector).map_err(|e| ParseError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
