//! Chart record types shared by the scraper, the fetch service and the analysis helpers.

use std::fmt;

use serde::{Serialize, Serializer};

/// Week-over-week movement of one entry.
///
/// The text form is what downstream consumers see: `NEW`, `RE`, `=`, or a
/// signed difference such as `+2` / `-7` (last week's rank minus this week's).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// First week on the chart.
    New,
    /// Back on the chart after at least one week off it.
    Reentry,
    /// Same rank as last week.
    Same,
    /// Moved by `last_week - rank` spots; never zero.
    Moved(i32),
}

impl Change {
    /// Derives the movement from this week's rank and the optional
    /// last-week rank. `total_weeks` decides between NEW and RE.
    pub fn derive(rank: u32, last_week: Option<u32>, total_weeks: u32) -> Self {
        match last_week {
            None if total_weeks > 1 => Self::Reentry,
            None => Self::New,
            Some(last) => {
                let diff = i64::from(last) - i64::from(rank);
                if diff == 0 {
                    Self::Same
                } else {
                    Self::Moved(diff.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
                }
            }
        }
    }

    /// The signed spot difference, if this is a numeric movement.
    pub fn delta(&self) -> Option<i32> {
        match self {
            Self::Moved(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => f.write_str("NEW"),
            Self::Reentry => f.write_str("RE"),
            Self::Same => f.write_str("="),
            Self::Moved(d) => write!(f, "{:+}", d),
        }
    }
}

impl Serialize for Change {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One ranked song for one chart week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartEntry {
    #[serde(rename = "Rank")]
    pub rank: u32,
    #[serde(rename = "Title")]
    pub title: String,
    /// Display credit, with `Featuring` abbreviated to `ft.`.
    #[serde(rename = "Artists")]
    pub credits_text: String,
    /// Individual performer names parsed from the credit.
    #[serde(rename = "Artists List")]
    pub artists: Vec<String>,
    #[serde(rename = "Change")]
    pub change: Change,
    #[serde(rename = "Last Week")]
    pub last_week: Option<u32>,
    #[serde(rename = "Peak Position")]
    pub peak_pos: u32,
    #[serde(rename = "Total Weeks")]
    pub total_weeks: u32,
}

/// The full ranked entry list for one chart week.
///
/// Entries are in rank order and can only be borrowed once the snapshot
/// exists; derived views reference them instead of copying.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSnapshot {
    date: String,
    entries: Vec<ChartEntry>,
}

impl ChartSnapshot {
    pub fn new(date: impl Into<String>, entries: Vec<ChartEntry>) -> Self {
        Self {
            date: date.into(),
            entries,
        }
    }

    /// The `YYYY-MM-DD` date this chart was requested for.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn entries(&self) -> &[ChartEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChartEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the entry at `rank`, if present.
    pub fn get_rank(&self, rank: u32) -> Option<&ChartEntry> {
        self.entries.iter().find(|e| e.rank == rank)
    }
}

impl<'a> IntoIterator for &'a ChartSnapshot {
    type Item = &'a ChartEntry;
    type IntoIter = std::slice::Iter<'a, ChartEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// The two chart weeks the movement metrics compare.
#[derive(Debug, Clone)]
pub struct ChartWeeks {
    pub current: ChartSnapshot,
    pub prior: ChartSnapshot,
}
