//! Movement and longevity metrics over chart snapshots.
//!
//! All functions borrow their snapshots and return views that reference
//! the same entries. None of them can fail: odd values fall into
//! `Unknown` or are left out of a view.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::chart::{Change, ChartEntry, ChartSnapshot};

/// Movement needed to count as a big gainer or loser.
pub const BIG_MOVE_THRESHOLD: i32 = 10;
/// How many top positions the trajectory table covers.
pub const TOP_N: u32 = 10;
/// Width of a position-change histogram bin.
pub const HISTOGRAM_BIN: i32 = 5;

/// Semantic bucket for a change value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ChangeCategory {
    Up,
    Down,
    Same,
    Return,
    New,
    Unknown,
}

impl ChangeCategory {
    pub const ALL: [ChangeCategory; 6] = [
        Self::Up,
        Self::Down,
        Self::Same,
        Self::Return,
        Self::New,
        Self::Unknown,
    ];
}

impl fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Same => "Same",
            Self::Return => "Return",
            Self::New => "New",
            Self::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// Categorizes the text form of a change. Never fails.
pub fn categorize_change(change: &str) -> ChangeCategory {
    let change = change.trim();
    match change {
        "NEW" => return ChangeCategory::New,
        "RE" => return ChangeCategory::Return,
        "=" => return ChangeCategory::Same,
        _ => {}
    }

    if let Some(rest) = change.strip_prefix('-') {
        if !is_digits(rest) {
            return ChangeCategory::Unknown;
        }
        return match change.parse::<i64>() {
            Ok(v) if v < 0 => ChangeCategory::Down,
            Ok(_) => ChangeCategory::Same,
            Err(_) => ChangeCategory::Unknown,
        };
    }

    let digits = change.strip_prefix('+').unwrap_or(change);
    if !is_digits(digits) {
        return ChangeCategory::Unknown;
    }
    match digits.parse::<i64>() {
        Ok(v) if v > 0 => ChangeCategory::Up,
        Ok(_) => ChangeCategory::Same,
        Err(_) => ChangeCategory::Unknown,
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Category of an already-built change.
pub fn change_category(change: &Change) -> ChangeCategory {
    categorize_change(&change.to_string())
}

/// An entry paired with its change category.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CategorizedEntry<'a> {
    #[serde(flatten)]
    pub entry: &'a ChartEntry,
    #[serde(rename = "Change Category")]
    pub category: ChangeCategory,
}

pub fn categorize(snapshot: &ChartSnapshot) -> Vec<CategorizedEntry<'_>> {
    snapshot
        .iter()
        .map(|entry| CategorizedEntry {
            entry,
            category: change_category(&entry.change),
        })
        .collect()
}

/// Number of entries in each change category, in [`ChangeCategory::ALL`] order.
pub fn category_counts(snapshot: &ChartSnapshot) -> Vec<(ChangeCategory, usize)> {
    let mut counts: HashMap<ChangeCategory, usize> = HashMap::new();
    for item in categorize(snapshot) {
        *counts.entry(item.category).or_default() += 1;
    }
    ChangeCategory::ALL
        .iter()
        .map(|c| (*c, counts.get(c).copied().unwrap_or(0)))
        .collect()
}

/// Ranges of total weeks on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum LongevityBucket {
    #[serde(rename = "1-5 Weeks")]
    UpTo5,
    #[serde(rename = "6-15 Weeks")]
    UpTo15,
    #[serde(rename = "16-30 Weeks")]
    UpTo30,
    #[serde(rename = "31-45 Weeks")]
    UpTo45,
    #[serde(rename = "46-60 Weeks")]
    UpTo60,
    #[serde(rename = "61+ Weeks")]
    Over60,
}

impl LongevityBucket {
    /// All buckets, shortest run first.
    pub const ORDER: [LongevityBucket; 6] = [
        Self::UpTo5,
        Self::UpTo15,
        Self::UpTo30,
        Self::UpTo45,
        Self::UpTo60,
        Self::Over60,
    ];

    /// Right-closed ranges; 0 and 1 both land in the first bucket.
    pub fn for_weeks(total_weeks: u32) -> Self {
        match total_weeks {
            0..=5 => Self::UpTo5,
            6..=15 => Self::UpTo15,
            16..=30 => Self::UpTo30,
            31..=45 => Self::UpTo45,
            46..=60 => Self::UpTo60,
            _ => Self::Over60,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::UpTo5 => "1-5 Weeks",
            Self::UpTo15 => "6-15 Weeks",
            Self::UpTo30 => "16-30 Weeks",
            Self::UpTo45 => "31-45 Weeks",
            Self::UpTo60 => "46-60 Weeks",
            Self::Over60 => "61+ Weeks",
        }
    }
}

impl fmt::Display for LongevityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Entry counts per longevity bucket, every bucket listed in order.
pub fn longevity_distribution(snapshot: &ChartSnapshot) -> Vec<(LongevityBucket, usize)> {
    let mut counts: BTreeMap<LongevityBucket, usize> = BTreeMap::new();
    for entry in snapshot {
        *counts
            .entry(LongevityBucket::for_weeks(entry.total_weeks))
            .or_default() += 1;
    }
    LongevityBucket::ORDER
        .iter()
        .map(|b| (*b, counts.get(b).copied().unwrap_or(0)))
        .collect()
}

/// Entries sitting at their best-ever rank this week, excluding songs
/// that held steady there and brand-new debuts.
pub fn peakers(snapshot: &ChartSnapshot) -> Vec<&ChartEntry> {
    snapshot
        .iter()
        .filter(|e| e.rank == e.peak_pos && !matches!(e.change, Change::Same | Change::New))
        .collect()
}

/// Entries that climbed at least [`BIG_MOVE_THRESHOLD`] spots.
pub fn gainers(snapshot: &ChartSnapshot) -> Vec<&ChartEntry> {
    snapshot
        .iter()
        .filter(|e| e.change.delta().is_some_and(|d| d >= BIG_MOVE_THRESHOLD))
        .collect()
}

/// Entries that fell at least [`BIG_MOVE_THRESHOLD`] spots.
pub fn losers(snapshot: &ChartSnapshot) -> Vec<&ChartEntry> {
    snapshot
        .iter()
        .filter(|e| e.change.delta().is_some_and(|d| d <= -BIG_MOVE_THRESHOLD))
        .collect()
}

pub fn new_entries(snapshot: &ChartSnapshot) -> Vec<&ChartEntry> {
    snapshot
        .iter()
        .filter(|e| e.change == Change::New)
        .collect()
}

pub fn re_entries(snapshot: &ChartSnapshot) -> Vec<&ChartEntry> {
    snapshot
        .iter()
        .filter(|e| e.change == Change::Reentry)
        .collect()
}

/// Prior-week entries whose title no longer appears this week, in
/// prior-week rank order.
///
/// Matching is by title alone, so two different songs sharing a title
/// count as the same song.
pub fn dropouts<'a>(current: &ChartSnapshot, prior: &'a ChartSnapshot) -> Vec<&'a ChartEntry> {
    let titles: HashSet<&str> = current.iter().map(|e| e.title.as_str()).collect();
    prior
        .iter()
        .filter(|e| !titles.contains(e.title.as_str()))
        .collect()
}

/// Current and previous rank of one top-N song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankTrajectory<'a> {
    #[serde(rename = "Title")]
    pub title: &'a str,
    #[serde(rename = "Artists")]
    pub artists: &'a str,
    #[serde(rename = "Change")]
    pub change: Change,
    #[serde(rename = "Previous Rank")]
    pub previous_rank: Option<u32>,
    #[serde(rename = "Current Rank")]
    pub current_rank: u32,
}

impl RankTrajectory<'_> {
    /// "Title - Artists", the label the trajectory chart uses per line.
    pub fn song_details(&self) -> String {
        format!("{} - {}", self.title, self.artists)
    }
}

/// Pairs every current entry ranked `<= n` with its prior-week rank,
/// matched on title and display credit.
pub fn top_trajectories<'a>(
    current: &'a ChartSnapshot,
    prior: &ChartSnapshot,
    n: u32,
) -> Vec<RankTrajectory<'a>> {
    let previous: HashMap<(&str, &str), u32> = prior
        .iter()
        .map(|e| ((e.title.as_str(), e.credits_text.as_str()), e.rank))
        .collect();

    current
        .iter()
        .filter(|e| e.rank <= n)
        .map(|e| RankTrajectory {
            title: &e.title,
            artists: &e.credits_text,
            change: e.change,
            previous_rank: previous
                .get(&(e.title.as_str(), e.credits_text.as_str()))
                .copied(),
            current_rank: e.rank,
        })
        .collect()
}

/// Counts numeric changes into bins of width `bin`, keyed by each bin's
/// lower edge. NEW, RE and `=` are left out. A non-positive width falls
/// back to [`HISTOGRAM_BIN`].
pub fn position_change_histogram(snapshot: &ChartSnapshot, bin: i32) -> Vec<(i32, usize)> {
    let bin = if bin > 0 { bin } else { HISTOGRAM_BIN };
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for delta in snapshot.iter().filter_map(|e| e.change.delta()) {
        *counts.entry(delta.div_euclid(bin) * bin).or_default() += 1;
    }
    counts.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(rank: u32, title: &str, last_week: Option<u32>, peak: u32, weeks: u32) -> ChartEntry {
        ChartEntry {
            rank,
            title: title.to_string(),
            credits_text: format!("{} Artist", title),
            artists: vec![format!("{} Artist", title)],
            change: Change::derive(rank, last_week, weeks),
            last_week,
            peak_pos: peak,
            total_weeks: weeks,
        }
    }

    fn snapshot(entries: Vec<ChartEntry>) -> ChartSnapshot {
        ChartSnapshot::new("2024-05-04", entries)
    }

    #[test]
    fn categorize_literal_markers() {
        assert_eq!(categorize_change("NEW"), ChangeCategory::New);
        assert_eq!(categorize_change("RE"), ChangeCategory::Return);
        assert_eq!(categorize_change("="), ChangeCategory::Same);
        assert_eq!(categorize_change(" NEW "), ChangeCategory::New);
    }

    #[test]
    fn categorize_numbers() {
        assert_eq!(categorize_change("+2"), ChangeCategory::Up);
        assert_eq!(categorize_change("2"), ChangeCategory::Up);
        assert_eq!(categorize_change("-7"), ChangeCategory::Down);
        assert_eq!(categorize_change("0"), ChangeCategory::Same);
        assert_eq!(categorize_change("-0"), ChangeCategory::Same);
        assert_eq!(categorize_change("+0"), ChangeCategory::Same);
    }

    #[test]
    fn categorize_garbage_is_unknown() {
        for input in [
            "", "new", "up", "--3", "-", "+", "3.5", "-4x", "1e3", "99999999999999999999999",
        ] {
            assert_eq!(categorize_change(input), ChangeCategory::Unknown, "{input}");
        }
    }

    #[test]
    fn categorize_end_to_end() {
        let snap = snapshot(vec![
            entry(1, "A", Some(3), 1, 10),
            entry(2, "B", None, 2, 1),
            entry(3, "C", None, 3, 8),
        ]);
        let categories: Vec<ChangeCategory> =
            categorize(&snap).iter().map(|c| c.category).collect();
        assert_eq!(
            categories,
            vec![ChangeCategory::Up, ChangeCategory::New, ChangeCategory::Return]
        );
    }

    #[test]
    fn category_counts_cover_all() {
        let snap = snapshot(vec![
            entry(1, "A", Some(1), 1, 10),
            entry(2, "B", Some(9), 2, 3),
            entry(3, "C", Some(1), 1, 12),
        ]);
        let counts = category_counts(&snap);
        assert_eq!(counts.len(), 6);
        assert_eq!(counts[0], (ChangeCategory::Up, 1));
        assert_eq!(counts[1], (ChangeCategory::Down, 1));
        assert_eq!(counts[2], (ChangeCategory::Same, 1));
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), 3);
    }

    #[test]
    fn longevity_edges() {
        assert_eq!(LongevityBucket::for_weeks(0), LongevityBucket::UpTo5);
        assert_eq!(LongevityBucket::for_weeks(1), LongevityBucket::UpTo5);
        assert_eq!(LongevityBucket::for_weeks(5), LongevityBucket::UpTo5);
        assert_eq!(LongevityBucket::for_weeks(6), LongevityBucket::UpTo15);
        assert_eq!(LongevityBucket::for_weeks(15), LongevityBucket::UpTo15);
        assert_eq!(LongevityBucket::for_weeks(30), LongevityBucket::UpTo30);
        assert_eq!(LongevityBucket::for_weeks(45), LongevityBucket::UpTo45);
        assert_eq!(LongevityBucket::for_weeks(60), LongevityBucket::UpTo60);
        assert_eq!(LongevityBucket::for_weeks(61), LongevityBucket::Over60);
        assert_eq!(LongevityBucket::Over60.to_string(), "61+ Weeks");
    }

    #[test]
    fn longevity_is_a_partition() {
        let entries = (1..=100u32)
            .map(|rank| entry(rank, &format!("S{rank}"), Some(rank), rank, rank))
            .collect();
        let snap = snapshot(entries);
        let dist = longevity_distribution(&snap);
        let buckets: Vec<LongevityBucket> = dist.iter().map(|(b, _)| *b).collect();
        assert_eq!(buckets, LongevityBucket::ORDER.to_vec());
        assert_eq!(dist.iter().map(|(_, n)| n).sum::<usize>(), 100);
        assert_eq!(dist[0].1, 5);
        assert_eq!(dist[1].1, 10);
        assert_eq!(dist[5].1, 40);
    }

    #[test]
    fn peakers_exclude_steady_and_debuts() {
        let snap = snapshot(vec![
            entry(1, "Climber", Some(4), 1, 6),
            entry(2, "Steady", Some(2), 2, 9),
            entry(3, "Debut", None, 3, 1),
            entry(4, "Return", None, 4, 5),
            entry(5, "Faller", Some(2), 1, 20),
        ]);
        let titles: Vec<&str> = peakers(&snap).iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Climber", "Return"]);
    }

    #[test]
    fn gainers_and_losers_use_threshold() {
        let snap = snapshot(vec![
            entry(1, "Jump", Some(11), 1, 3),
            entry(2, "Small", Some(11), 2, 3),
            entry(30, "Drop", Some(20), 5, 12),
            entry(31, "Slip", Some(22), 5, 12),
            entry(40, "Debut", None, 40, 1),
        ]);
        let up: Vec<&str> = gainers(&snap).iter().map(|e| e.title.as_str()).collect();
        let down: Vec<&str> = losers(&snap).iter().map(|e| e.title.as_str()).collect();
        assert_eq!(up, vec!["Jump"]);
        assert_eq!(down, vec!["Drop"]);
    }

    #[test]
    fn new_and_re_entries() {
        let snap = snapshot(vec![
            entry(1, "A", Some(1), 1, 3),
            entry(2, "B", None, 2, 1),
            entry(3, "C", None, 3, 7),
        ]);
        assert_eq!(new_entries(&snap)[0].title, "B");
        assert_eq!(re_entries(&snap)[0].title, "C");
        assert_eq!(new_entries(&snap).len(), 1);
    }

    #[test]
    fn dropouts_are_prior_titles_missing_now() {
        let prior = snapshot(vec![
            entry(1, "A", Some(1), 1, 3),
            entry(2, "B", Some(2), 2, 3),
            entry(3, "C", Some(3), 3, 3),
        ]);
        let current = snapshot(vec![
            entry(1, "A", Some(1), 1, 4),
            entry(2, "C", Some(3), 2, 4),
            entry(3, "D", None, 3, 1),
        ]);
        let out: Vec<&str> = dropouts(&current, &prior)
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(out, vec!["B"]);
    }

    #[test]
    fn dropouts_against_empty_prior() {
        let current = snapshot(vec![entry(1, "A", None, 1, 1)]);
        let prior = snapshot(vec![]);
        assert!(dropouts(&current, &prior).is_empty());
    }

    #[test]
    fn trajectories_match_title_and_credit() {
        let mut renamed = entry(2, "B", Some(5), 2, 4);
        renamed.credits_text = "Someone Else".into();
        let prior = snapshot(vec![
            entry(1, "C", Some(1), 1, 3),
            entry(3, "A", Some(3), 3, 3),
            entry(5, "B", Some(5), 5, 3),
        ]);
        let current = snapshot(vec![
            entry(1, "A", Some(3), 1, 4),
            renamed,
            entry(3, "New", None, 3, 1),
            entry(11, "C", Some(1), 1, 4),
        ]);

        let rows = top_trajectories(&current, &prior, TOP_N);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].title, "A");
        assert_eq!(rows[0].previous_rank, Some(3));
        assert_eq!(rows[0].current_rank, 1);
        assert_eq!(rows[0].song_details(), "A - A Artist");
        // Same title, different credit: no match.
        assert_eq!(rows[1].previous_rank, None);
        assert_eq!(rows[2].previous_rank, None);
    }

    #[test]
    fn histogram_bins_by_floor() {
        let snap = snapshot(vec![
            entry(1, "A", Some(3), 1, 4),   // +2
            entry(2, "B", Some(6), 2, 4),   // +4
            entry(10, "C", Some(4), 4, 4),  // -6
            entry(20, "D", Some(19), 4, 4), // -1
            entry(30, "E", None, 30, 1),
            entry(31, "F", Some(31), 9, 4),
        ]);
        let hist = position_change_histogram(&snap, HISTOGRAM_BIN);
        assert_eq!(hist, vec![(-10, 1), (-5, 1), (0, 2)]);
        assert_eq!(position_change_histogram(&snap, 0), hist);
    }
}
