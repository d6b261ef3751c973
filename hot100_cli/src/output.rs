use anyhow::Result;
use serde::Serialize;
use hot100_lib::analysis::{ChangeCategory, LongevityBucket, RankTrajectory};
use hot100_lib::ChartEntry;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Self {
        match value {
            "json" => Self::Json,
            "csv" => Self::Csv,
            "markdown" | "md" => Self::Markdown,
            _ => Self::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
pub struct EntryRow {
    #[tabled(rename = "Rank")]
    #[serde(rename = "Rank")]
    rank: u32,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Artists")]
    #[serde(rename = "Artists")]
    artists: String,
    #[tabled(skip)]
    #[serde(rename = "Artists List")]
    artists_list: String,
    #[tabled(rename = "Change")]
    #[serde(rename = "Change")]
    change: String,
    #[tabled(rename = "Last Week")]
    #[serde(rename = "Last Week")]
    last_week: String,
    #[tabled(rename = "Peak")]
    #[serde(rename = "Peak Position")]
    peak_pos: u32,
    #[tabled(rename = "Weeks")]
    #[serde(rename = "Total Weeks")]
    total_weeks: u32,
}

/// Entry row tagged with the view it belongs to, for flat CSV output.
#[derive(Tabled, Serialize)]
pub struct SectionRow {
    #[tabled(rename = "Section")]
    #[serde(rename = "Section")]
    section: String,
    #[tabled(rename = "Rank")]
    #[serde(rename = "Rank")]
    rank: u32,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Artists")]
    #[serde(rename = "Artists")]
    artists: String,
    #[tabled(rename = "Change")]
    #[serde(rename = "Change")]
    change: String,
    #[tabled(rename = "Last Week")]
    #[serde(rename = "Last Week")]
    last_week: String,
    #[tabled(rename = "Peak")]
    #[serde(rename = "Peak Position")]
    peak_pos: u32,
    #[tabled(rename = "Weeks")]
    #[serde(rename = "Total Weeks")]
    total_weeks: u32,
}

#[derive(Tabled, Serialize)]
pub struct TrajectoryRow {
    #[tabled(rename = "Song")]
    #[serde(rename = "Song Details")]
    song: String,
    #[tabled(rename = "Previous Rank")]
    #[serde(rename = "Previous Rank")]
    previous_rank: String,
    #[tabled(rename = "Current Rank")]
    #[serde(rename = "Current Rank")]
    current_rank: u32,
    #[tabled(rename = "Change")]
    #[serde(rename = "Change")]
    change: String,
}

#[derive(Tabled, Serialize)]
pub struct CountRow {
    #[tabled(rename = "Group")]
    #[serde(rename = "Group")]
    group: String,
    #[tabled(rename = "Count")]
    #[serde(rename = "Count")]
    count: usize,
}

// -- Row builders --

pub fn build_entry_rows(entries: &[&ChartEntry]) -> Vec<EntryRow> {
    entries
        .iter()
        .map(|e| EntryRow {
            rank: e.rank,
            title: e.title.clone(),
            artists: e.credits_text.clone(),
            artists_list: e.artists.join("; "),
            change: e.change.to_string(),
            last_week: e
                .last_week
                .map(|w| w.to_string())
                .unwrap_or_else(|| "-".to_string()),
            peak_pos: e.peak_pos,
            total_weeks: e.total_weeks,
        })
        .collect()
}

pub fn build_section_rows(sections: &[(&str, Vec<&ChartEntry>)]) -> Vec<SectionRow> {
    sections
        .iter()
        .flat_map(|(name, entries)| {
            build_entry_rows(entries).into_iter().map(|row| SectionRow {
                section: name.to_string(),
                rank: row.rank,
                title: row.title,
                artists: row.artists,
                change: row.change,
                last_week: row.last_week,
                peak_pos: row.peak_pos,
                total_weeks: row.total_weeks,
            })
        })
        .collect()
}

pub fn build_trajectory_rows(trajectories: &[RankTrajectory<'_>]) -> Vec<TrajectoryRow> {
    trajectories
        .iter()
        .map(|t| TrajectoryRow {
            song: t.song_details(),
            previous_rank: t
                .previous_rank
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string()),
            current_rank: t.current_rank,
            change: t.change.to_string(),
        })
        .collect()
}

pub fn build_longevity_rows(dist: &[(LongevityBucket, usize)]) -> Vec<CountRow> {
    dist.iter()
        .map(|(bucket, count)| CountRow {
            group: bucket.label().to_string(),
            count: *count,
        })
        .collect()
}

pub fn build_category_rows(counts: &[(ChangeCategory, usize)]) -> Vec<CountRow> {
    counts
        .iter()
        .map(|(category, count)| CountRow {
            group: category.to_string(),
            count: *count,
        })
        .collect()
}

pub fn build_histogram_rows(bins: &[(i32, usize)], width: i32) -> Vec<CountRow> {
    bins.iter()
        .map(|(start, count)| CountRow {
            group: format!("{:+} to {:+}", start, start + width - 1),
            count: *count,
        })
        .collect()
}

// -- Printing --

/// Prints rows in the requested format.
pub fn print_rows<T: Tabled + Serialize>(rows: Vec<T>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(&rows),
    }
    Ok(())
}

/// Prints a titled table, skipping it entirely when there is nothing to show.
pub fn print_section<T: Tabled + Serialize>(
    title: &str,
    rows: Vec<T>,
    format: &OutputFormat,
) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    match format {
        OutputFormat::Markdown => println!("\n### {} ({})\n", title, rows.len()),
        _ => println!("\n{} ({})", title, rows.len()),
    }
    print_rows(rows, format)
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hot100_lib::Change;

    fn entry(rank: u32, title: &str, last_week: Option<u32>, weeks: u32) -> ChartEntry {
        ChartEntry {
            rank,
            title: title.to_string(),
            credits_text: "Artist A ft. Artist B".to_string(),
            artists: vec!["Artist A".to_string(), "Artist B".to_string()],
            change: Change::derive(rank, last_week, weeks),
            last_week,
            peak_pos: rank,
            total_weeks: weeks,
        }
    }

    #[test]
    fn test_output_format_parse() {
        assert!(matches!(OutputFormat::parse("json"), OutputFormat::Json));
        assert!(matches!(OutputFormat::parse("csv"), OutputFormat::Csv));
        assert!(matches!(OutputFormat::parse("md"), OutputFormat::Markdown));
        assert!(matches!(OutputFormat::parse("anything"), OutputFormat::Table));
    }

    #[test]
    fn test_build_entry_rows_mapping() {
        let e = entry(3, "Song", Some(8), 12);
        let rows = build_entry_rows(&[&e]);
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.rank, 3);
        assert_eq!(row.title, "Song");
        assert_eq!(row.artists, "Artist A ft. Artist B");
        assert_eq!(row.artists_list, "Artist A; Artist B");
        assert_eq!(row.change, "+5");
        assert_eq!(row.last_week, "8");
        assert_eq!(row.total_weeks, 12);
    }

    #[test]
    fn test_build_entry_rows_missing_last_week() {
        let e = entry(40, "Debut", None, 1);
        let rows = build_entry_rows(&[&e]);
        assert_eq!(rows[0].last_week, "-");
        assert_eq!(rows[0].change, "NEW");
    }

    #[test]
    fn test_build_section_rows_flattens() {
        let a = entry(1, "A", Some(12), 3);
        let b = entry(2, "B", None, 1);
        let sections = vec![("Gainers", vec![&a]), ("New Entries", vec![&b]), ("Empty", vec![])];
        let rows = build_section_rows(&sections);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].section, "Gainers");
        assert_eq!(rows[1].section, "New Entries");
        assert_eq!(rows[1].title, "B");
    }

    #[test]
    fn test_build_histogram_rows_labels() {
        let rows = build_histogram_rows(&[(-10, 2), (0, 5)], 5);
        assert_eq!(rows[0].group, "-10 to -6");
        assert_eq!(rows[1].group, "+0 to +4");
        assert_eq!(rows[1].count, 5);
    }

    #[test]
    fn test_build_longevity_rows_labels() {
        let rows = build_longevity_rows(&[(LongevityBucket::UpTo5, 3), (LongevityBucket::Over60, 1)]);
        assert_eq!(rows[0].group, "1-5 Weeks");
        assert_eq!(rows[1].group, "61+ Weeks");
    }

    #[test]
    fn test_entry_row_json_field_names() {
        let e = entry(1, "Song", Some(1), 2);
        let rows = build_entry_rows(&[&e]);
        let value = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(value["Change"], "=");
        assert_eq!(value["Peak Position"], 1);
        assert_eq!(value["Artists List"], "Artist A; Artist B");
    }
}
