use anyhow::Result;
use clap::Args;

use crate::commands::{build_service, DateArgs};
use crate::output::{build_entry_rows, print_json, print_rows, OutputFormat};

#[derive(Args)]
pub struct ChartArgs {
    #[command(flatten)]
    pub date: DateArgs,

    /// Only show the top N positions
    #[arg(long)]
    pub top: Option<u32>,
}

pub async fn run(args: &ChartArgs, format: &OutputFormat) -> Result<()> {
    let date = args.date.chart_date()?;
    let service = build_service()?;
    let snapshot = service.fetch_chart(&date).await?;

    let entries: Vec<_> = snapshot
        .iter()
        .filter(|e| args.top.map_or(true, |n| e.rank <= n))
        .collect();

    eprintln!("Hot 100 for {} ({} entries)", snapshot.date(), snapshot.len());

    match format {
        OutputFormat::Json => print_json(&entries),
        _ => print_rows(build_entry_rows(&entries), format)?,
    }

    Ok(())
}
