use anyhow::Result;
use clap::Args;
use hot100_lib::analysis::{
    category_counts, longevity_distribution, position_change_histogram, top_trajectories,
    HISTOGRAM_BIN, TOP_N,
};
use serde_json::json;

use crate::commands::{build_service, DateArgs};
use crate::output::{
    build_category_rows, build_histogram_rows, build_longevity_rows, build_trajectory_rows,
    print_json, print_section, OutputFormat,
};

#[derive(Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub date: DateArgs,

    /// Number of top positions in the rank trajectory table
    #[arg(long, default_value_t = TOP_N)]
    pub top: u32,

    /// Width of a position-change histogram bin, in spots
    #[arg(long, default_value_t = HISTOGRAM_BIN)]
    pub bin: i32,
}

pub async fn run(args: &StatsArgs, format: &OutputFormat) -> Result<()> {
    let date = args.date.chart_date()?;
    let service = build_service()?;
    let weeks = service.fetch_weeks(&date).await?;
    let (current, prior) = (&weeks.current, &weeks.prior);

    let trajectories = top_trajectories(current, prior, args.top);
    let longevity = longevity_distribution(current);
    let categories = category_counts(current);
    let histogram = position_change_histogram(current, args.bin);
    let bin = if args.bin > 0 { args.bin } else { HISTOGRAM_BIN };

    if let OutputFormat::Json = format {
        print_json(&json!({
            "date": current.date(),
            "previous_date": prior.date(),
            "top_trajectories": trajectories,
            "longevity": build_longevity_rows(&longevity),
            "change_categories": build_category_rows(&categories),
            "position_changes": build_histogram_rows(&histogram, bin),
        }));
        return Ok(());
    }

    eprintln!("Statistics for {} against {}", current.date(), prior.date());
    print_section(
        &format!("Top {} Rank Change (Previous Week vs. Current Week)", args.top),
        build_trajectory_rows(&trajectories),
        format,
    )?;
    print_section("Chart Longevity Distribution", build_longevity_rows(&longevity), format)?;
    print_section("Position Change Categories", build_category_rows(&categories), format)?;
    print_section(
        "Distribution of Position Changes",
        build_histogram_rows(&histogram, bin),
        format,
    )?;

    Ok(())
}
