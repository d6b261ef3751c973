mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "hot100")]
#[command(about = "Scrape the Billboard Hot 100 and summarize week-over-week movement")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the full chart for a week
    Chart(commands::chart::ChartArgs),
    /// Peakers, big gainers and losers, new entries, re-entries and dropouts
    Movers(commands::movers::MoversArgs),
    /// Longevity, change categories, change histogram and top-N trajectories
    Stats(commands::stats::StatsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hot100=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(cli.output.as_str());

    match &cli.command {
        Commands::Chart(args) => commands::chart::run(args, &format).await?,
        Commands::Movers(args) => commands::movers::run(args, &format).await?,
        Commands::Stats(args) => commands::stats::run(args, &format).await?,
    }

    Ok(())
}
