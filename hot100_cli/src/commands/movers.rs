use std::collections::BTreeMap;

use anyhow::Result;
use clap::Args;
use hot100_lib::analysis::{dropouts, gainers, losers, new_entries, peakers, re_entries};
use hot100_lib::ChartEntry;

use crate::commands::{build_service, DateArgs};
use crate::output::{
    build_entry_rows, build_section_rows, print_json, print_rows, print_section, OutputFormat,
};

#[derive(Args)]
pub struct MoversArgs {
    #[command(flatten)]
    pub date: DateArgs,
}

pub async fn run(args: &MoversArgs, format: &OutputFormat) -> Result<()> {
    let date = args.date.chart_date()?;
    let service = build_service()?;
    let weeks = service.fetch_weeks(&date).await?;
    let (current, prior) = (&weeks.current, &weeks.prior);

    eprintln!(
        "Movers for {} against {}",
        current.date(),
        prior.date()
    );

    let sections: Vec<(&str, Vec<&ChartEntry>)> = vec![
        ("Peakers (New Peak or Re-Peak)", peakers(current)),
        ("Gainers (10+ Spots Up)", gainers(current)),
        ("Losers (10+ Spots Down)", losers(current)),
        ("Re-Entries This Week", re_entries(current)),
        ("New Entries This Week", new_entries(current)),
        ("Dropouts (Songs that left the chart)", dropouts(current, prior)),
    ];

    match format {
        OutputFormat::Json => {
            let by_section: BTreeMap<&str, &Vec<&ChartEntry>> =
                sections.iter().map(|(name, entries)| (*name, entries)).collect();
            print_json(&by_section);
        }
        OutputFormat::Csv => print_rows(build_section_rows(&sections), format)?,
        _ => {
            for (name, entries) in &sections {
                print_section(name, build_entry_rows(entries), format)?;
            }
        }
    }

    Ok(())
}
