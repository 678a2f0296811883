use std::path::PathBuf;

use clap::Args;
use moodcue_core::{compute_free_slots, parse_events, summarize_slots, Config};

use super::common;

#[derive(Args)]
pub struct SlotsArgs {
    /// Path to a calendar events JSON file
    #[arg(long)]
    pub events: PathBuf,
}

pub fn run(args: SlotsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let rows = common::read_events_file(&args.events)?;
    let (events, skipped) = parse_events(&rows);
    if skipped > 0 {
        eprintln!("warning: skipped {skipped} malformed event records");
    }

    let slots = compute_free_slots(&events, &config.availability);
    let summaries = summarize_slots(&slots, config.availability.offset());
    println!("{}", serde_json::to_string_pretty(&summaries)?);
    Ok(())
}
