use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;
use moodcue_core::{
    Config, RawEventRecord, RecommendationEngine, SignalReadings, SourceClient,
};

use super::common;

#[derive(Args)]
pub struct RecommendArgs {
    /// Path to a calendar events JSON file
    #[arg(long, conflicts_with = "live")]
    pub events: Option<PathBuf>,
    /// Path to a candidate catalog JSON file
    #[arg(long)]
    pub catalog: PathBuf,
    /// Environment classifier label
    #[arg(long, conflicts_with = "live")]
    pub environment: Option<String>,
    /// Wearable classifier label
    #[arg(long, conflicts_with = "live")]
    pub wearable: Option<String>,
    /// Speech-emotion label
    #[arg(long, conflicts_with = "live")]
    pub voice: Option<String>,
    /// Fetch moods and calendar from the configured collaborators
    #[arg(long)]
    pub live: bool,
    /// Fixed clock for past-window filtering (RFC 3339); defaults to now
    #[arg(long)]
    pub now: Option<String>,
}

pub fn run(args: RecommendArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let raw_catalog = common::read_catalog_file(&args.catalog)?;

    let (signals, raw_events): (SignalReadings, Vec<RawEventRecord>) = if args.live {
        let client = SourceClient::new(config.sources.clone());
        let snapshot = tokio::runtime::Runtime::new()?.block_on(client.fetch_snapshot())?;
        (
            SignalReadings {
                environment_mood: Some(snapshot.environment_mood),
                wearable_mood: Some(snapshot.wearable_mood),
                voice_mood: Some(snapshot.voice_mood),
            },
            snapshot.events,
        )
    } else {
        let events_path = args
            .events
            .as_ref()
            .ok_or("either --events or --live is required")?;
        (
            SignalReadings {
                environment_mood: args.environment,
                wearable_mood: args.wearable,
                voice_mood: args.voice,
            },
            common::read_events_file(events_path)?,
        )
    };

    let now = match args.now.as_deref() {
        Some(value) => DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc),
        None => Utc::now(),
    };

    let engine = RecommendationEngine::new(config.availability.clone());
    let recommendation = engine.recommend(&signals, &raw_events, &raw_catalog, now)?;
    println!("{}", serde_json::to_string_pretty(&recommendation)?);
    Ok(())
}
