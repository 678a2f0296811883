use clap::Args;
use moodcue_core::mood;

#[derive(Args)]
pub struct MoodArgs {
    /// Environment classifier label
    #[arg(long)]
    pub environment: Option<String>,
    /// Wearable classifier label
    #[arg(long)]
    pub wearable: Option<String>,
    /// Speech-emotion label
    #[arg(long)]
    pub voice: Option<String>,
}

pub fn run(args: MoodArgs) -> Result<(), Box<dyn std::error::Error>> {
    let moods = mood::aggregate(
        args.environment.as_deref(),
        args.wearable.as_deref(),
        args.voice.as_deref(),
    )?;
    println!("{}", serde_json::to_string_pretty(&moods)?);
    Ok(())
}
