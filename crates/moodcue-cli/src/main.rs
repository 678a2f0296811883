use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "moodcue", version, about = "Moodcue CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate the three mood signal labels
    Mood(commands::mood::MoodArgs),
    /// Compute free slots from a calendar events file
    Slots(commands::slots::SlotsArgs),
    /// Run the full recommendation pipeline
    Recommend(commands::recommend::RecommendArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Mood(args) => commands::mood::run(args),
        Commands::Slots(args) => commands::slots::run(args),
        Commands::Recommend(args) => commands::recommend::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
