//! drivetheory CLI: practice driving-theory quizzes from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod context;
mod prompt;
mod tables;

use context::Overrides;

#[derive(Parser)]
#[command(
    name = "drivetheory",
    version,
    about = "Driving-theory quizzes with history and a mistake trainer"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for history and mistake trainer state
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    /// Read quizzes from this directory instead of the configured source
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List topics with your best score
    Topics,

    /// Take a topic quiz interactively
    Take {
        /// Topic id (e.g. "19")
        topic: String,

        /// Write an HTML review of the attempt
        #[arg(long)]
        html: Option<PathBuf>,

        /// Shuffle answer options
        #[arg(long)]
        shuffle: bool,
    },

    /// Drill the questions in the mistake trainer
    Train {
        /// Write an HTML review of the drill
        #[arg(long)]
        html: Option<PathBuf>,

        /// Shuffle answer options
        #[arg(long)]
        shuffle: bool,
    },

    /// Show past attempts, newest first
    History {
        /// Only show attempts for this topic
        #[arg(long)]
        topic: Option<String>,
    },

    /// Delete all recorded attempts
    ClearHistory,

    /// Show the mistake trainer deck
    Mistakes,

    /// Empty the mistake trainer deck
    ClearMistakes,

    /// Show a topic's questions with the correct answers marked
    Preview {
        /// Topic id
        topic: String,
    },

    /// List reference resources, or show one
    Resources {
        /// Resource id
        id: Option<String>,
    },

    /// Load every catalog topic and compare question counts
    Check {
        /// Max topics loaded at once
        #[arg(long)]
        parallelism: Option<usize>,
    },

    /// Create a starter drivetheory.toml
    Init,
}

#[tokio::main]
async fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("drivetheory=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let overrides = Overrides {
        config: cli.config,
        state_dir: cli.state_dir,
        data_dir: cli.data_dir,
    };

    let result = match cli.command {
        Commands::Topics => commands::topics::execute(&overrides).await,
        Commands::Take {
            topic,
            html,
            shuffle,
        } => commands::take::execute(&overrides, &topic, html, shuffle).await,
        Commands::Train { html, shuffle } => commands::train::execute(&overrides, html, shuffle),
        Commands::History { topic } => commands::history::execute(&overrides, topic).await,
        Commands::ClearHistory => commands::history::clear(&overrides),
        Commands::Mistakes => commands::mistakes::execute(&overrides),
        Commands::ClearMistakes => commands::mistakes::clear(&overrides),
        Commands::Preview { topic } => commands::preview::execute(&overrides, &topic).await,
        Commands::Resources { id } => commands::resources::execute(&overrides, id).await,
        Commands::Check { parallelism } => commands::check::execute(&overrides, parallelism).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
