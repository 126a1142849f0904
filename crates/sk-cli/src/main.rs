//! CLI frontend for Skilog: race narration and results from an event log.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "skilog",
    about = "Skilog: race narration and results from a biathlon event log",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log reconstruction details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Narrate every event in chronological order
    Log {
        /// Event log file
        #[arg(short, long)]
        events: PathBuf,

        /// Fail on the first malformed line instead of skipping it
        #[arg(long)]
        strict: bool,
    },

    /// Print the results table
    Report {
        /// Race config (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Event log file
        #[arg(short, long)]
        events: PathBuf,

        /// Output format: text, json, table
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Fail on the first malformed line instead of skipping it
        #[arg(long)]
        strict: bool,
    },

    /// Print the race summary, the narration, then the results table
    Run {
        /// Race config (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Event log file
        #[arg(short, long)]
        events: PathBuf,

        /// Fail on the first malformed line instead of skipping it
        #[arg(long)]
        strict: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Log { events, strict } => commands::log::run(&events, strict),
        Commands::Report {
            config,
            events,
            format,
            strict,
        } => commands::report::run(&config, &events, &format, strict),
        Commands::Run {
            config,
            events,
            strict,
        } => commands::run::run(&config, &events, strict),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
