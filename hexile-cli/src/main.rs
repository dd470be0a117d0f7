//! HEXILE CLI - Command-line interface
//!
//! Commands:
//! - play: Play an interactive game in the terminal
//! - selfplay: Run seeded random self-play games and report statistics
//! - show: Render a saved game snapshot

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod display;
mod notation;
mod play;
mod selfplay;

#[derive(Parser)]
#[command(name = "hexile")]
#[command(about = "HEXILE hex-tile territory game")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game
    Play {
        /// Resume from a saved snapshot
        #[arg(long, value_name = "FILE")]
        load: Option<PathBuf>,
    },
    /// Run random self-play games
    Selfplay {
        #[arg(long, default_value = "10")]
        games: usize,
        #[arg(long, default_value = "42")]
        seed: u64,
        /// Safety cap on moves per game
        #[arg(long, default_value = "400")]
        max_moves: usize,
    },
    /// Render a saved snapshot
    Show {
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play { load } => play::run(load),
        Commands::Selfplay {
            games,
            seed,
            max_moves,
        } => selfplay::run(games, seed, max_moves),
        Commands::Show { file } => play::show(&file),
    }
}
