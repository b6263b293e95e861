//! nimq CLI - train, play, and evaluate Nim Q-learning agents

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nimq")]
#[command(version, about = "Tabular Q-learning for Nim-family games", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent through self-play
    Train(nimq::cli::commands::train::TrainArgs),

    /// Play interactively against a trained agent
    Play(nimq::cli::commands::play::PlayArgs),

    /// Evaluate a trained agent against a random opponent
    Evaluate(nimq::cli::commands::evaluate::EvaluateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => nimq::cli::commands::train::execute(args),
        Commands::Play(args) => nimq::cli::commands::play::execute(args),
        Commands::Evaluate(args) => nimq::cli::commands::evaluate::execute(args),
    }
}
