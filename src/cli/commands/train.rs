//! Train command - self-play Q-learning

use std::{fs::File, path::PathBuf};

use anyhow::{anyhow, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    nim::Rules,
    pipeline::{MetricsObserver, PileInit, ProgressObserver, TrainingConfig, TrainingPipeline},
    q_learning::{QLearningAgent, SavedAgent, TrainingMetadata},
};

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent through self-play")]
pub struct TrainArgs {
    /// Number of piles (1 for single-pile Nim)
    #[arg(long, short = 'p', default_value_t = 3)]
    pub piles: usize,

    /// Upper bound for random initial pile sizes
    #[arg(long, default_value_t = 10)]
    pub max_stones: u32,

    /// Maximum stones removable per turn
    #[arg(long, default_value_t = crate::nim::DEFAULT_MAX_TAKE)]
    pub max_take: u32,

    /// Fixed starting piles, comma-separated (e.g. "10" or "3,5,7");
    /// overrides --piles/--max-stones
    #[arg(long)]
    pub start: Option<String>,

    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = 10_000)]
    pub episodes: usize,

    /// Learning rate α (0.0-1.0]
    #[arg(long, default_value_t = 0.1)]
    pub learning_rate: f64,

    /// Discount factor γ [0.0-1.0]
    #[arg(long, default_value_t = 0.9)]
    pub discount: f64,

    /// Exploration rate ε [0.0-1.0]
    #[arg(long, default_value_t = 0.2)]
    pub epsilon: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file for the trained agent
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Suppress the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    episodes: usize,
    first_mover_wins: usize,
    second_mover_wins: usize,
    first_mover_win_rate: f64,
    states_learned: usize,
    learning_rate: f64,
    discount: f64,
    epsilon: f64,
    seed: Option<u64>,
}

/// Parse fixed starting piles from a comma-separated list
pub(crate) fn parse_piles(s: &str) -> Result<Vec<u32>> {
    let piles: Vec<u32> = s
        .split(',')
        .map(|v| {
            v.trim()
                .parse::<u32>()
                .map_err(|_| anyhow!("Invalid pile size '{}' in '{s}'", v.trim()))
        })
        .collect::<Result<Vec<_>>>()?;

    if piles.is_empty() {
        return Err(anyhow!("Starting piles must not be empty"));
    }
    Ok(piles)
}

fn validate_hyperparameters(args: &TrainArgs) -> Result<()> {
    if !(args.learning_rate > 0.0 && args.learning_rate <= 1.0) {
        return Err(anyhow!(
            "--learning-rate must be in (0.0, 1.0], got {}",
            args.learning_rate
        ));
    }
    if !(0.0..=1.0).contains(&args.discount) {
        return Err(anyhow!(
            "--discount must be in [0.0, 1.0], got {}",
            args.discount
        ));
    }
    if !(0.0..=1.0).contains(&args.epsilon) {
        return Err(anyhow!(
            "--epsilon must be in [0.0, 1.0], got {}",
            args.epsilon
        ));
    }
    Ok(())
}

pub fn execute(args: TrainArgs) -> Result<()> {
    validate_hyperparameters(&args)?;

    let start = match &args.start {
        Some(s) => PileInit::Fixed(parse_piles(s)?),
        None => PileInit::Random {
            num_piles: args.piles,
            max_stones: args.max_stones,
        },
    };

    let config = TrainingConfig {
        episodes: args.episodes,
        start: start.clone(),
        rules: Rules::new(args.max_take),
        seed: args.seed,
    };

    let mut agent = QLearningAgent::new(args.learning_rate, args.discount, args.epsilon);
    if let Some(seed) = args.seed {
        agent = agent.with_seed(seed);
    }

    let mut pipeline = TrainingPipeline::new(config.clone());
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    pipeline = pipeline.with_observer(Box::new(MetricsObserver::new()));

    let result = pipeline.run(&mut agent)?;

    println!("\n=== Training Complete ===");
    println!("Episodes: {}", result.total_episodes);
    println!(
        "First-mover wins: {} ({:.1}%)",
        result.first_mover_wins,
        result.first_mover_win_rate * 100.0
    );
    println!("Second-mover wins: {}", result.second_mover_wins);
    println!("Q-values learned: {}", result.states_learned);

    if let Some(output_path) = &args.output {
        let metadata = TrainingMetadata {
            episodes_trained: Some(result.total_episodes),
            num_piles: Some(match &start {
                PileInit::Random { num_piles, .. } => *num_piles,
                PileInit::Fixed(piles) => piles.len(),
            }),
            max_stones: Some(args.max_stones),
            seed: args.seed,
        };

        let saved = SavedAgent::from_agent(&agent, config.rules, metadata);
        saved.save_to_file(output_path)?;
        println!("\nAgent saved to: {}", output_path.display());
    }

    if let Some(summary_path) = &args.summary {
        if let Some(parent) = summary_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let summary = TrainingSummaryFile {
            episodes: result.total_episodes,
            first_mover_wins: result.first_mover_wins,
            second_mover_wins: result.second_mover_wins,
            first_mover_win_rate: result.first_mover_win_rate,
            states_learned: result.states_learned,
            learning_rate: args.learning_rate,
            discount: args.discount,
            epsilon: args.epsilon,
            seed: args.seed,
        };
        let file = File::create(summary_path)?;
        to_writer_pretty(file, &summary)?;
        println!("Summary written to {}", summary_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_piles_accepts_lists() {
        assert_eq!(parse_piles("10").unwrap(), vec![10]);
        assert_eq!(parse_piles("3, 5, 7").unwrap(), vec![3, 5, 7]);
    }

    #[test]
    fn parse_piles_rejects_garbage() {
        assert!(parse_piles("3,x").is_err());
        assert!(parse_piles("-1").is_err());
    }

    #[test]
    fn progress_bar_is_on_by_default_and_can_be_disabled() {
        let args = TrainArgs::parse_from(["nimq-train"]);
        assert!(!args.no_progress);

        let args = TrainArgs::parse_from(["nimq-train", "--no-progress"]);
        assert!(args.no_progress);
    }
}
