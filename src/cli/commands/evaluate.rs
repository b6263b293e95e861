//! Evaluate command - trained agent vs random baseline

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    nim::{GameState, Rules},
    pipeline::RandomOpponent,
    q_learning::{QLearningAgent, SavedAgent},
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained agent against a random opponent")]
pub struct EvaluateArgs {
    /// Saved agent file
    pub agent: PathBuf,

    /// Number of evaluation games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Number of piles for random starting positions
    #[arg(long, short = 'p', default_value_t = 3)]
    pub piles: usize,

    /// Upper bound for random initial pile sizes
    #[arg(long, default_value_t = 10)]
    pub max_stones: u32,

    /// Agent moves second instead of first
    #[arg(long, default_value_t = false)]
    pub agent_second: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

struct EvalOutcome {
    agent_wins: usize,
    opponent_wins: usize,
}

fn play_game(
    agent: &QLearningAgent,
    opponent: &mut RandomOpponent,
    rules: &Rules,
    mut state: GameState,
    agent_moves_first: bool,
) -> Result<bool> {
    let mut agent_to_move = agent_moves_first;
    while !state.is_terminal() {
        let action = if agent_to_move {
            // Exploitation only during evaluation
            agent.best_move(rules, &state)?
        } else {
            opponent.select_move(rules, &state)?
        };
        state = rules.apply(&state, action)?;
        if state.is_terminal() {
            return Ok(agent_to_move);
        }
        agent_to_move = !agent_to_move;
    }
    unreachable!("loop returns on the terminal move");
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    if args.games == 0 {
        return Err(anyhow!("--games must be at least 1"));
    }

    let saved = SavedAgent::load_from_file(&args.agent)?;
    let agent = saved.to_agent()?;
    let rules = saved.rules;

    println!(
        "Evaluating {} ({} Q-values) over {} games, agent moves {}",
        args.agent.display(),
        agent.q_table_size(),
        args.games,
        if args.agent_second { "second" } else { "first" },
    );

    let mut start_rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let mut opponent = RandomOpponent::new(args.seed.map(|s| s.wrapping_add(1)));

    let mut outcome = EvalOutcome {
        agent_wins: 0,
        opponent_wins: 0,
    };

    for _ in 0..args.games {
        let start = GameState::new(
            (0..args.piles.max(1))
                .map(|_| start_rng.random_range(1..=args.max_stones.max(1)))
                .collect(),
        );
        let agent_won = play_game(&agent, &mut opponent, &rules, start, !args.agent_second)?;
        if agent_won {
            outcome.agent_wins += 1;
        } else {
            outcome.opponent_wins += 1;
        }
    }

    println!("\n=== Evaluation Results ===");
    println!("Games: {}", args.games);
    println!(
        "Agent wins: {} ({:.1}%)",
        outcome.agent_wins,
        outcome.agent_wins as f64 / args.games as f64 * 100.0
    );
    println!("Opponent wins: {}", outcome.opponent_wins);

    Ok(())
}
