//! Play command - interactive human vs trained agent

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{anyhow, Result};
use clap::Parser;
use rand::Rng;

use crate::{
    nim::{Action, GameState, Rules},
    q_learning::{QLearningAgent, SavedAgent},
};

#[derive(Parser, Debug)]
#[command(about = "Play Nim against a trained agent")]
pub struct PlayArgs {
    /// Saved agent file (missing file plays from an empty table)
    #[arg(long, short = 'a', default_value = "nimq_agent.bin")]
    pub agent: PathBuf,

    /// Fixed starting piles, comma-separated; otherwise piles are randomized
    #[arg(long)]
    pub start: Option<String>,

    /// Number of piles when randomizing the start
    #[arg(long, short = 'p', default_value_t = 3)]
    pub piles: usize,

    /// Upper bound for random initial pile sizes
    #[arg(long, default_value_t = 10)]
    pub max_stones: u32,

    /// Maximum stones removable per turn (only used on cold start;
    /// otherwise the saved agent's rules apply)
    #[arg(long, default_value_t = crate::nim::DEFAULT_MAX_TAKE)]
    pub max_take: u32,

    /// Agent moves first instead of the human
    #[arg(long, default_value_t = false)]
    pub agent_first: bool,
}

/// Parse a human move line: "take" for single-pile, "pile take" otherwise
fn parse_move_line(line: &str, num_piles: usize) -> Result<Action> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match (num_piles, tokens.as_slice()) {
        (1, [take]) => {
            let take = take
                .parse::<u32>()
                .map_err(|_| anyhow!("Enter a number of stones to take"))?;
            Ok(Action::new(0, take))
        }
        (1, _) => Err(anyhow!("Enter one number: how many stones to take")),
        (_, [pile, take]) => {
            let pile = pile
                .parse::<usize>()
                .map_err(|_| anyhow!("Enter a pile index (0-{})", num_piles - 1))?;
            let take = take
                .parse::<u32>()
                .map_err(|_| anyhow!("Enter a number of stones to take"))?;
            Ok(Action::new(pile, take))
        }
        _ => Err(anyhow!("Enter two numbers: pile index and stones to take")),
    }
}

/// Prompt until the human enters a legal move. Malformed or illegal input is
/// reported and re-prompted, never fatal.
fn read_human_move<R: BufRead>(
    input: &mut R,
    rules: &Rules,
    state: &GameState,
) -> Result<(Action, GameState)> {
    loop {
        if state.num_piles() == 1 {
            print!(
                "Your turn. Take 1-{} stones ({} remaining): ",
                rules.max_take.min(state.piles()[0]),
                state.piles()[0]
            );
        } else {
            print!("Your turn. Enter pile and count (piles: {state}): ");
        }
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(anyhow!("Input closed before the game finished"));
        }

        let action = match parse_move_line(line.trim(), state.num_piles()) {
            Ok(action) => action,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match rules.apply(state, action) {
            Ok(next) => return Ok((action, next)),
            Err(e) => {
                println!("Invalid move: {e}");
            }
        }
    }
}

fn load_or_cold_start(args: &PlayArgs) -> Result<(QLearningAgent, Rules)> {
    match SavedAgent::load_optional(&args.agent)? {
        Some(saved) => {
            let agent = saved.to_agent()?;
            println!(
                "Loaded agent from {} ({} Q-values)",
                args.agent.display(),
                agent.q_table_size()
            );
            Ok((agent, saved.rules))
        }
        None => {
            println!(
                "No saved agent at {}; playing from an empty table (cold start).",
                args.agent.display()
            );
            Ok((
                QLearningAgent::new(0.1, 0.9, 0.0),
                Rules::new(args.max_take),
            ))
        }
    }
}

fn initial_state(args: &PlayArgs) -> Result<GameState> {
    match &args.start {
        Some(s) => Ok(GameState::new(super::train::parse_piles(s)?)),
        None => {
            let mut rng = rand::rng();
            Ok(GameState::new(
                (0..args.piles.max(1))
                    .map(|_| rng.random_range(1..=args.max_stones.max(1)))
                    .collect(),
            ))
        }
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let (agent, rules) = load_or_cold_start(&args)?;
    let mut state = initial_state(&args)?;

    if state.is_terminal() {
        return Err(anyhow!("Starting position {state} is already empty"));
    }

    println!("\nStarting piles: {state}");
    println!("Take up to {} stones from one pile; emptying the board wins.\n", rules.max_take);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut human_to_move = !args.agent_first;

    loop {
        if human_to_move {
            let (_, next) = read_human_move(&mut input, &rules, &state)?;
            state = next;
            if state.is_terminal() {
                println!("You took the last stone. You win!");
                return Ok(());
            }
        } else {
            // Exploitation only: the learned table answers directly
            let action = agent.best_move(&rules, &state)?;
            state = rules.apply(&state, action)?;
            println!("Agent: {action} -> {state}");
            if state.is_terminal() {
                println!("Agent took the last stone. Agent wins!");
                return Ok(());
            }
        }
        human_to_move = !human_to_move;
        println!("Piles: {state}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_pile_move() {
        assert_eq!(parse_move_line("2", 1).unwrap(), Action::new(0, 2));
        assert!(parse_move_line("two", 1).is_err());
        assert!(parse_move_line("0 2", 1).is_err());
    }

    #[test]
    fn parse_multi_pile_move() {
        assert_eq!(parse_move_line("1 3", 3).unwrap(), Action::new(1, 3));
        assert!(parse_move_line("3", 3).is_err());
        assert!(parse_move_line("a b", 3).is_err());
    }

    #[test]
    fn reprompts_until_legal_then_applies() {
        let rules = Rules::default();
        let state = GameState::new(vec![2, 4]);
        // Non-numeric, out-of-range pile, oversized take, then a legal move
        let mut input = "x y\n5 1\n1 4\n1 3\n".as_bytes();

        let (action, next) = read_human_move(&mut input, &rules, &state).unwrap();
        assert_eq!(action, Action::new(1, 3));
        assert_eq!(next.piles(), &[2, 1]);
    }

    #[test]
    fn exhausted_input_is_an_error() {
        let rules = Rules::default();
        let state = GameState::new(vec![2]);
        let mut input = "".as_bytes();
        assert!(read_human_move(&mut input, &rules, &state).is_err());
    }
}
