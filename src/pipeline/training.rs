//! Self-play training loop
//!
//! Each episode starts from the configured piles and lets the agent pick
//! every move for both sides, recording (state, action, next) transitions.
//! When the board empties, the episode history is handed to the agent for
//! the backward alternating-sign reward pass. An illegal action surfacing
//! inside this loop would mean a defect in action enumeration, so it
//! propagates as a fatal error instead of being retried.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::observers::Observer;
use crate::{
    error::{Error, Result},
    nim::{GameState, Rules},
    q_learning::{QLearningAgent, Transition},
};

/// How each episode's starting piles are chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PileInit {
    /// Each pile drawn uniformly from 1..=max_stones per episode
    Random { num_piles: usize, max_stones: u32 },
    /// Every episode starts from the same position
    Fixed(Vec<u32>),
}

impl PileInit {
    fn initial_state(&self, rng: &mut StdRng) -> GameState {
        match self {
            PileInit::Random {
                num_piles,
                max_stones,
            } => GameState::new(
                (0..*num_piles)
                    .map(|_| rng.random_range(1..=*max_stones))
                    .collect(),
            ),
            PileInit::Fixed(piles) => GameState::new(piles.clone()),
        }
    }
}

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of self-play episodes
    pub episodes: usize,

    /// Starting-pile scheme
    pub start: PileInit,

    /// Game rules shared by training and play
    pub rules: Rules,

    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 10_000,
            start: PileInit::Random {
                num_piles: 3,
                max_stones: 10,
            },
            rules: Rules::default(),
            seed: None,
        }
    }
}

impl TrainingConfig {
    /// Check structural invariants before training starts
    pub fn validate(&self) -> Result<()> {
        if self.rules.max_take == 0 {
            return Err(Error::InvalidConfiguration {
                message: "max_take must be at least 1".to_string(),
            });
        }
        match &self.start {
            PileInit::Random {
                num_piles,
                max_stones,
            } => {
                if *num_piles == 0 {
                    return Err(Error::InvalidConfiguration {
                        message: "num_piles must be at least 1".to_string(),
                    });
                }
                if *max_stones == 0 {
                    return Err(Error::InvalidConfiguration {
                        message: "max_stones must be at least 1".to_string(),
                    });
                }
            }
            PileInit::Fixed(piles) => {
                if piles.is_empty() {
                    return Err(Error::InvalidConfiguration {
                        message: "fixed start must have at least one pile".to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Which side of a self-play episode moved first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mover {
    First,
    Second,
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes played
    pub total_episodes: usize,

    /// Episodes won by the side that moved first
    pub first_mover_wins: usize,

    /// Episodes won by the side that moved second
    pub second_mover_wins: usize,

    /// First-mover win rate
    pub first_mover_win_rate: f64,

    /// Total transitions recorded across all episodes
    pub total_moves: usize,

    /// Q-table entries after training
    pub states_learned: usize,
}

impl TrainingResult {
    fn new(
        total_episodes: usize,
        first_mover_wins: usize,
        second_mover_wins: usize,
        total_moves: usize,
        states_learned: usize,
    ) -> Self {
        let decided = first_mover_wins + second_mover_wins;
        let first_mover_win_rate = if decided > 0 {
            first_mover_wins as f64 / decided as f64
        } else {
            0.0
        };
        Self {
            total_episodes,
            first_mover_wins,
            second_mover_wins,
            first_mover_win_rate,
            total_moves,
            states_learned,
        }
    }
}

/// Self-play training pipeline
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run self-play training, mutating the agent's Q-table in place.
    ///
    /// The agent is exclusively borrowed for the whole run; with
    /// `episodes = 0` the table is returned untouched.
    pub fn run(&mut self, agent: &mut QLearningAgent) -> Result<TrainingResult> {
        self.config.validate()?;

        let mut env_rng = match self.config.seed {
            Some(seed) => {
                agent.reseed(seed);
                StdRng::seed_from_u64(seed.wrapping_add(1))
            }
            None => StdRng::from_rng(&mut rand::rng()),
        };

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut first_mover_wins = 0;
        let mut second_mover_wins = 0;
        let mut total_moves = 0;

        for episode in 0..self.config.episodes {
            let history = self.play_episode(agent, &mut env_rng)?;

            // The side making the final (board-emptying) move wins. Movers
            // alternate starting with First, so an odd-length episode was won
            // by the first mover.
            let winner = if history.is_empty() {
                None
            } else if history.len() % 2 == 1 {
                Some(Mover::First)
            } else {
                Some(Mover::Second)
            };

            match winner {
                Some(Mover::First) => first_mover_wins += 1,
                Some(Mover::Second) => second_mover_wins += 1,
                None => {}
            }
            total_moves += history.len();

            agent.learn_episode(&self.config.rules, &history);

            for observer in &mut self.observers {
                observer.on_episode_end(episode, history.len(), winner)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(
            self.config.episodes,
            first_mover_wins,
            second_mover_wins,
            total_moves,
            agent.q_table_size(),
        ))
    }

    fn play_episode(
        &self,
        agent: &mut QLearningAgent,
        env_rng: &mut StdRng,
    ) -> Result<Vec<Transition>> {
        let rules = &self.config.rules;
        let mut state = self.config.start.initial_state(env_rng);
        let mut history = Vec::new();

        while !state.is_terminal() {
            let action = agent.select_move(rules, &state)?;
            let next = rules.apply(&state, action)?;
            history.push(Transition {
                state,
                action,
                next: next.clone(),
            });
            state = next;
        }

        Ok(history)
    }
}
