//! Q-learning agent: ε-greedy move selection plus episode learning
//!
//! The agent owns the Q-table and the policy for one training session. After
//! each self-play episode it propagates the terminal outcome backward through
//! the recorded transitions with alternating sign: the move that emptied the
//! board receives +1, the move before it -1, and so on. Because one table
//! serves both sides of the self-play game, this single alternating-sign pass
//! substitutes for explicit two-player value iteration.

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::{policy::EpsilonGreedyPolicy, q_table::QTable};
use crate::{
    error::Result,
    nim::{Action, GameState, Rules},
};

/// One observed transition of a self-play episode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: GameState,
    pub action: Action,
    pub next: GameState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct AgentState {
    pub q_table: QTable,
    pub policy: EpsilonGreedyPolicy,
    pub rng_seed: Option<u64>,
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Tabular Q-learning agent for Nim-family games
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    policy: EpsilonGreedyPolicy,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl QLearningAgent {
    /// Create a fresh agent with an empty Q-table
    ///
    /// # Arguments
    ///
    /// * `learning_rate` - α parameter, (0.0, 1.0]
    /// * `discount_factor` - γ parameter, [0.0, 1.0]
    /// * `epsilon` - exploration rate, [0.0, 1.0]
    pub fn new(learning_rate: f64, discount_factor: f64, epsilon: f64) -> Self {
        Self {
            q_table: QTable::new(learning_rate, discount_factor),
            policy: EpsilonGreedyPolicy::new(epsilon),
            rng: build_rng(None),
            rng_seed: None,
        }
    }

    /// Seed the RNG for reproducible training runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
    }

    /// Select a move ε-greedily (training behavior)
    pub fn select_move(&mut self, rules: &Rules, state: &GameState) -> Result<Action> {
        let candidates = rules.legal_actions(state);
        self.policy
            .select(&self.q_table, state, &candidates, &mut self.rng)
    }

    /// Select the best-known move, ignoring exploration (play behavior)
    pub fn best_move(&self, rules: &Rules, state: &GameState) -> Result<Action> {
        let candidates = rules.legal_actions(state);
        self.q_table.best_action(state, &candidates)
    }

    /// Learn from one completed self-play episode.
    ///
    /// Transitions are updated newest-to-oldest so the future-value term for
    /// each `next` state reflects the update just applied to the following
    /// transition. The terminal move gets reward +1 and each preceding move
    /// the negation of the one after it.
    pub fn learn_episode(&mut self, rules: &Rules, history: &[Transition]) {
        let mut reward = 1.0;
        for transition in history.iter().rev() {
            let next_legal = rules.legal_actions(&transition.next);
            self.q_table.q_learning_update(
                transition.state.clone(),
                transition.action,
                reward,
                &transition.next,
                &next_legal,
            );
            reward = -reward;
        }
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn q_table_size(&self) -> usize {
        self.q_table.len()
    }

    pub(crate) fn export_state(&self) -> AgentState {
        AgentState {
            q_table: self.q_table.clone(),
            policy: self.policy,
            rng_seed: self.rng_seed,
        }
    }

    pub(crate) fn from_state(state: AgentState) -> Self {
        Self {
            q_table: state.q_table,
            policy: state.policy,
            rng: build_rng(state.rng_seed),
            rng_seed: state.rng_seed,
        }
    }
}
