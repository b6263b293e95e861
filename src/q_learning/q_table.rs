//! Q-table implementation for temporal difference learning

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    nim::{Action, GameState},
};

/// Q-table mapping (state, action) pairs to Q-values
///
/// Unseen keys read as 0.0 (open-world default, not an error). The table
/// only ever grows during training; nothing is evicted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    /// Q-values: (state, action) -> Q-value
    q_values: HashMap<(GameState, Action), f64>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl QTable {
    /// Create a new empty Q-table
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            q_values: HashMap::new(),
            learning_rate,
            discount_factor,
        }
    }

    /// Get Q-value for a state-action pair, 0.0 if never written
    pub fn get(&self, state: &GameState, action: Action) -> f64 {
        self.q_values
            .get(&(state.clone(), action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: GameState, action: Action, value: f64) {
        self.q_values.insert((state, action), value);
    }

    /// Maximum Q-value over `candidates`, 0.0 when the slice is empty.
    ///
    /// The empty case is the "future value" of a terminal state.
    pub fn max_q(&self, state: &GameState, candidates: &[Action]) -> f64 {
        candidates
            .iter()
            .map(|&action| self.get(state, action))
            .fold(None, |best: Option<f64>, q| {
                Some(best.map_or(q, |b| b.max(q)))
            })
            .unwrap_or(0.0)
    }

    /// Action in `candidates` with the highest stored value.
    ///
    /// Ties break first-seen under the candidate order, which callers supply
    /// in the deterministic enumeration order of `Rules::legal_actions`.
    pub fn best_action(&self, state: &GameState, candidates: &[Action]) -> Result<Action> {
        let mut iter = candidates.iter();
        let mut best = *iter.next().ok_or_else(|| Error::NoActions {
            state: state.to_string(),
        })?;
        let mut best_q = self.get(state, best);
        for &action in iter {
            let q = self.get(state, action);
            if q > best_q {
                best = action;
                best_q = q;
            }
        }
        Ok(best)
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    pub fn q_learning_update(
        &mut self,
        state: GameState,
        action: Action,
        reward: f64,
        next_state: &GameState,
        next_legal: &[Action],
    ) {
        let current_q = self.get(&state, action);
        let max_next_q = self.max_q(next_state, next_legal);
        let td_target = reward + self.discount_factor * max_next_q;
        let new_q = current_q + self.learning_rate * (td_target - current_q);
        self.set(state, action, new_q);
    }

    /// Total number of Q-values stored
    pub fn len(&self) -> usize {
        self.q_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }
}
