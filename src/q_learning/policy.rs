//! ε-greedy action selection

use rand::{rngs::StdRng, seq::IndexedRandom, Rng};
use serde::{Deserialize, Serialize};

use super::q_table::QTable;
use crate::{
    error::{Error, Result},
    nim::{Action, GameState},
};

/// ε-greedy policy over a Q-table.
///
/// With probability `epsilon` a uniformly random legal action is chosen
/// (exploration); otherwise the best-known action (exploitation). During pure
/// play the exploration rate is forced to zero via [`EpsilonGreedyPolicy::greedy`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EpsilonGreedyPolicy {
    epsilon: f64,
}

impl EpsilonGreedyPolicy {
    /// Create a policy with the given exploration rate in [0, 1]
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Exploitation-only policy (ε = 0), used for play and evaluation
    pub fn greedy() -> Self {
        Self { epsilon: 0.0 }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Select an action from `candidates`.
    ///
    /// Callers pass candidates in the enumeration order of
    /// `Rules::legal_actions` so exploitation tie-breaking stays
    /// deterministic. Errors with `NoActions` when `candidates` is empty;
    /// callers must not invoke this on terminal states.
    pub fn select(
        &self,
        q_table: &QTable,
        state: &GameState,
        candidates: &[Action],
        rng: &mut StdRng,
    ) -> Result<Action> {
        if candidates.is_empty() {
            return Err(Error::NoActions {
                state: state.to_string(),
            });
        }

        if rng.random::<f64>() < self.epsilon {
            // Explore: uniformly random legal action
            Ok(*candidates.choose(rng).expect("candidates checked non-empty"))
        } else {
            // Exploit: best-known action
            q_table.best_action(state, candidates)
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::nim::Rules;

    #[test]
    fn greedy_policy_is_deterministic() {
        let mut qtable = QTable::new(0.1, 0.9);
        let state = GameState::new(vec![4]);
        qtable.set(state.clone(), Action::new(0, 3), 2.0);

        let policy = EpsilonGreedyPolicy::greedy();
        let candidates = Rules::default().legal_actions(&state);
        let mut rng = StdRng::seed_from_u64(0);

        for _ in 0..20 {
            let action = policy.select(&qtable, &state, &candidates, &mut rng).unwrap();
            assert_eq!(action, Action::new(0, 3));
        }
    }

    #[test]
    fn full_exploration_stays_legal() {
        let qtable = QTable::new(0.1, 0.9);
        let state = GameState::new(vec![2, 3]);
        let rules = Rules::default();
        let candidates = rules.legal_actions(&state);

        let policy = EpsilonGreedyPolicy::new(1.0);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let action = policy.select(&qtable, &state, &candidates, &mut rng).unwrap();
            assert!(rules.apply(&state, action).is_ok());
        }
    }

    #[test]
    fn empty_candidates_is_an_error() {
        let qtable = QTable::new(0.1, 0.9);
        let state = GameState::new(vec![0]);
        let policy = EpsilonGreedyPolicy::new(0.5);
        let mut rng = StdRng::seed_from_u64(1);

        let err = policy.select(&qtable, &state, &[], &mut rng).unwrap_err();
        assert!(matches!(err, Error::NoActions { .. }));
    }
}
