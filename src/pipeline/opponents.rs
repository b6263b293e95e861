//! Baseline opponents for evaluating trained agents

use rand::{rngs::StdRng, seq::IndexedRandom, SeedableRng};

use crate::{
    error::{Error, Result},
    nim::{Action, GameState, Rules},
};

/// Opponent that plays a uniformly random legal move.
///
/// Used by `nimq evaluate` and the convergence tests; it never learns.
pub struct RandomOpponent {
    rng: StdRng,
}

impl RandomOpponent {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self { rng }
    }

    pub fn select_move(&mut self, rules: &Rules, state: &GameState) -> Result<Action> {
        let candidates = rules.legal_actions(state);
        candidates
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| Error::NoActions {
                state: state.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_opponent_plays_legal_moves() {
        let rules = Rules::default();
        let state = GameState::new(vec![4, 2]);
        let mut opponent = RandomOpponent::new(Some(9));

        for _ in 0..50 {
            let action = opponent.select_move(&rules, &state).unwrap();
            assert!(rules.apply(&state, action).is_ok());
        }
    }

    #[test]
    fn terminal_state_yields_no_actions_error() {
        let rules = Rules::default();
        let state = GameState::new(vec![0]);
        let mut opponent = RandomOpponent::new(Some(1));
        assert!(matches!(
            opponent.select_move(&rules, &state),
            Err(Error::NoActions { .. })
        ));
    }
}
