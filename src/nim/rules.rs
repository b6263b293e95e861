//! Move legality and state transitions

use serde::{Deserialize, Serialize};

use super::state::{Action, GameState};
use crate::error::{Error, Result};

/// Default per-turn removal cap (classic "take 1, 2, or 3" Nim)
pub const DEFAULT_MAX_TAKE: u32 = 3;

/// Game rules: the per-turn removal cap.
///
/// The cap applies uniformly to every pile. A take is legal when the pile
/// exists and `1 <= take <= min(max_take, remaining)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub max_take: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_take: DEFAULT_MAX_TAKE,
        }
    }
}

impl Rules {
    pub fn new(max_take: u32) -> Self {
        Self { max_take }
    }

    /// Enumerate every legal action for `state`.
    ///
    /// Deterministic order: ascending pile index, then ascending take count.
    /// The ordering is load-bearing: Q-table tie-breaking is first-seen under
    /// this enumeration. Empty exactly when `state` is terminal.
    pub fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        let mut actions = Vec::new();
        for (pile, &remaining) in state.piles().iter().enumerate() {
            let cap = remaining.min(self.max_take);
            for take in 1..=cap {
                actions.push(Action::new(pile, take));
            }
        }
        actions
    }

    /// Apply `action` to `state`, producing the successor state.
    ///
    /// Pure function: the input state is unchanged. Fails when the pile index
    /// is out of range or the take count violates the legality constraints.
    pub fn apply(&self, state: &GameState, action: Action) -> Result<GameState> {
        let piles = state.piles();
        let remaining = match piles.get(action.pile) {
            Some(&remaining) => remaining,
            None => {
                return Err(Error::PileOutOfRange {
                    pile: action.pile,
                    num_piles: piles.len(),
                });
            }
        };

        if action.take == 0 || action.take > remaining || action.take > self.max_take {
            return Err(Error::InvalidTake {
                pile: action.pile,
                take: action.take,
                remaining,
                max_take: self.max_take,
            });
        }

        let mut next = piles.to_vec();
        next[action.pile] -= action.take;
        Ok(GameState::new(next))
    }
}
