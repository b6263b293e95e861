//! Nim game implementation
//!
//! Take-away games of the Nim family: one or more piles of stones, players
//! alternate removing stones from a single pile, and the player who empties
//! the board wins. Single-pile Nim is the one-element case of the same model.

pub mod rules;
pub mod state;

pub use rules::{Rules, DEFAULT_MAX_TAKE};
pub use state::{Action, GameState};
