//! Game state and action representation

use std::fmt;

use serde::{Deserialize, Serialize};

/// A Nim position: the ordered sequence of remaining pile sizes.
///
/// States are immutable values compared and hashed by content. Pile order is
/// semantically meaningful since piles are distinguished, so `[1, 2]` and
/// `[2, 1]` are different states.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    piles: Vec<u32>,
}

impl GameState {
    /// Create a state from pile sizes
    pub fn new(piles: Vec<u32>) -> Self {
        Self { piles }
    }

    /// Pile sizes in order
    pub fn piles(&self) -> &[u32] {
        &self.piles
    }

    /// Number of piles (fixed for the lifetime of a game)
    pub fn num_piles(&self) -> usize {
        self.piles.len()
    }

    /// Total stones remaining across all piles
    pub fn total_stones(&self) -> u32 {
        self.piles.iter().sum()
    }

    /// True iff every pile is zero (the terminal position)
    pub fn is_terminal(&self) -> bool {
        self.piles.iter().all(|&p| p == 0)
    }

    /// XOR of all pile sizes (the Nim-value of the position)
    ///
    /// Zero means the player to move loses under optimal play. Used by
    /// analysis and tests, not by the learning engine itself.
    pub fn xor_sum(&self) -> u32 {
        self.piles.iter().fold(0, |acc, &p| acc ^ p)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, pile) in self.piles.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{pile}")?;
        }
        write!(f, "]")
    }
}

/// A move: remove `take` stones from pile `pile`.
///
/// Single-pile games use `pile == 0` throughout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub pile: usize,
    pub take: u32,
}

impl Action {
    pub fn new(pile: usize, take: u32) -> Self {
        Self { pile, take }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "take {} from pile {}", self.take, self.pile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_iff_all_piles_zero() {
        assert!(GameState::new(vec![0]).is_terminal());
        assert!(GameState::new(vec![0, 0, 0]).is_terminal());
        assert!(!GameState::new(vec![0, 1, 0]).is_terminal());
    }

    #[test]
    fn states_compare_by_content_and_order() {
        assert_eq!(GameState::new(vec![1, 2]), GameState::new(vec![1, 2]));
        assert_ne!(GameState::new(vec![1, 2]), GameState::new(vec![2, 1]));
    }

    #[test]
    fn xor_sum_of_position() {
        assert_eq!(GameState::new(vec![1, 1]).xor_sum(), 0);
        assert_eq!(GameState::new(vec![1, 1, 1]).xor_sum(), 1);
        assert_eq!(GameState::new(vec![3, 5, 6]).xor_sum(), 0);
    }

    #[test]
    fn display_formats() {
        assert_eq!(GameState::new(vec![3, 5, 7]).to_string(), "[3 5 7]");
        assert_eq!(Action::new(1, 2).to_string(), "take 2 from pile 1");
    }
}
