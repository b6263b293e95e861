//! Tabular Q-learning engine
//!
//! The Q-table maps (state, action) pairs to value estimates, the policy
//! selects moves ε-greedily against it, and the agent ties both together
//! with the backward reward-propagation pass that turns terminal game
//! outcomes into per-move updates.

pub mod agent;
pub mod policy;
pub mod q_table;
pub mod serialization;

pub use agent::{QLearningAgent, Transition};
pub use policy::EpsilonGreedyPolicy;
pub use q_table::QTable;
pub use serialization::{SavedAgent, TrainingMetadata};
