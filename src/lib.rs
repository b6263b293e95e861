//! Tabular Q-learning for Nim-family take-away games
//!
//! This crate provides:
//! - A unified single- and multi-pile Nim game model
//! - A tabular Q-learning agent trained through self-play
//! - A training pipeline with composable observers
//! - Save/load of trained agents and an interactive play CLI

pub mod cli;
pub mod error;
pub mod nim;
pub mod pipeline;
pub mod q_learning;

pub use error::{Error, Result};
pub use nim::{Action, GameState, Rules};
pub use pipeline::{PileInit, TrainingConfig, TrainingPipeline, TrainingResult};
pub use q_learning::{EpsilonGreedyPolicy, QLearningAgent, QTable, SavedAgent, TrainingMetadata};
