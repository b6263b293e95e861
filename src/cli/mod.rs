//! CLI infrastructure for the nimq toolkit
//!
//! Commands for training an agent through self-play, playing against it
//! interactively, and evaluating it against a random baseline.

pub mod commands;
