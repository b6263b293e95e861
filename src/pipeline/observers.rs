//! Observer pattern for the training pipeline
//!
//! Observers allow composable data collection during training without
//! coupling the self-play loop to specific output formats.

use indicatif::{ProgressBar, ProgressStyle};

use super::training::Mover;
use crate::{Error, Result};

/// Observer trait for monitoring training
///
/// Methods are called in order: `on_training_start` once, then
/// `on_episode_end` after every episode, then `on_training_end` once.
/// All methods default to no-ops.
pub trait Observer: Send {
    /// Called once before the first episode
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each episode's reward propagation.
    ///
    /// `winner` is `None` only for degenerate episodes that started on an
    /// already-empty board.
    fn on_episode_end(
        &mut self,
        _episode: usize,
        _moves: usize,
        _winner: Option<Mover>,
    ) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Progress bar observer - shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    first_mover_wins: usize,
    second_mover_wins: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            first_mover_wins: 0,
            second_mover_wins: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        episode: usize,
        _moves: usize,
        winner: Option<Mover>,
    ) -> Result<()> {
        match winner {
            Some(Mover::First) => self.first_mover_wins += 1,
            Some(Mover::Second) => self.second_mover_wins += 1,
            None => {}
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(format!(
                "P1:{} P2:{}",
                self.first_mover_wins, self.second_mover_wins
            ));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!(
                "P1:{} P2:{}",
                self.first_mover_wins, self.second_mover_wins
            ));
        }
        Ok(())
    }
}

/// Metrics observer - tallies outcomes and episode lengths
pub struct MetricsObserver {
    first_mover_wins: usize,
    second_mover_wins: usize,
    total_episodes: usize,
    total_moves: usize,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self {
            first_mover_wins: 0,
            second_mover_wins: 0,
            total_episodes: 0,
            total_moves: 0,
        }
    }

    pub fn first_mover_win_rate(&self) -> f64 {
        let decided = self.first_mover_wins + self.second_mover_wins;
        if decided == 0 {
            0.0
        } else {
            self.first_mover_wins as f64 / decided as f64
        }
    }

    pub fn average_episode_length(&self) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            self.total_moves as f64 / self.total_episodes as f64
        }
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(
        &mut self,
        _episode: usize,
        moves: usize,
        winner: Option<Mover>,
    ) -> Result<()> {
        match winner {
            Some(Mover::First) => self.first_mover_wins += 1,
            Some(Mover::Second) => self.second_mover_wins += 1,
            None => {}
        }
        self.total_episodes += 1;
        self.total_moves += moves;
        Ok(())
    }
}
