//! Self-play training pipeline and evaluation baselines

pub mod observers;
pub mod opponents;
pub mod training;

pub use observers::{MetricsObserver, Observer, ProgressObserver};
pub use opponents::RandomOpponent;
pub use training::{Mover, PileInit, TrainingConfig, TrainingPipeline, TrainingResult};
