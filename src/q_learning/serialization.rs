//! Save/load support for trained agents
//!
//! The on-disk format is MessagePack: the Q-table is keyed by
//! (state, action) tuples, which JSON maps cannot express. Values round-trip
//! exactly, including every stored f64.

use std::{
    fs::File,
    io::{BufReader, BufWriter, ErrorKind},
    path::Path,
};

use serde::{Deserialize, Serialize};

use super::agent::{AgentState, QLearningAgent};
use crate::{
    error::{Error, Result},
    nim::Rules,
};

/// Provenance recorded alongside a saved agent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingMetadata {
    pub episodes_trained: Option<usize>,
    pub num_piles: Option<usize>,
    pub max_stones: Option<u32>,
    pub seed: Option<u64>,
}

/// Serializable container for a trained agent plus its game rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAgent {
    pub version: u32,
    state: AgentState,
    pub rules: Rules,
    pub metadata: TrainingMetadata,
}

impl SavedAgent {
    pub const VERSION: u32 = 1;

    pub fn from_agent(agent: &QLearningAgent, rules: Rules, metadata: TrainingMetadata) -> Self {
        Self {
            version: Self::VERSION,
            state: agent.export_state(),
            rules,
            metadata,
        }
    }

    /// Reconstruct the agent; fails on a format version this build can't read
    pub fn to_agent(&self) -> Result<QLearningAgent> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        Ok(QLearningAgent::from_state(self.state.clone()))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref()).map_err(|source| Error::Io {
            operation: format!("create file {}", path.as_ref().display()),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, self).map_err(|e| Error::CorruptData {
            path: path.as_ref().display().to_string(),
            message: format!("serialization failed: {e}"),
        })?;

        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(|source| Error::Io {
            operation: format!("open file {}", path.as_ref().display()),
            source,
        })?;
        let reader = BufReader::new(file);

        rmp_serde::decode::from_read(reader).map_err(|e| Error::CorruptData {
            path: path.as_ref().display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load a saved agent if the file exists.
    ///
    /// A missing file is the documented cold-start branch and yields
    /// `Ok(None)`; callers fall back to an empty Q-table. Any other failure,
    /// including a file that exists but does not decode, is an error.
    pub fn load_optional<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        match Self::load_from_file(path.as_ref()) {
            Ok(saved) => Ok(Some(saved)),
            Err(Error::Io { source, .. }) if source.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        nim::{Action, GameState},
        q_learning::agent::Transition,
    };

    fn trained_agent(rules: &Rules) -> QLearningAgent {
        let mut agent = QLearningAgent::new(0.1, 0.9, 0.2).with_seed(5);
        let history = vec![
            Transition {
                state: GameState::new(vec![3, 1]),
                action: Action::new(0, 3),
                next: GameState::new(vec![0, 1]),
            },
            Transition {
                state: GameState::new(vec![0, 1]),
                action: Action::new(1, 1),
                next: GameState::new(vec![0, 0]),
            },
        ];
        agent.learn_episode(rules, &history);
        agent
    }

    #[test]
    fn roundtrip_preserves_every_q_value() {
        let rules = Rules::default();
        let agent = trained_agent(&rules);
        assert!(agent.q_table_size() > 0);

        let saved = SavedAgent::from_agent(&agent, rules, TrainingMetadata::default());
        let bytes = rmp_serde::to_vec(&saved).unwrap();
        let loaded: SavedAgent = rmp_serde::from_slice(&bytes).unwrap();
        let restored = loaded.to_agent().unwrap();

        assert_eq!(restored.q_table(), agent.q_table());
    }

    #[test]
    fn empty_table_roundtrips() {
        let rules = Rules::default();
        let agent = QLearningAgent::new(0.1, 0.9, 0.2);
        let saved = SavedAgent::from_agent(&agent, rules, TrainingMetadata::default());

        let bytes = rmp_serde::to_vec(&saved).unwrap();
        let loaded: SavedAgent = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(loaded.to_agent().unwrap().q_table_size(), 0);
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let rules = Rules::default();
        let agent = QLearningAgent::new(0.1, 0.9, 0.2);
        let mut saved = SavedAgent::from_agent(&agent, rules, TrainingMetadata::default());
        saved.version = 99;

        let err = saved.to_agent().unwrap_err();
        assert!(matches!(err, Error::UnsupportedVersion { found: 99, .. }));
    }

    #[test]
    fn missing_file_is_cold_start_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does_not_exist.nimq");
        assert!(SavedAgent::load_optional(&path).unwrap().is_none());
    }

    #[test]
    fn garbage_file_reports_corrupt_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.nimq");
        std::fs::write(&path, b"not a messagepack agent").unwrap();

        let err = SavedAgent::load_from_file(&path).unwrap_err();
        assert!(matches!(err, Error::CorruptData { .. }));
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.nimq");

        let rules = Rules::default();
        let agent = trained_agent(&rules);
        let saved = SavedAgent::from_agent(&agent, rules, TrainingMetadata::default());
        saved.save_to_file(&path).unwrap();

        let loaded = SavedAgent::load_from_file(&path).unwrap();
        assert_eq!(loaded.to_agent().unwrap().q_table(), agent.q_table());
        assert_eq!(loaded.rules, rules);
    }
}
