//! Persisted machine snapshots.
//!
//! `COMPILE` writes the current machine as a checkpoint and `LOAD` restores
//! it. The file extension picks the encoding: `.fs` is compact bincode,
//! `.json` is readable JSON. A checkpoint wraps the machine in a small
//! envelope (format version, id, creation time) and is checked on restore,
//! so a damaged or foreign file never replaces the live machine.

use crate::core::Fsm;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use stillwater::validation::Validation;
use tracing::info;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// File extension of binary checkpoints.
pub const BINARY_EXTENSION: &str = "fs";

/// File extension of JSON checkpoints.
pub const JSON_EXTENSION: &str = "json";

/// Serializable snapshot of a whole machine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// The machine itself
    pub machine: Fsm,
}

impl Checkpoint {
    /// Snapshot `machine` now.
    pub fn new(machine: Fsm) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            machine,
        }
    }

    /// Encode in the binary `.fs` format.
    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode and verify a binary checkpoint.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.verify()
    }

    /// Encode as pretty-printed JSON, for inspection and tooling.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode and verify a JSON checkpoint.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.verify()
    }

    /// Write the checkpoint to `path`, as JSON when the extension is
    /// `.json` and as binary otherwise.
    ///
    /// The bytes go to a sibling temporary file that is renamed over `path`
    /// once complete, so readers never observe a partial checkpoint.
    pub fn save(&self, path: &Path) -> Result<(), CheckpointError> {
        let bytes = if is_json_path(path) {
            self.to_json()?.into_bytes()
        } else {
            self.to_binary()?
        };
        let mut staging = path.as_os_str().to_owned();
        staging.push(".tmp");
        let staging = Path::new(&staging);

        let io_error = |source| CheckpointError::Io {
            path: path.to_path_buf(),
            source,
        };
        fs::write(staging, &bytes).map_err(io_error)?;
        if let Err(source) = fs::rename(staging, path) {
            let _ = fs::remove_file(staging);
            return Err(io_error(source));
        }

        info!(path = %path.display(), id = %self.id, bytes = bytes.len(), "checkpoint saved");
        Ok(())
    }

    /// Read and verify a checkpoint from `path`, decoding by extension.
    pub fn load(path: &Path) -> Result<Self, CheckpointError> {
        let bytes = fs::read(path).map_err(|source| CheckpointError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let checkpoint = if is_json_path(path) {
            let json = String::from_utf8(bytes)
                .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
            Self::from_json(&json)?
        } else {
            Self::from_binary(&bytes)?
        };
        info!(path = %path.display(), id = %checkpoint.id, "checkpoint loaded");
        Ok(checkpoint)
    }

    /// Take the restored machine out of the envelope.
    pub fn into_machine(self) -> Fsm {
        self.machine
    }

    fn verify(self) -> Result<Self, CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        match self.machine.validate() {
            Validation::Success(_) => Ok(self),
            Validation::Failure(errors) => Err(CheckpointError::ValidationFailed(
                errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            )),
        }
    }
}

/// Check whether `path` names a binary checkpoint by its extension.
pub fn is_binary_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == BINARY_EXTENSION)
}

/// Check whether `path` names a JSON checkpoint by its extension.
pub fn is_json_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == JSON_EXTENSION)
}

/// Check whether `path` names a checkpoint in either encoding.
pub fn is_checkpoint_path(path: &Path) -> bool {
    is_binary_path(path) || is_json_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::FsmBuilder;
    use std::path::PathBuf;

    fn sample_machine() -> Fsm {
        FsmBuilder::new()
            .symbols(["0", "1"])
            .states(["s0", "s1"])
            .initial("s0")
            .finals(["s1"])
            .transition("0", "s0", "s0")
            .transition("1", "s0", "s1")
            .transition("1", "s1", "s1")
            .transition("0", "s1", "s0")
            .build()
            .unwrap()
    }

    #[test]
    fn new_checkpoint_uses_current_version() {
        let checkpoint = Checkpoint::new(Fsm::new());
        assert_eq!(checkpoint.version, CHECKPOINT_VERSION);
        assert!(!checkpoint.id.is_empty());
    }

    #[test]
    fn binary_roundtrip_preserves_machine() {
        let machine = sample_machine();
        let checkpoint = Checkpoint::new(machine.clone());

        let bytes = checkpoint.to_binary().unwrap();
        let restored = Checkpoint::from_binary(&bytes).unwrap();

        assert_eq!(restored.id, checkpoint.id);
        assert_eq!(restored.machine, machine);
        assert_eq!(
            restored.machine.execute("110").unwrap(),
            machine.execute("110").unwrap()
        );
    }

    #[test]
    fn json_roundtrip_preserves_machine() {
        let machine = sample_machine();
        let json = Checkpoint::new(machine.clone()).to_json().unwrap();
        let restored = Checkpoint::from_json(&json).unwrap();
        assert_eq!(restored.into_machine(), machine);
    }

    #[test]
    fn save_and_load_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("machine.fs");

        Checkpoint::new(sample_machine()).save(&path).unwrap();
        let restored = Checkpoint::load(&path).unwrap();

        assert_eq!(restored.machine, sample_machine());
        assert!(!dir.path().join("machine.fs.tmp").exists());
    }

    #[test]
    fn json_file_is_readable_and_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("machine.json");

        Checkpoint::new(sample_machine()).save(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"initial\": \"s0\""));

        let restored = Checkpoint::load(&path).unwrap();
        assert_eq!(restored.into_machine(), sample_machine());
    }

    #[test]
    fn binary_bytes_under_json_name_fail_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("machine.json");
        std::fs::write(&path, Checkpoint::new(sample_machine()).to_binary().unwrap()).unwrap();

        assert!(matches!(
            Checkpoint::load(&path),
            Err(CheckpointError::DeserializationFailed(_))
        ));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = Checkpoint::load(&PathBuf::from("/definitely/not/here.fs"));
        assert!(matches!(result, Err(CheckpointError::Io { .. })));
    }

    #[test]
    fn garbage_bytes_fail_to_deserialize() {
        let result = Checkpoint::from_binary(b"not a checkpoint");
        assert!(matches!(
            result,
            Err(CheckpointError::DeserializationFailed(_))
        ));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut checkpoint = Checkpoint::new(sample_machine());
        checkpoint.version = CHECKPOINT_VERSION + 1;
        let bytes = checkpoint.to_binary().unwrap();

        assert!(matches!(
            Checkpoint::from_binary(&bytes),
            Err(CheckpointError::UnsupportedVersion { found: 2, supported: 1 })
        ));
    }

    #[test]
    fn dangling_initial_state_fails_validation() {
        let json = r#"{
            "version": 1,
            "id": "handmade",
            "timestamp": "2024-01-01T00:00:00Z",
            "machine": {
                "symbols": ["a"],
                "states": ["p"],
                "initial": "q",
                "finals": [],
                "transitions": {}
            }
        }"#;

        match Checkpoint::from_json(json) {
            Err(CheckpointError::ValidationFailed(message)) => {
                assert!(message.contains("State not declared: q"));
            }
            other => panic!("Expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn binary_extension_is_detected() {
        assert!(is_binary_path(Path::new("dir/machine.fs")));
        assert!(!is_binary_path(Path::new("machine.txt")));
        assert!(!is_binary_path(Path::new("machine.fsx")));
        assert!(!is_binary_path(Path::new("fs")));
        assert!(is_json_path(Path::new("machine.json")));
        assert!(is_checkpoint_path(Path::new("machine.json")));
        assert!(!is_checkpoint_path(Path::new("machine.txt")));
    }
}
