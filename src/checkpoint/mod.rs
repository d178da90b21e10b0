//! Checkpoint state: the instant of the last successful probe pass

pub mod file;

pub use file::FileCheckpointStore;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

/// Errors reading or writing the checkpoint
#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    #[error("checkpoint read failed: {0}")]
    Read(String),

    #[error("checkpoint write failed: {0}")]
    Write(String),
}

/// Store for the probe's last-successful-run instant.
///
/// The runner reads once at the start of a pass and writes at most once
/// at the end of a successful pass; the stored instant is never partially
/// updated and never moves backwards across successful passes.
pub trait CheckpointStore {
    /// The checkpoint left by the previous successful pass, if any
    fn read(&self) -> Result<Option<DateTime<Utc>>, CheckpointError>;

    /// Advance the checkpoint
    fn write(&self, instant: DateTime<Utc>) -> Result<(), CheckpointError>;
}

/// In-memory store for tests and single-process embedding
#[derive(Default)]
pub struct MemoryCheckpointStore {
    instant: Mutex<Option<DateTime<Utc>>>,
}

impl MemoryCheckpointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds a checkpoint
    pub fn seeded(instant: DateTime<Utc>) -> Self {
        Self {
            instant: Mutex::new(Some(instant)),
        }
    }
}

impl CheckpointStore for MemoryCheckpointStore {
    fn read(&self) -> Result<Option<DateTime<Utc>>, CheckpointError> {
        Ok(*self.instant.lock())
    }

    fn write(&self, instant: DateTime<Utc>) -> Result<(), CheckpointError> {
        *self.instant.lock() = Some(instant);
        Ok(())
    }
}
