//! JSON file-backed checkpoint store

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CheckpointError, CheckpointStore};

/// On-disk checkpoint format
#[derive(Debug, Serialize, Deserialize)]
struct CheckpointFile {
    last_run_at: DateTime<Utc>,
    schema_version: u32,
}

/// Checkpoint store backed by a JSON file.
///
/// Writes go to a temporary sibling file and move into place with a
/// rename, so a crash mid-write leaves the previous checkpoint intact. A
/// missing file reads as no checkpoint, which the runner treats as a
/// first run.
pub struct FileCheckpointStore {
    path: PathBuf,
}

impl FileCheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CheckpointStore for FileCheckpointStore {
    fn read(&self) -> Result<Option<DateTime<Utc>>, CheckpointError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CheckpointError::Read(e.to_string())),
        };

        let file: CheckpointFile =
            serde_json::from_slice(&data).map_err(|e| CheckpointError::Read(e.to_string()))?;
        Ok(Some(file.last_run_at))
    }

    fn write(&self, instant: DateTime<Utc>) -> Result<(), CheckpointError> {
        let file = CheckpointFile {
            last_run_at: instant,
            schema_version: 1,
        };
        let data =
            serde_json::to_vec(&file).map_err(|e| CheckpointError::Write(e.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, &data).map_err(|e| CheckpointError::Write(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| CheckpointError::Write(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = FileCheckpointStore::new(dir.path().join("checkpoint.json"));
        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn test_write_then_read_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = FileCheckpointStore::new(dir.path().join("checkpoint.json"));

        let now = Utc::now();
        store.write(now).unwrap();
        assert_eq!(store.read().unwrap(), Some(now));

        let later = now + chrono::Duration::seconds(60);
        store.write(later).unwrap();
        assert_eq!(store.read().unwrap(), Some(later));
    }

    #[test]
    fn test_corrupt_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("checkpoint.json");
        fs::write(&path, b"not json").unwrap();

        let store = FileCheckpointStore::new(&path);
        assert!(matches!(store.read(), Err(CheckpointError::Read(_))));
    }
}
