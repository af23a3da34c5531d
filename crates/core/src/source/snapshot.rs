use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Utc;
use tracing::{info, warn};

use crate::{error::SourceError, models::RawBatch};

/// File name prefix of snapshot files.
pub const SNAPSHOT_PREFIX: &str = "output_";
/// File extension of snapshot files.
pub const SNAPSHOT_EXTENSION: &str = "json";

/// A snapshot file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotEntry {
    /// Absolute path to the snapshot.
    pub path: PathBuf,
    /// Capture time in epoch seconds, taken from the file name.
    pub captured_at: Option<i64>,
}

/// Directory of `output_<epoch>.json` batches, newest first.
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Snapshot directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All snapshots, most recent first.
    pub fn entries(&self) -> Result<Vec<SnapshotEntry>, SourceError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let read_dir = fs::read_dir(&self.root).map_err(|source| self.io_error(source))?;
        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|source| self.io_error(source))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if !is_snapshot_name(file_name) {
                continue;
            }
            entries.push(SnapshotEntry {
                captured_at: epoch_from_file_name(file_name),
                path,
            });
        }

        entries.sort_by(|a, b| {
            b.captured_at
                .cmp(&a.captured_at)
                .then_with(|| b.path.cmp(&a.path))
        });
        Ok(entries)
    }

    /// Most recent snapshot.
    pub fn latest(&self) -> Result<SnapshotEntry, SourceError> {
        self.entries()?
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::NoSnapshots(self.root.clone()))
    }

    /// Parse a snapshot, taking the timestamp from the file name when the payload has none.
    pub fn load(&self, entry: &SnapshotEntry) -> Result<RawBatch, SourceError> {
        let content = fs::read(&entry.path).map_err(|source| SourceError::Io {
            path: entry.path.clone(),
            source,
        })?;
        let mut batch =
            RawBatch::from_slice(&content).map_err(|source| SourceError::Snapshot {
                path: entry.path.clone(),
                source,
            })?;
        if batch.timestamp.is_none() {
            batch.timestamp = entry.captured_at;
        }
        Ok(batch)
    }

    /// Parse the most recent snapshot.
    pub fn load_latest(&self) -> Result<RawBatch, SourceError> {
        let entry = self.latest()?;
        info!(path = %entry.path.display(), "Loading latest snapshot");
        self.load(&entry)
    }

    /// Write `payload` as a new snapshot stamped with the current time.
    pub fn persist(&self, payload: &[u8]) -> Result<SnapshotEntry, SourceError> {
        fs::create_dir_all(&self.root).map_err(|source| self.io_error(source))?;

        let captured_at = Utc::now().timestamp();
        let path = self
            .root
            .join(format!("{SNAPSHOT_PREFIX}{captured_at}.{SNAPSHOT_EXTENSION}"));
        if path.exists() {
            warn!(path = %path.display(), "Overwriting snapshot captured in the same second");
        }
        fs::write(&path, payload).map_err(|source| SourceError::Io {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), "Snapshot saved");
        Ok(SnapshotEntry {
            path,
            captured_at: Some(captured_at),
        })
    }

    fn io_error(&self, source: std::io::Error) -> SourceError {
        SourceError::Io {
            path: self.root.clone(),
            source,
        }
    }
}

fn is_snapshot_name(file_name: &str) -> bool {
    file_name.starts_with(SNAPSHOT_PREFIX)
        && Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            == Some(SNAPSHOT_EXTENSION)
}

fn epoch_from_file_name(file_name: &str) -> Option<i64> {
    file_name
        .strip_prefix(SNAPSHOT_PREFIX)?
        .strip_suffix(SNAPSHOT_EXTENSION)?
        .strip_suffix('.')?
        .parse()
        .ok()
}
