//! Snapshot file persistence
//!
//! Every call re-reads the file, so nothing is cached between calls. The
//! read-modify-write in [`SnapshotStore::write_snapshot`] is not locked;
//! callers must not point concurrent writers at the same path.

use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::{diff, update, verify, Snapshot};
use crate::error::SizeSnapshotError;
use crate::infra::{FileSystem, RealFileSystem};
use crate::metrics::MetricsRecord;

/// JSON-backed snapshot file
#[derive(Debug, Clone)]
pub struct SnapshotStore<FS: FileSystem = RealFileSystem> {
    fs: FS,
    path: PathBuf,
}

impl SnapshotStore<RealFileSystem> {
    /// Store backed by the real filesystem
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_fs(path, RealFileSystem)
    }
}

impl<FS: FileSystem> SnapshotStore<FS> {
    /// Store backed by a custom filesystem
    pub fn with_fs(path: impl Into<PathBuf>, fs: FS) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    /// Snapshot file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot.
    ///
    /// Returns `Ok(None)` when the file does not exist. Unparsable contents
    /// are logged and treated as an empty snapshot.
    pub fn read(&self) -> Result<Option<Snapshot>, SizeSnapshotError> {
        let text = match self.fs.read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SizeSnapshotError::Io {
                    context: format!("reading {}", self.path.display()),
                    source,
                })
            }
        };

        match serde_json::from_str(&text) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                warn!(
                    "Ignoring unparsable snapshot {}: {}",
                    self.path.display(),
                    e
                );
                Ok(Some(Snapshot::new()))
            }
        }
    }

    /// Read the snapshot, treating an absent file as empty
    pub fn read_or_default(&self) -> Result<Snapshot, SizeSnapshotError> {
        Ok(self.read()?.unwrap_or_default())
    }

    /// Store `record` under `name` and persist the whole snapshot
    pub fn write_snapshot(&self, name: &str, record: MetricsRecord) -> Result<(), SizeSnapshotError> {
        let snapshot = update(self.read_or_default()?, name, record);
        debug!(
            "writing {} entries to {}",
            snapshot.len(),
            self.path.display()
        );

        self.fs
            .write(&self.path, snapshot.to_json())
            .map_err(|source| SizeSnapshotError::Io {
                context: format!("writing {}", self.path.display()),
                source,
            })
    }

    /// Verify `record` against the stored entry for `name`.
    ///
    /// On mismatch the coloured diff is printed to stderr before the error
    /// is returned. Never writes.
    pub fn match_snapshot(
        &self,
        name: &str,
        record: &MetricsRecord,
        threshold: f64,
    ) -> Result<(), SizeSnapshotError> {
        let snapshot = self.read()?;
        match verify(snapshot.as_ref(), name, record, threshold) {
            Err(SizeSnapshotError::SnapshotMissing { .. }) => {
                Err(SizeSnapshotError::SnapshotMissing {
                    path: self.path.clone(),
                })
            }
            Err(SizeSnapshotError::SnapshotMismatch { name, diff: rendered }) => {
                eprintln!("{}", diff::colorize(&rendered));
                Err(SizeSnapshotError::SnapshotMismatch {
                    name,
                    diff: rendered,
                })
            }
            other => other,
        }
    }
}
