//! Resolved runtime options

use std::path::{Path, PathBuf};

use super::file::ConfigFile;
use crate::error::SizeSnapshotError;
use crate::snapshot::DEFAULT_SNAPSHOT_FILE;

/// Options controlling measurement output and snapshot handling.
///
/// # Examples
///
/// ```
/// use size_snapshot::config::SnapshotOptions;
/// use std::path::Path;
///
/// let options = SnapshotOptions::new(Path::new("/project"));
/// assert_eq!(options.snapshot_path, Path::new("/project/.size-snapshot.json"));
/// assert!(!options.match_snapshot);
/// assert_eq!(options.threshold, 0.0);
/// assert!(options.print_info);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotOptions {
    /// Snapshot JSON file
    pub snapshot_path: PathBuf,
    /// `false` writes the snapshot, `true` verifies against it
    pub match_snapshot: bool,
    /// Allowed absolute difference per metric in verify mode
    pub threshold: f64,
    /// Print the human-readable report; never affects measurement
    pub print_info: bool,
}

impl SnapshotOptions {
    /// Defaults for a project rooted at `cwd`
    pub fn new(cwd: &Path) -> Self {
        Self {
            snapshot_path: cwd.join(DEFAULT_SNAPSHOT_FILE),
            match_snapshot: false,
            threshold: 0.0,
            print_info: true,
        }
    }

    /// Overlay the values set in a config file.
    ///
    /// A relative `snapshotPath` is resolved against `base`, the directory
    /// holding the config file.
    pub fn merge_file(mut self, file: &ConfigFile, base: &Path) -> Self {
        if let Some(path) = &file.snapshot_path {
            self.snapshot_path = base.join(path);
        }
        if let Some(match_snapshot) = file.match_snapshot {
            self.match_snapshot = match_snapshot;
        }
        if let Some(threshold) = file.threshold {
            self.threshold = threshold;
        }
        if let Some(print_info) = file.print_info {
            self.print_info = print_info;
        }
        self
    }

    /// Reject negative or non-finite thresholds
    pub fn validate(&self) -> Result<(), SizeSnapshotError> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(SizeSnapshotError::InvalidThreshold {
                value: self.threshold,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overrides_only_set_fields() {
        let file = ConfigFile {
            threshold: Some(5.0),
            print_info: Some(false),
            ..Default::default()
        };
        let options = SnapshotOptions::new(Path::new("/p")).merge_file(&file, Path::new("/p"));

        assert_eq!(options.threshold, 5.0);
        assert!(!options.print_info);
        assert!(!options.match_snapshot);
        assert_eq!(options.snapshot_path, Path::new("/p/.size-snapshot.json"));
    }

    #[test]
    fn test_relative_snapshot_path_resolves_against_config_dir() {
        let file = ConfigFile {
            snapshot_path: Some(PathBuf::from("sizes/snapshot.json")),
            ..Default::default()
        };
        let options = SnapshotOptions::new(Path::new("/cwd")).merge_file(&file, Path::new("/conf"));
        assert_eq!(options.snapshot_path, Path::new("/conf/sizes/snapshot.json"));
    }

    #[test]
    fn test_absolute_snapshot_path_is_kept() {
        let file = ConfigFile {
            snapshot_path: Some(PathBuf::from("/abs/snap.json")),
            ..Default::default()
        };
        let options = SnapshotOptions::new(Path::new("/cwd")).merge_file(&file, Path::new("/conf"));
        assert_eq!(options.snapshot_path, Path::new("/abs/snap.json"));
    }

    #[test]
    fn test_threshold_validation() {
        let mut options = SnapshotOptions::new(Path::new("/p"));
        assert!(options.validate().is_ok());

        options.threshold = 12.5;
        assert!(options.validate().is_ok());

        options.threshold = -1.0;
        assert!(matches!(
            options.validate(),
            Err(SizeSnapshotError::InvalidThreshold { .. })
        ));

        options.threshold = f64::NAN;
        assert!(options.validate().is_err());
    }
}
