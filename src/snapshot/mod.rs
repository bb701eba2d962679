//! Size snapshots: the persisted baseline of measured metrics
//!
//! A [`Snapshot`] maps output names to their [`MetricsRecord`]. The pure
//! [`update`] and [`verify`] functions operate on snapshot values;
//! [`SnapshotStore`] wraps them with the read-modify-write cycle against a
//! JSON file.
//!
//! # Examples
//!
//! ```
//! use size_snapshot::metrics::{Metric, MetricsRecord};
//! use size_snapshot::snapshot::{update, verify, Snapshot};
//!
//! let record = MetricsRecord::from_iter([("bundled", Metric::Bytes(100))]);
//! let snapshot = update(Snapshot::new(), "out.js", record.clone());
//!
//! assert!(verify(Some(&snapshot), "out.js", &record, 0.0).is_ok());
//! assert!(verify(None, "out.js", &record, 0.0).is_err());
//! ```

pub mod compare;
pub mod diff;
pub mod store;

pub use compare::compare;
pub use diff::render_diff;
pub use store::SnapshotStore;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::SizeSnapshotError;
use crate::metrics::MetricsRecord;

/// Default snapshot file name, resolved against the working directory
pub const DEFAULT_SNAPSHOT_FILE: &str = ".size-snapshot.json";

/// Output name to metrics record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(BTreeMap<String, MetricsRecord>);

impl Snapshot {
    /// Empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Record stored for `name`
    pub fn get(&self, name: &str) -> Option<&MetricsRecord> {
        self.0.get(name)
    }

    /// Number of outputs
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no output has been recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Output names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Serialize as 2-space indented JSON with a trailing newline
    pub fn to_json(&self) -> String {
        let mut json =
            serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| "{}".to_string());
        json.push('\n');
        json
    }
}

/// Replace the record stored for `name`, leaving every other entry untouched
pub fn update(mut snapshot: Snapshot, name: &str, record: MetricsRecord) -> Snapshot {
    snapshot.0.insert(name.to_string(), record);
    snapshot
}

/// Check `record` against the stored entry for `name`.
///
/// `None` means the snapshot does not exist at all, which fails with
/// [`SizeSnapshotError::SnapshotMissing`] (with an empty path; the store
/// fills in the real one). An unknown `name` is compared against an empty
/// record, so it mismatches unless `record` is empty too.
pub fn verify(
    snapshot: Option<&Snapshot>,
    name: &str,
    record: &MetricsRecord,
    threshold: f64,
) -> Result<(), SizeSnapshotError> {
    let snapshot = snapshot.ok_or_else(|| SizeSnapshotError::SnapshotMissing {
        path: Default::default(),
    })?;

    let empty = MetricsRecord::new();
    let stored = snapshot.get(name).unwrap_or(&empty);
    if compare(stored, record, threshold) {
        return Ok(());
    }

    Err(SizeSnapshotError::SnapshotMismatch {
        name: name.to_string(),
        diff: render_diff(stored, record),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Metric;

    fn record(bundled: u64) -> MetricsRecord {
        MetricsRecord::from_iter([("bundled", Metric::Bytes(bundled))])
    }

    #[test]
    fn test_update_is_last_write_wins() {
        let snapshot = update(Snapshot::new(), "a.js", record(1));
        let snapshot = update(snapshot, "b.js", record(2));
        let snapshot = update(snapshot, "a.js", record(3));

        assert_eq!(snapshot.get("a.js"), Some(&record(3)));
        assert_eq!(snapshot.get("b.js"), Some(&record(2)));
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn test_verify_with_threshold() {
        let snapshot = update(Snapshot::new(), "x", record(100));

        assert!(matches!(
            verify(Some(&snapshot), "x", &record(150), 10.0),
            Err(SizeSnapshotError::SnapshotMismatch { .. })
        ));
        assert!(verify(Some(&snapshot), "x", &record(105), 10.0).is_ok());
    }

    #[test]
    fn test_verify_unknown_name_mismatches() {
        let snapshot = update(Snapshot::new(), "x", record(100));
        let err = verify(Some(&snapshot), "y", &record(100), 0.0).unwrap_err();
        match err {
            SizeSnapshotError::SnapshotMismatch { name, diff } => {
                assert_eq!(name, "y");
                assert!(diff.starts_with("- Snapshot\n+ Received"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_verify_missing_snapshot() {
        assert!(matches!(
            verify(None, "x", &record(1), 0.0),
            Err(SizeSnapshotError::SnapshotMissing { .. })
        ));
    }

    #[test]
    fn test_to_json_format() {
        let snapshot = update(Snapshot::new(), "out.js", record(100));
        assert_eq!(
            snapshot.to_json(),
            "{\n  \"out.js\": {\n    \"bundled\": 100\n  }\n}\n"
        );
        assert_eq!(Snapshot::new().to_json(), "{}\n");
    }
}
