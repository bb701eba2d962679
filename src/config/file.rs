//! Configuration file data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::SizeSnapshotError;

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".size-snapshot.toml";

/// Every option key a config may contain
pub const VALID_OPTION_KEYS: [&str; 4] = ["snapshotPath", "matchSnapshot", "threshold", "printInfo"];

/// `.size-snapshot.toml` structure; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    /// Snapshot file, relative to the directory holding the config
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,

    /// Verify against the snapshot instead of writing it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_snapshot: Option<bool>,

    /// Allowed absolute difference per metric
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    /// Print the size report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_info: Option<bool>,
}

/// Reject any key outside [`VALID_OPTION_KEYS`], naming every offender.
///
/// # Examples
///
/// ```
/// use size_snapshot::config::validate_option_keys;
///
/// assert!(validate_option_keys(["threshold", "printInfo"]).is_ok());
///
/// let err = validate_option_keys(["minify", "threshold", "snapshot"]).unwrap_err();
/// assert_eq!(err.to_string(), r#"Options "minify", "snapshot" are invalid"#);
/// ```
pub fn validate_option_keys<'k>(
    keys: impl IntoIterator<Item = &'k str>,
) -> Result<(), SizeSnapshotError> {
    let invalid: Vec<String> = keys
        .into_iter()
        .filter(|key| !VALID_OPTION_KEYS.iter().any(|valid| valid == key))
        .map(str::to_string)
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(SizeSnapshotError::InvalidOptions { keys: invalid })
    }
}
