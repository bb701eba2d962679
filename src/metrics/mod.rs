//! Size metrics records and their computation

pub mod calculator;

pub use calculator::{gzip_size, MetricsCalculator};

use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Length of the untransformed output
pub const BUNDLED: &str = "bundled";
/// Length after minification
pub const MINIFIED: &str = "minified";
/// Gzipped length of the minified output
pub const GZIPPED: &str = "gzipped";
/// Per-probe tree-shaken sizes, ES-module outputs only
pub const TREESHAKED: &str = "treeshaked";

/// A metric leaf (byte count) or a nested group of metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    /// Non-negative byte count
    Bytes(u64),
    /// Nested record
    Group(MetricsRecord),
}

impl Metric {
    /// Byte count, if this is a leaf
    pub fn as_bytes(&self) -> Option<u64> {
        match self {
            Self::Bytes(n) => Some(*n),
            Self::Group(_) => None,
        }
    }

    /// Nested record, if this is a group
    pub fn as_group(&self) -> Option<&MetricsRecord> {
        match self {
            Self::Group(record) => Some(record),
            Self::Bytes(_) => None,
        }
    }
}

impl From<u64> for Metric {
    fn from(bytes: u64) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<MetricsRecord> for Metric {
    fn from(record: MetricsRecord) -> Self {
        Self::Group(record)
    }
}

/// Mapping from metric name to a byte count or a nested record.
///
/// Keys iterate (and serialize) in sorted order so snapshot files are
/// stable across runs. Absent metrics are simply not present; there is no
/// null leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricsRecord(BTreeMap<String, Metric>);

impl MetricsRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Metric>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a metric
    pub fn get(&self, key: &str) -> Option<&Metric> {
        self.0.get(key)
    }

    /// Byte count stored under `key`
    pub fn bytes(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(Metric::as_bytes)
    }

    /// Nested record stored under `key`
    pub fn group(&self, key: &str) -> Option<&MetricsRecord> {
        self.get(key).and_then(Metric::as_group)
    }

    /// Whether `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of top-level keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no keys
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over entries in key order
    pub fn iter(&self) -> btree_map::Iter<'_, String, Metric> {
        self.0.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Metric)> for MetricsRecord {
    fn from_iter<I: IntoIterator<Item = (K, Metric)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<'r> IntoIterator for &'r MetricsRecord {
    type Item = (&'r String, &'r Metric);
    type IntoIter = btree_map::Iter<'r, String, Metric>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
