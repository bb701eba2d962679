//! Test assertion helpers
//!
//! Provides assertions for metrics records whose exact byte counts depend
//! on the minifier version, so tests check relations between sizes rather
//! than hard-coded numbers where possible.

use size_snapshot::metrics::{MetricsRecord, BUNDLED, GZIPPED, MINIFIED, TREESHAKED};

/// Assert the three top-level sizes are present and ordered
/// `gzipped <= minified < bundled`
#[allow(dead_code)]
pub fn assert_core_metrics(record: &MetricsRecord, bundled: u64) {
    assert_eq!(record.bytes(BUNDLED), Some(bundled), "bundled size");

    let minified = record.bytes(MINIFIED).expect("minified size missing");
    let gzipped = record.bytes(GZIPPED).expect("gzipped size missing");
    assert!(minified > 0, "minified output should not be empty");
    assert!(
        minified < bundled,
        "minified ({minified}) should be smaller than bundled ({bundled})"
    );
    assert!(
        gzipped < minified,
        "gzipped ({gzipped}) should be smaller than minified ({minified})"
    );
}

/// Tree-shaken `code` size reported by `probe`
#[allow(dead_code)]
pub fn treeshaked_code(record: &MetricsRecord, probe: &str) -> u64 {
    record
        .group(TREESHAKED)
        .and_then(|t| t.group(probe))
        .and_then(|p| p.bytes("code"))
        .unwrap_or_else(|| panic!("no treeshaked code size for {probe} in {record:?}"))
}
