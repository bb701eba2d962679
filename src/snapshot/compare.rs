//! Structural comparison of metrics records with a numeric tolerance

use crate::metrics::{Metric, MetricsRecord};

/// Compare two records leaf by leaf.
///
/// Records match when they have the same number of keys and every key of
/// `expected` maps to a value of the same shape in `actual`, with numeric
/// leaves differing by at most `threshold`. A threshold of `0.0` is exact
/// equality.
///
/// Keys are only checked by count first and then driven off `expected`,
/// so `actual` is never iterated on its own.
///
/// # Examples
///
/// ```
/// use size_snapshot::metrics::{Metric, MetricsRecord};
/// use size_snapshot::snapshot::compare;
///
/// let stored = MetricsRecord::from_iter([("bundled", Metric::Bytes(100))]);
/// let received = MetricsRecord::from_iter([("bundled", Metric::Bytes(105))]);
///
/// assert!(compare(&stored, &received, 10.0));
/// assert!(!compare(&stored, &received, 0.0));
/// ```
pub fn compare(expected: &MetricsRecord, actual: &MetricsRecord, threshold: f64) -> bool {
    if expected.len() != actual.len() {
        return false;
    }

    expected.iter().all(|(key, expected_value)| {
        match (expected_value, actual.get(key)) {
            (Metric::Bytes(e), Some(Metric::Bytes(a))) => e.abs_diff(*a) as f64 <= threshold,
            (Metric::Group(e), Some(Metric::Group(a))) => compare(e, a, threshold),
            _ => false,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn flat(entries: &[(&str, u64)]) -> MetricsRecord {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), Metric::Bytes(*v)))
            .collect()
    }

    fn nested(probe: u64) -> MetricsRecord {
        let mut treeshaked = MetricsRecord::new();
        treeshaked.insert("probeA", flat(&[("code", probe), ("import_statements", 0)]));
        let mut record = flat(&[("bundled", 100), ("minified", 60), ("gzipped", 40)]);
        record.insert("treeshaked", treeshaked);
        record
    }

    #[test]
    fn test_identical_records_match() {
        assert!(compare(&nested(10), &nested(10), 0.0));
    }

    #[test]
    fn test_threshold_applies_to_nested_leaves() {
        assert!(!compare(&nested(10), &nested(15), 0.0));
        assert!(compare(&nested(10), &nested(15), 5.0));
        assert!(!compare(&nested(10), &nested(15), 4.9));
    }

    #[test]
    fn test_threshold_example() {
        let stored = flat(&[("bundled", 100)]);
        assert!(!compare(&stored, &flat(&[("bundled", 150)]), 10.0));
        assert!(compare(&stored, &flat(&[("bundled", 105)]), 10.0));
    }

    #[test]
    fn test_extra_key_never_matches() {
        let a = flat(&[("a", 1)]);
        let b = flat(&[("a", 1), ("b", 2)]);
        assert!(!compare(&a, &b, f64::MAX));
        assert!(!compare(&b, &a, f64::MAX));
    }

    #[test]
    fn test_same_count_different_names_fails() {
        assert!(!compare(&flat(&[("a", 1)]), &flat(&[("b", 1)]), 0.0));
    }

    #[test]
    fn test_leaf_versus_group_fails() {
        let leaf = flat(&[("treeshaked", 1)]);
        let mut group = MetricsRecord::new();
        group.insert("treeshaked", MetricsRecord::new());
        assert!(!compare(&leaf, &group, f64::MAX));
        assert!(!compare(&group, &leaf, f64::MAX));
    }

    #[test]
    fn test_empty_records_match() {
        assert!(compare(&MetricsRecord::new(), &MetricsRecord::new(), 0.0));
        assert!(!compare(&MetricsRecord::new(), &flat(&[("bundled", 1)]), 0.0));
    }

    fn record_strategy() -> impl Strategy<Value = MetricsRecord> {
        prop::collection::btree_map("[a-z]", 0u64..10_000, 0..5)
            .prop_map(|map| map.into_iter().map(|(k, v)| (k, Metric::Bytes(v))).collect())
    }

    proptest! {
        #[test]
        fn prop_threshold_is_symmetric(
            a in record_strategy(),
            b in record_strategy(),
            t in 0.0f64..500.0,
        ) {
            prop_assert_eq!(compare(&a, &b, t), compare(&b, &a, t));
        }

        #[test]
        fn prop_zero_threshold_is_equality(
            keys in prop::collection::btree_set("[a-z]", 0..5),
            seed in prop::collection::vec(0u64..4, 5),
            other in prop::collection::vec(0u64..4, 5),
        ) {
            // Same shape, values drawn from a small range so equality happens often
            let a: MetricsRecord = keys.iter().zip(&seed).map(|(k, v)| (k.clone(), Metric::Bytes(*v))).collect();
            let b: MetricsRecord = keys.iter().zip(&other).map(|(k, v)| (k.clone(), Metric::Bytes(*v))).collect();
            prop_assert_eq!(compare(&a, &b, 0.0), a == b);
        }

        #[test]
        fn prop_record_always_matches_itself(a in record_strategy()) {
            prop_assert!(compare(&a, &a, 0.0));
        }
    }
}
