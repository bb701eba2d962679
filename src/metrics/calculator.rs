//! Size metrics calculator
//!
//! Computes the metrics record for one build output. The minify then gzip
//! chain and every tree-shaking probe are independent, so they run on the
//! rayon pool and are joined before the record is assembled.

use std::io::{self, Write};

use flate2::write::GzEncoder;
use flate2::Compression;
use log::{debug, info};
use rayon::prelude::*;

use super::{Metric, MetricsRecord, BUNDLED, GZIPPED, MINIFIED, TREESHAKED};
use crate::error::SizeSnapshotError;
use crate::graph::ExternalPredicate;
use crate::js::{minify, MinifyOptions, SourceKind};
use crate::probe::{default_probes, ProbeConfig, TreeshakeProbe};

/// Compressed size of `text` at the highest gzip level
pub fn gzip_size(text: &str) -> io::Result<u64> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(text.as_bytes())?;
    Ok(encoder.finish()?.len() as u64)
}

/// Measures bundled, minified, gzipped and tree-shaken sizes.
///
/// # Examples
///
/// ```no_run
/// use size_snapshot::metrics::{MetricsCalculator, MINIFIED, TREESHAKED};
///
/// let calculator = MetricsCalculator::new();
/// let record = calculator.compute("export const a = 1;", true)?;
/// assert!(record.bytes(MINIFIED).is_some());
/// assert!(record.group(TREESHAKED).is_some());
/// # Ok::<(), size_snapshot::error::SizeSnapshotError>(())
/// ```
pub struct MetricsCalculator {
    probes: Vec<Box<dyn TreeshakeProbe>>,
    external: ExternalPredicate,
}

impl Default for MetricsCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCalculator {
    /// Calculator with both default probes.
    ///
    /// Real build outputs may import anything, so every specifier except the
    /// synthetic graph's own ids is left external.
    pub fn new() -> Self {
        Self::with_probes(default_probes(), ExternalPredicate::all_but_reserved())
    }

    /// Calculator with a custom probe set and external classification
    pub fn with_probes(probes: Vec<Box<dyn TreeshakeProbe>>, external: ExternalPredicate) -> Self {
        Self { probes, external }
    }

    /// Names of the configured probes, in report order
    pub fn probe_names(&self) -> Vec<&'static str> {
        self.probes.iter().map(|p| p.name()).collect()
    }

    /// Compute the metrics record for `code`.
    ///
    /// `treeshaked` is only present when `es_module` is set. Any failure
    /// aborts the whole computation; partial records are never returned.
    pub fn compute(&self, code: &str, es_module: bool) -> Result<MetricsRecord, SizeSnapshotError> {
        let (compressed, treeshaked) = rayon::join(
            || self.minify_and_gzip(code, es_module),
            || es_module.then(|| self.run_probes(code)).transpose(),
        );
        let (minified, gzipped) = compressed?;

        let mut record = MetricsRecord::new();
        record.insert(BUNDLED, code.len() as u64);
        record.insert(MINIFIED, minified);
        record.insert(GZIPPED, gzipped);
        if let Some(treeshaked) = treeshaked? {
            record.insert(TREESHAKED, treeshaked);
        }

        info!(
            "measured {} bytes ({} minified, {} gzipped)",
            code.len(),
            minified,
            gzipped
        );
        Ok(record)
    }

    fn minify_and_gzip(&self, code: &str, es_module: bool) -> Result<(u64, u64), SizeSnapshotError> {
        let kind = if es_module {
            SourceKind::Module
        } else {
            SourceKind::Script
        };
        let minified = minify(
            code,
            MinifyOptions {
                kind,
                top_level: false,
            },
        )
        .map_err(SizeSnapshotError::Minify)?;

        let gzipped = gzip_size(&minified).map_err(|source| SizeSnapshotError::Io {
            context: "gzip compression".to_string(),
            source,
        })?;
        Ok((minified.len() as u64, gzipped))
    }

    fn run_probes(&self, code: &str) -> Result<MetricsRecord, SizeSnapshotError> {
        let config = ProbeConfig::new(code, self.external.clone());

        let results: Vec<(&'static str, Metric)> = self
            .probes
            .par_iter()
            .map(|probe| {
                debug!("running treeshake probe {}", probe.name());
                probe
                    .run(&config)
                    .map(|metric| (probe.name(), metric))
                    .map_err(|source| SizeSnapshotError::ProbeExecution {
                        probe: probe.name().to_string(),
                        source,
                    })
            })
            .collect::<Result<_, _>>()?;

        Ok(results.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ProbeError;

    struct FixedProbe(&'static str, u64);

    impl TreeshakeProbe for FixedProbe {
        fn name(&self) -> &'static str {
            self.0
        }

        fn run(&self, _config: &ProbeConfig) -> Result<Metric, ProbeError> {
            Ok(Metric::Bytes(self.1))
        }
    }

    struct FailingProbe;

    impl TreeshakeProbe for FailingProbe {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn run(&self, _config: &ProbeConfig) -> Result<Metric, ProbeError> {
            Err(ProbeError::Compilation {
                messages: vec!["engine exploded".to_string()],
            })
        }
    }

    fn fixed_calculator() -> MetricsCalculator {
        MetricsCalculator::with_probes(
            vec![Box::new(FixedProbe("one", 1)), Box::new(FixedProbe("two", 2))],
            ExternalPredicate::default(),
        )
    }

    #[test]
    fn test_gzip_size_of_empty_string_is_framing_only() {
        // 10 byte header plus 8 byte trailer at minimum
        let size = gzip_size("").unwrap();
        assert!((18..=24).contains(&size), "unexpected size {size}");
    }

    #[test]
    fn test_gzip_compresses_repetition() {
        let text = "abcdefgh".repeat(1000);
        assert!(gzip_size(&text).unwrap() < text.len() as u64 / 10);
    }

    #[test]
    fn test_non_es_output_has_no_treeshaked_key() {
        let record = fixed_calculator()
            .compute("var a = 1;\nconsole.log(a);", false)
            .unwrap();
        assert!(!record.contains_key(TREESHAKED));
        assert_eq!(record.len(), 3);
        assert_eq!(record.bytes(BUNDLED), Some(26));
    }

    #[test]
    fn test_es_output_collects_every_probe() {
        let record = fixed_calculator()
            .compute("export const a = 1;", true)
            .unwrap();
        let treeshaked = record.group(TREESHAKED).unwrap();
        assert_eq!(treeshaked.bytes("one"), Some(1));
        assert_eq!(treeshaked.bytes("two"), Some(2));
    }

    #[test]
    fn test_minified_is_not_larger_than_bundled() {
        let code = "function add(first, second) {\n  return first + second;\n}\nconsole.log(add(1, 2));\n";
        let record = fixed_calculator().compute(code, false).unwrap();
        assert!(record.bytes(MINIFIED).unwrap() < record.bytes(BUNDLED).unwrap());
    }

    #[test]
    fn test_probe_failure_aborts_computation() {
        let calculator = MetricsCalculator::with_probes(
            vec![Box::new(FixedProbe("ok", 1)), Box::new(FailingProbe)],
            ExternalPredicate::default(),
        );
        let err = calculator.compute("export {};", true).unwrap_err();
        assert!(matches!(err, SizeSnapshotError::ProbeExecution { ref probe, .. } if probe == "broken"));
    }

    #[test]
    fn test_probe_failure_is_ignored_for_non_es_output() {
        let calculator =
            MetricsCalculator::with_probes(vec![Box::new(FailingProbe)], ExternalPredicate::default());
        assert!(calculator.compute("var a;", false).is_ok());
    }

    #[test]
    fn test_invalid_code_is_minify_error() {
        let err = fixed_calculator().compute("var = ;", false).unwrap_err();
        assert!(matches!(err, SizeSnapshotError::Minify(_)));
    }

    #[test]
    fn test_default_probe_names() {
        assert_eq!(MetricsCalculator::new().probe_names(), vec!["probeA", "probeB"]);
    }
}
