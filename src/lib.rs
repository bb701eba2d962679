#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! size-snapshot library
//!
//! Measures the size of JavaScript build outputs (bundled, minified,
//! gzipped and, for ES modules, tree-shaken by two independent engines) and
//! keeps the results in a snapshot file so regressions can be caught in CI.
//! It can be used programmatically in addition to the CLI interface.
//!
//! # Basic Example
//!
//! Measuring an output and recording it:
//!
//! ```no_run
//! use size_snapshot::config::SnapshotOptions;
//! use size_snapshot::plugin::{OutputDescriptor, SizeSnapshot};
//!
//! let options = SnapshotOptions::new(&std::env::current_dir()?);
//! let plugin = SizeSnapshot::new(options)?;
//!
//! let code = std::fs::read_to_string("dist/index.mjs")?;
//! let record = plugin.transform_bundle(&code, &OutputDescriptor::file("es", "dist/index.mjs"))?;
//! println!("{:?}", record.bytes("gzipped"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Advanced Example: Verifying Without a Filesystem
//!
//! Snapshots are plain values; [`snapshot::update`] and [`snapshot::verify`]
//! need no I/O:
//!
//! ```
//! use size_snapshot::metrics::{Metric, MetricsRecord};
//! use size_snapshot::snapshot::{update, verify, Snapshot};
//!
//! let stored = MetricsRecord::from_iter([("bundled", Metric::Bytes(100))]);
//! let snapshot = update(Snapshot::new(), "out.js", stored);
//!
//! let received = MetricsRecord::from_iter([("bundled", Metric::Bytes(104))]);
//! assert!(verify(Some(&snapshot), "out.js", &received, 5.0).is_ok());
//! assert!(verify(Some(&snapshot), "out.js", &received, 0.0).is_err());
//! ```
//!
//! # Advanced Example: Tree-shaking Probes
//!
//! ```
//! use size_snapshot::graph::ExternalPredicate;
//! use size_snapshot::probe::{EsmProbe, ProbeConfig, TreeshakeProbe};
//!
//! let config = ProbeConfig::new("export const unused = 1;", ExternalPredicate::default());
//! let metric = EsmProbe.run(&config).unwrap();
//! assert_eq!(metric.as_group().unwrap().bytes("code"), Some(0));
//! ```

/// Command-line parser definition
pub mod cli;
/// Command handlers for CLI operations
pub mod cmd;
/// Configuration file and option handling
pub mod config;
/// Error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Synthetic module graph fed to the tree-shaking engines
pub mod graph;
/// Infrastructure traits for filesystem access
pub mod infra;
/// JavaScript parsing, purity analysis, tree-shaking and minification
pub mod js;
/// Metrics records and their computation
pub mod metrics;
/// Build-tool entry point
pub mod plugin;
/// Tree-shaking probes
pub mod probe;
/// Human-readable size report
pub mod report;
/// Snapshot persistence and comparison
pub mod snapshot;
