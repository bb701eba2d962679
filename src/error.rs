//! Error types with contextual suggestions
//!
//! Every failure the library reports carries:
//! - A stable, greppable message
//! - A suggested fix where one exists
//! - A sysexits-style exit code for CI/CD
//!
//! # Examples
//!
//! ```
//! use size_snapshot::error::SizeSnapshotError;
//!
//! let err = SizeSnapshotError::InvalidOptions {
//!     keys: vec!["minify".to_string(), "snapshot".to_string()],
//! };
//! assert_eq!(err.to_string(), r#"Options "minify", "snapshot" are invalid"#);
//! assert_eq!(err.exit_code(), 64);
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::js::JsError;
use crate::probe::ProbeError;

fn invalid_options_message(keys: &[String]) -> String {
    let quoted: Vec<String> = keys.iter().map(|k| format!("\"{}\"", k)).collect();
    if quoted.len() == 1 {
        format!("Option {} is invalid", quoted[0])
    } else {
        format!("Options {} are invalid", quoted.join(", "))
    }
}

/// Errors raised while measuring outputs and checking snapshots
#[derive(Error, Debug)]
pub enum SizeSnapshotError {
    /// Unknown option keys
    #[error("{}", invalid_options_message(.keys))]
    InvalidOptions {
        /// Every unrecognised key, in input order
        keys: Vec<String>,
    },

    /// Threshold is negative or not a number
    #[error("Threshold must be a non-negative number, got {value}")]
    InvalidThreshold {
        /// Offending value
        value: f64,
    },

    /// Neither an output file nor a directory plus chunk name was given
    #[error("Output file should be specified")]
    MissingOutputFile,

    /// A tree-shaking probe failed
    #[error("Treeshake probe \"{probe}\" failed")]
    ProbeExecution {
        /// Probe name
        probe: String,
        #[source]
        /// Underlying probe error
        source: ProbeError,
    },

    /// The output itself could not be minified
    #[error("Failed to minify output")]
    Minify(#[source] JsError),

    /// Verify mode found no snapshot file
    #[error("Size snapshot is missing. Please run size-snapshot to create one.")]
    SnapshotMissing {
        /// Snapshot path that was looked up
        path: PathBuf,
    },

    /// Verify mode found different sizes
    #[error("Size snapshot is not matched. Run size-snapshot to rebuild one.")]
    SnapshotMismatch {
        /// Output identifier that mismatched
        name: String,
        /// Rendered diff of stored versus received sizes
        diff: String,
    },

    /// Configuration file could not be parsed
    #[error("Failed to parse configuration {path}: {message}")]
    ConfigParse {
        /// Config file path
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl SizeSnapshotError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use size_snapshot::error::SizeSnapshotError;
    ///
    /// let err = SizeSnapshotError::SnapshotMissing { path: ".size-snapshot.json".into() };
    /// assert!(err.suggestion().unwrap().contains("--match-snapshot"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::InvalidOptions { .. } => Some(
                "Valid options: snapshotPath, matchSnapshot, threshold, printInfo".to_string(),
            ),
            Self::InvalidThreshold { .. } => {
                Some("Use 0 for exact matching or a positive byte count".to_string())
            }
            Self::MissingOutputFile => {
                Some("Pass an output file, or an output directory and chunk file name".to_string())
            }
            Self::ProbeExecution { source, .. } => match source {
                ProbeError::Unresolved { .. } => Some(
                    "Relative imports are not followed; mark them external or inline them"
                        .to_string(),
                ),
                _ => Some("Check that the output is valid JavaScript".to_string()),
            },
            Self::Minify(_) => Some("Check that the output is valid JavaScript".to_string()),
            Self::SnapshotMissing { path } => Some(format!(
                "Run size-snapshot without --match-snapshot to write {}",
                path.display()
            )),
            Self::SnapshotMismatch { .. } => Some(
                "Review the diff above; rerun without --match-snapshot to accept the new sizes, or raise --threshold"
                    .to_string(),
            ),
            Self::ConfigParse { .. } => {
                Some("Check .size-snapshot.toml for TOML syntax errors".to_string())
            }
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Returns Unix-style exit codes following sysexits.h conventions.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidOptions { .. } => 64,    // EX_USAGE
            Self::InvalidThreshold { .. } => 64,  // EX_USAGE
            Self::MissingOutputFile => 64,        // EX_USAGE
            Self::ProbeExecution { .. } => 65,    // EX_DATAERR
            Self::Minify(_) => 65,                // EX_DATAERR
            Self::SnapshotMissing { .. } => 66,   // EX_NOINPUT
            Self::SnapshotMismatch { .. } => 1,   // Generic error (CI should fail)
            Self::ConfigParse { .. } => 78,       // EX_CONFIG
            Self::Io { .. } => 74,                // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain and suggestion
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(snapshot_error) = error.downcast_ref::<SizeSnapshotError>() {
            if let Some(suggestion) = snapshot_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(snapshot_error) = error.downcast_ref::<SizeSnapshotError>() {
            snapshot_error.exit_code()
        } else {
            1 // Generic error
        }
    }
}
