//! Tree-shaking probes
//!
//! A probe pushes a code string through one dead-code elimination engine and
//! reports how many bytes survive. Two engines with different elimination
//! heuristics are provided so their results can be cross-checked:
//!
//! - [`EsmProbe`]: ES module output, aggressive purity analysis, minified
//!   with top-level mangling; also reports the bytes left in `import`
//!   statements for external packages.
//! - [`RuntimeProbe`]: module-registry runtime output with `require`d
//!   externals and conservative purity analysis.

pub mod esm;
pub mod runtime;

pub use esm::EsmProbe;
pub use runtime::RuntimeProbe;

use thiserror::Error;

use crate::graph::ExternalPredicate;
use crate::js::JsError;
use crate::metrics::Metric;

/// Errors raised while running a probe
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// The engine reported one or more compilation errors
    #[error("{}", .messages.join("\n"))]
    Compilation {
        /// One message per error, in report order
        messages: Vec<String>,
    },

    /// An import was neither external nor part of the synthetic graph
    #[error("Could not resolve \"{specifier}\" from \"{importer}\"")]
    Unresolved {
        /// Import specifier as written
        specifier: String,
        /// Module containing the import
        importer: String,
    },

    /// A resolved module had no source
    #[error("Could not load module \"{0}\"")]
    Load(String),

    /// Parsing or minifying JavaScript failed
    #[error(transparent)]
    Js(#[from] JsError),
}

/// Input shared by every probe
#[derive(Debug, Clone, Default)]
pub struct ProbeConfig {
    /// Code under test
    pub code: String,
    /// Which import specifiers stay unbundled
    pub external: ExternalPredicate,
}

impl ProbeConfig {
    /// Create a probe input
    pub fn new(code: impl Into<String>, external: ExternalPredicate) -> Self {
        Self {
            code: code.into(),
            external,
        }
    }
}

/// One tree-shaking engine.
///
/// Implementations must not keep state between calls: every `run` builds a
/// fresh module graph and engine so results do not depend on earlier calls.
pub trait TreeshakeProbe: Send + Sync {
    /// Key this probe's result is stored under
    fn name(&self) -> &'static str;

    /// Measure the tree-shaken size of `config.code`
    fn run(&self, config: &ProbeConfig) -> Result<Metric, ProbeError>;
}

/// The probes every ES-module output is measured with
pub fn default_probes() -> Vec<Box<dyn TreeshakeProbe>> {
    vec![Box::new(EsmProbe), Box::new(RuntimeProbe)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_probes_have_distinct_names() {
        let names: Vec<&str> = default_probes().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["probeA", "probeB"]);
    }

    #[test]
    fn test_compilation_error_joins_messages() {
        let err = ProbeError::Compilation {
            messages: vec!["first".to_string(), "second".to_string()],
        };
        assert_eq!(err.to_string(), "first\nsecond");
    }
}
