//! Synthetic module graph
//!
//! Tree-shaking engines only shake *dependencies*: the program root is
//! usually kept as-is. To measure how much of an arbitrary code string
//! survives dead-code elimination, the code is presented as a dependency of
//! a tiny entry module that imports nothing from it:
//!
//! ```text
//! /__size_snapshot_input__.js   import {} from "/__size_snapshot_bundle__.js";
//! /__size_snapshot_bundle__.js  <code under test>
//! ```
//!
//! Both ids sit at the graph root so no package metadata (`exports`,
//! `sideEffects`) can ever be attached to them, and the sentinel names make
//! accidental resolution to a real file practically impossible.

pub mod vfs;

pub use vfs::VirtualFs;

use std::fmt;
use std::sync::Arc;

/// File name of the synthetic entry module
pub const ENTRY_NAME: &str = "__size_snapshot_input__.js";

/// File name of the module that holds the code under test
pub const BUNDLE_NAME: &str = "__size_snapshot_bundle__.js";

/// Canonical id of the synthetic entry module
pub const ENTRY_ID: &str = "/__size_snapshot_input__.js";

/// Canonical id of the module that holds the code under test
pub const BUNDLE_ID: &str = "/__size_snapshot_bundle__.js";

/// Path the runtime probe emits its chunk to, in its own output arena
pub const OUTPUT_ID: &str = "/__size_snapshot_output__.js";

/// Check whether an id refers to one of the two reserved modules.
///
/// Matching is by containment so that decorated ids (query suffixes,
/// `./` prefixes, normalised separators) still hit.
pub fn is_reserved_id(id: &str) -> bool {
    id.contains(ENTRY_NAME) || id.contains(BUNDLE_NAME)
}

/// Default external classification: anything that is neither a relative
/// nor an absolute path is a package import and stays external.
///
/// # Examples
///
/// ```
/// use size_snapshot::graph::is_bare_specifier;
///
/// assert!(is_bare_specifier("react"));
/// assert!(is_bare_specifier("@scope/pkg/sub"));
/// assert!(!is_bare_specifier("./local.js"));
/// assert!(!is_bare_specifier("/abs/path.js"));
/// ```
pub fn is_bare_specifier(id: &str) -> bool {
    !id.starts_with('.') && !id.starts_with('/')
}

/// Shared predicate deciding whether an import specifier is external
#[derive(Clone)]
pub struct ExternalPredicate(Arc<dyn Fn(&str) -> bool + Send + Sync>);

impl ExternalPredicate {
    /// Wrap a classification function
    pub fn new(predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(predicate))
    }

    /// Treat every specifier except the reserved ids as external.
    ///
    /// This is what the metrics calculator uses: build outputs may import
    /// sibling chunks by relative path, and those must not be followed.
    pub fn all_but_reserved() -> Self {
        Self::new(|id| !is_reserved_id(id))
    }

    /// Classify a specifier
    pub fn is_external(&self, id: &str) -> bool {
        (self.0)(id)
    }
}

impl Default for ExternalPredicate {
    fn default() -> Self {
        Self::new(is_bare_specifier)
    }
}

impl fmt::Debug for ExternalPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ExternalPredicate(..)")
    }
}

/// Module resolution and loading, as seen by an engine.
///
/// `resolve` returns `None` to defer to default resolution; `load` returns
/// `None` when the host does not provide the module.
pub trait ModuleHost {
    /// Resolve an import specifier to a canonical module id
    fn resolve(&self, importee: &str) -> Option<String>;

    /// Load the source text of a resolved module
    fn load(&self, id: &str) -> Option<String>;
}

/// The two-module graph wrapping a code string
#[derive(Debug, Clone)]
pub struct SyntheticGraph {
    code: String,
    external: ExternalPredicate,
}

impl SyntheticGraph {
    /// Build a graph for `code` with the given external classification
    pub fn new(code: impl Into<String>, external: ExternalPredicate) -> Self {
        Self {
            code: code.into(),
            external,
        }
    }

    /// The code under test
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Source of the entry module: a zero-binding import of the bundle
    pub fn entry_source() -> String {
        format!("import {{}} from \"{}\";", BUNDLE_ID)
    }

    /// Classify a non-reserved specifier.
    ///
    /// Reserved ids are never external regardless of the predicate.
    pub fn is_external(&self, specifier: &str) -> bool {
        !is_reserved_id(specifier) && self.external.is_external(specifier)
    }
}

impl ModuleHost for SyntheticGraph {
    fn resolve(&self, importee: &str) -> Option<String> {
        if importee.contains(ENTRY_NAME) {
            Some(ENTRY_ID.to_string())
        } else if importee.contains(BUNDLE_NAME) {
            Some(BUNDLE_ID.to_string())
        } else {
            None
        }
    }

    fn load(&self, id: &str) -> Option<String> {
        if id.contains(ENTRY_NAME) {
            Some(Self::entry_source())
        } else if id.contains(BUNDLE_NAME) {
            Some(self.code.clone())
        } else {
            None
        }
    }
}
