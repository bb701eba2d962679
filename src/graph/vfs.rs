//! In-memory virtual filesystem for a single probe invocation

use std::collections::HashMap;

use super::{SyntheticGraph, BUNDLE_ID, ENTRY_ID};

/// Arena of named in-memory buffers keyed by synthetic path.
///
/// One arena is created per probe call and dropped with it; nothing is ever
/// written to the real filesystem.
#[derive(Debug, Default)]
pub struct VirtualFs {
    files: HashMap<String, String>,
}

impl VirtualFs {
    /// Create an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an arena holding the entry and bundle modules of `graph`
    pub fn from_graph(graph: &SyntheticGraph) -> Self {
        let mut fs = Self::new();
        fs.write_file(ENTRY_ID, SyntheticGraph::entry_source());
        fs.write_file(BUNDLE_ID, graph.code());
        fs
    }

    /// Write (or replace) a virtual file
    pub fn write_file(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Read a virtual file
    pub fn read_file(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Number of files in the arena
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the arena holds no files
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
