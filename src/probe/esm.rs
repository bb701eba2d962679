//! ES module tree-shaking probe
//!
//! Walks the synthetic graph from the entry through a [`ModuleHost`],
//! shakes every module with aggressive purity analysis, and emits a single
//! ES module chunk: external imports first, then retained statements in
//! dependency order.

use std::collections::HashSet;

use log::debug;
use oxc_allocator::Allocator;

use super::{ProbeConfig, ProbeError, TreeshakeProbe};
use crate::graph::{ModuleHost, SyntheticGraph, ENTRY_ID};
use crate::js::define::replace_node_env;
use crate::js::effects::EffectPolicy;
use crate::js::shake::{shake, RetainedImport};
use crate::js::{import_statements_size, minify, parse_module, MinifyOptions, SourceKind};
use crate::metrics::{Metric, MetricsRecord};

/// Key of the minified chunk length
pub const CODE: &str = "code";

/// Key of the bytes taken by `import` statements in the minified chunk
pub const IMPORT_STATEMENTS: &str = "import_statements";

/// Applies the production `NODE_ENV` define to every module as it is loaded
struct ProductionHost<'g, H> {
    inner: &'g H,
}

impl<H: ModuleHost> ModuleHost for ProductionHost<'_, H> {
    fn resolve(&self, importee: &str) -> Option<String> {
        self.inner.resolve(importee)
    }

    fn load(&self, id: &str) -> Option<String> {
        self.inner.load(id).map(|source| replace_node_env(&source))
    }
}

#[derive(Debug, Default)]
struct Chunk {
    externals: Vec<RetainedImport>,
    statements: Vec<String>,
}

impl Chunk {
    /// Merge with an earlier import of the same source
    fn add_external(&mut self, import: RetainedImport) {
        match self
            .externals
            .iter_mut()
            .find(|existing| existing.source == import.source)
        {
            Some(existing) => {
                for binding in import.bindings {
                    if !existing.bindings.contains(&binding) {
                        existing.bindings.push(binding);
                    }
                }
            }
            None => self.externals.push(import),
        }
    }

    fn render(&self) -> String {
        self.externals
            .iter()
            .map(RetainedImport::to_esm)
            .chain(self.statements.iter().cloned())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Rollup-style probe: ES output, local calls followed, top-level mangling
#[derive(Debug, Clone, Copy, Default)]
pub struct EsmProbe;

impl EsmProbe {
    /// Tree-shake `config.code` and return the emitted, unminified chunk
    pub fn bundle(&self, config: &ProbeConfig) -> Result<String, ProbeError> {
        let graph = SyntheticGraph::new(config.code.clone(), config.external.clone());
        let host = ProductionHost { inner: &graph };

        let mut chunk = Chunk::default();
        let mut visited = HashSet::new();
        include_module(&host, &graph, ENTRY_ID, &mut visited, &mut chunk)?;

        Ok(chunk.render())
    }
}

fn include_module(
    host: &impl ModuleHost,
    graph: &SyntheticGraph,
    id: &str,
    visited: &mut HashSet<String>,
    chunk: &mut Chunk,
) -> Result<(), ProbeError> {
    if !visited.insert(id.to_string()) {
        return Ok(());
    }

    let source = host
        .load(id)
        .ok_or_else(|| ProbeError::Load(id.to_string()))?;
    let allocator = Allocator::default();
    let program = parse_module(&allocator, id, &source)?;
    let shaken = shake(&program, &source, EffectPolicy::aggressive());
    debug!(
        "{}: kept {} statements, {} import sources",
        id,
        shaken.statements.len(),
        shaken.imports.len()
    );

    for import in shaken.imports {
        if graph.is_external(&import.source) {
            chunk.add_external(import);
            continue;
        }
        match host.resolve(&import.source) {
            Some(dependency) => include_module(host, graph, &dependency, visited, chunk)?,
            None => {
                return Err(ProbeError::Unresolved {
                    specifier: import.source,
                    importer: id.to_string(),
                })
            }
        }
    }

    chunk.statements.extend(shaken.statements);
    Ok(())
}

impl TreeshakeProbe for EsmProbe {
    fn name(&self) -> &'static str {
        "probeA"
    }

    fn run(&self, config: &ProbeConfig) -> Result<Metric, ProbeError> {
        let chunk = self.bundle(config)?;

        let (code, import_statements) = if chunk.trim().is_empty() {
            (0, 0)
        } else {
            let minified = minify(
                &chunk,
                MinifyOptions {
                    kind: SourceKind::Module,
                    top_level: true,
                },
            )?;
            (minified.len() as u64, import_statements_size(&minified)?)
        };
        debug!(
            "{}: {} bytes, {} in import statements",
            self.name(),
            code,
            import_statements
        );

        Ok(Metric::Group(MetricsRecord::from_iter([
            (CODE, Metric::Bytes(code)),
            (IMPORT_STATEMENTS, Metric::Bytes(import_statements)),
        ])))
    }
}
