//! Module-registry runtime tree-shaking probe
//!
//! Compiles the synthetic graph out of a per-call [`VirtualFs`] the way a
//! production webpack build would: `process.env.NODE_ENV` is defined,
//! externals become `commonjs` requires through a small module registry, no
//! Node.js shims are injected, and the whole chunk is wrapped in an IIFE.
//! Calls into local functions are never assumed pure.

use std::collections::HashSet;

use log::debug;
use oxc_allocator::Allocator;

use super::{ProbeConfig, ProbeError, TreeshakeProbe};
use crate::graph::{is_reserved_id, SyntheticGraph, VirtualFs, BUNDLE_ID, ENTRY_ID, OUTPUT_ID};
use crate::js::define::replace_node_env;
use crate::js::effects::EffectPolicy;
use crate::js::shake::{shake, ImportedName, RetainedImport};
use crate::js::{minify, parse_module, JsError, MinifyOptions, SourceKind};
use crate::metrics::{Metric, MetricsRecord};

/// Key of the emitted chunk length
pub const CODE: &str = "code";

const COMMONJS_PREFIX: &str = "commonjs ";

/// Webpack-style externals callback: `Some("commonjs <request>")` for
/// requests that must not be bundled
fn classify_external(graph: &SyntheticGraph, request: &str) -> Option<String> {
    graph
        .is_external(request)
        .then(|| format!("{COMMONJS_PREFIX}{request}"))
}

/// Resolve a request against the virtual filesystem, rooted at `/`
fn resolve_request(fs: &VirtualFs, request: &str) -> Option<String> {
    if is_reserved_id(request) {
        return if request.contains(BUNDLE_ID.trim_start_matches('/')) {
            Some(BUNDLE_ID.to_string())
        } else {
            Some(ENTRY_ID.to_string())
        };
    }

    let path = match request.strip_prefix("./") {
        Some(rest) => format!("/{rest}"),
        None if request.starts_with('/') => request.to_string(),
        None => return None,
    };
    [path.clone(), format!("{path}.js")]
        .into_iter()
        .find(|candidate| fs.read_file(candidate).is_some())
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

/// A `commonjs` external and the bindings imported from it
#[derive(Debug)]
struct External {
    request: String,
    bindings: Vec<RetainedImport>,
}

#[derive(Debug)]
struct Compilation<'c> {
    fs: &'c VirtualFs,
    graph: &'c SyntheticGraph,
    visited: HashSet<String>,
    externals: Vec<External>,
    statements: Vec<String>,
    errors: Vec<String>,
}

impl<'c> Compilation<'c> {
    fn new(fs: &'c VirtualFs, graph: &'c SyntheticGraph) -> Self {
        Self {
            fs,
            graph,
            visited: HashSet::new(),
            externals: Vec::new(),
            statements: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn build_module(&mut self, path: &str) {
        if !self.visited.insert(path.to_string()) {
            return;
        }
        let Some(raw) = self.fs.read_file(path) else {
            self.errors
                .push(format!("Module not found: Error: Can't resolve '{path}' in '/'"));
            return;
        };

        let source = replace_node_env(raw);
        let allocator = Allocator::default();
        let program = match parse_module(&allocator, path, &source) {
            Ok(program) => program,
            Err(JsError::Parse { messages, .. }) => {
                self.errors.extend(
                    messages
                        .into_iter()
                        .map(|m| format!("Module parse failed: {m}")),
                );
                return;
            }
        };
        let shaken = shake(&program, &source, EffectPolicy::conservative());

        for import in shaken.imports {
            if let Some(external) = classify_external(self.graph, &import.source) {
                debug!("{} -> external {}", import.source, external);
                self.add_external(&external, import);
                continue;
            }
            match resolve_request(self.fs, &import.source) {
                Some(dependency) => self.build_module(&dependency),
                None => self.errors.push(format!(
                    "Module not found: Error: Can't resolve '{}' in '/'",
                    import.source
                )),
            }
        }

        self.statements.extend(shaken.statements);
    }

    fn add_external(&mut self, external: &str, import: RetainedImport) {
        let request = external
            .strip_prefix(COMMONJS_PREFIX)
            .unwrap_or(external)
            .to_string();
        match self.externals.iter_mut().find(|e| e.request == request) {
            Some(existing) => existing.bindings.push(import),
            None => self.externals.push(External {
                request,
                bindings: vec![import],
            }),
        }
    }

    /// Emit the chunk, or an empty string when nothing survived
    fn render(&self) -> String {
        if self.statements.is_empty() && self.externals.is_empty() {
            return String::new();
        }

        let mut lines = vec!["(() => {".to_string(), "\"use strict\";".to_string()];

        if !self.externals.is_empty() {
            let modules: Vec<String> = self
                .externals
                .iter()
                .map(|e| {
                    let request = quote(&e.request);
                    format!("{request}: (module) => {{ module.exports = require({request}); }}")
                })
                .collect();
            lines.push(format!("var __modules__ = {{ {} }};", modules.join(", ")));
            lines.push("var __cache__ = {};".to_string());
            lines.push(
                "function __require__(id) { var cached = __cache__[id]; if (cached !== undefined) return cached.exports; var module = __cache__[id] = { exports: {} }; __modules__[id](module, module.exports); return module.exports; }"
                    .to_string(),
            );
        }

        let needs_interop = self.externals.iter().any(|e| {
            e.bindings
                .iter()
                .flat_map(|import| &import.bindings)
                .any(|b| b.imported == ImportedName::Default)
        });
        if needs_interop {
            lines.push(
                "var __default__ = (m) => m && m.__esModule ? m.default : m;".to_string(),
            );
        }

        for (index, external) in self.externals.iter().enumerate() {
            lines.extend(render_external(index, external));
        }
        lines.extend(self.statements.iter().cloned());
        lines.push("})();".to_string());

        lines.join("\n")
    }
}

fn render_external(index: usize, external: &External) -> Vec<String> {
    let request = quote(&external.request);
    let bindings: Vec<_> = external
        .bindings
        .iter()
        .flat_map(|import| &import.bindings)
        .collect();
    if bindings.is_empty() {
        return vec![format!("__require__({request});")];
    }

    let module = format!("__external_{index}__");
    let mut lines = vec![format!("var {module} = __require__({request});")];
    for binding in bindings {
        let value = match &binding.imported {
            ImportedName::Default => format!("__default__({module})"),
            ImportedName::Namespace => module.clone(),
            ImportedName::Named(name) if name.starts_with(['"', '\'']) => {
                format!("{module}[{name}]")
            }
            ImportedName::Named(name) => format!("{module}.{name}"),
        };
        lines.push(format!("var {} = {value};", binding.local));
    }
    lines
}

/// Webpack-style probe: registry runtime, conservative purity, no shims
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeProbe;

impl RuntimeProbe {
    /// Compile `config.code` and return the emitted, unminified chunk
    pub fn compile(&self, config: &ProbeConfig) -> Result<String, ProbeError> {
        let graph = SyntheticGraph::new(config.code.clone(), config.external.clone());
        let fs = VirtualFs::from_graph(&graph);

        let mut compilation = Compilation::new(&fs, &graph);
        compilation.build_module(ENTRY_ID);

        if !compilation.errors.is_empty() {
            return Err(ProbeError::Compilation {
                messages: compilation.errors,
            });
        }
        Ok(compilation.render())
    }
}

impl TreeshakeProbe for RuntimeProbe {
    fn name(&self) -> &'static str {
        "probeB"
    }

    fn run(&self, config: &ProbeConfig) -> Result<Metric, ProbeError> {
        let chunk = self.compile(config)?;

        let emitted = if chunk.is_empty() {
            chunk
        } else {
            minify(
                &chunk,
                MinifyOptions {
                    kind: SourceKind::Script,
                    top_level: false,
                },
            )
            .map_err(|e| ProbeError::Compilation {
                messages: e.messages().to_vec(),
            })?
        };

        // Output goes to its own arena, separate from the input modules
        let mut output = VirtualFs::new();
        output.write_file(OUTPUT_ID, emitted);
        let code = output
            .read_file(OUTPUT_ID)
            .map_or(0, |text| text.len() as u64);
        debug!("{}: {} bytes", self.name(), code);

        Ok(Metric::Group(MetricsRecord::from_iter([(
            CODE,
            Metric::Bytes(code),
        )])))
    }
}
