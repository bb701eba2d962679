//! Statement-level dead-code elimination
//!
//! The module body is split into units (one per variable declarator, function,
//! class or statement). Units with side effects are roots; everything a root
//! references is retained transitively, the rest is dropped. Exports are
//! stripped since nothing imports from the shaken module.

use std::collections::{HashMap, HashSet};

use oxc_ast::ast::{
    Class, Declaration, ExportDefaultDeclaration, ExportDefaultDeclarationKind, Function,
    IfStatement, ImportDeclaration, ImportDeclarationSpecifier, Program, Statement,
    VariableDeclaration,
};
use oxc_ast_visit::Visit;
use oxc_span::{GetSpan, Span};

use super::effects::{EffectAnalyzer, EffectPolicy};
use super::names::{import_local, pattern_names, BindingCollector, ReferenceCollector};

/// What an import binding refers to in the source module
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportedName {
    Default,
    Namespace,
    Named(String),
}

/// A single `local` binding created by an import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    /// Name bound in the importing module
    pub local: String,
    /// Name in the imported module
    pub imported: ImportedName,
}

/// An import source that survives shaking, with only its used bindings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetainedImport {
    /// Module specifier as written
    pub source: String,
    /// Bindings referenced by retained code; empty for a bare import
    pub bindings: Vec<ImportBinding>,
}

fn quote(specifier: &str) -> String {
    format!(
        "\"{}\"",
        specifier.replace('\\', "\\\\").replace('"', "\\\"")
    )
}

impl RetainedImport {
    /// Render as ES `import` statements
    pub fn to_esm(&self) -> String {
        let source = quote(&self.source);
        if self.bindings.is_empty() {
            return format!("import {source};");
        }

        let default = self
            .bindings
            .iter()
            .find(|b| b.imported == ImportedName::Default)
            .map(|b| b.local.as_str());
        let namespace = self
            .bindings
            .iter()
            .find(|b| b.imported == ImportedName::Namespace)
            .map(|b| b.local.as_str());
        let named: Vec<String> = self
            .bindings
            .iter()
            .filter_map(|b| match &b.imported {
                ImportedName::Named(name) if *name == b.local => Some(b.local.clone()),
                ImportedName::Named(name) => Some(format!("{name} as {}", b.local)),
                _ => None,
            })
            .collect();

        let mut clauses = Vec::new();
        if let Some(ns) = namespace {
            clauses.push(format!("* as {ns}"));
        }
        if !named.is_empty() {
            clauses.push(format!("{{ {} }}", named.join(", ")));
        }
        if clauses.is_empty() {
            clauses.push(String::new());
        }

        // A namespace and a named list cannot share one statement
        clauses
            .iter()
            .enumerate()
            .map(|(i, clause)| {
                let head = match (i, default, clause.is_empty()) {
                    (0, Some(d), true) => d.to_string(),
                    (0, Some(d), false) => format!("{d}, {clause}"),
                    _ => clause.clone(),
                };
                format!("import {head} from {source};")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Result of shaking one module
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShakenModule {
    /// Every import and re-export source, in source order
    pub imports: Vec<RetainedImport>,
    /// Retained statements, in source order
    pub statements: Vec<String>,
}

impl ShakenModule {
    /// Whether nothing at all survived
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.statements.is_empty()
    }

    /// Retained statements joined into a module body
    pub fn body(&self) -> String {
        self.statements.join("\n")
    }
}

#[derive(Debug)]
struct Unit {
    declares: Vec<String>,
    references: HashSet<String>,
    has_effects: bool,
    code: String,
}

#[derive(Debug)]
struct PendingImport {
    source: String,
    bindings: Vec<ImportBinding>,
    used: Vec<bool>,
}

impl PendingImport {
    fn bare(source: &str) -> Self {
        Self {
            source: source.to_string(),
            bindings: Vec::new(),
            used: Vec::new(),
        }
    }

    fn retain(self) -> RetainedImport {
        let bindings = self
            .bindings
            .into_iter()
            .zip(self.used)
            .filter_map(|(binding, used)| used.then_some(binding))
            .collect();
        RetainedImport {
            source: self.source,
            bindings,
        }
    }
}

/// Append `;` unless the statement already ends in one or in a block
fn terminated(code: &str, always: bool) -> String {
    let code = code.trim_end();
    if code.ends_with(';') || (!always && code.ends_with('}')) {
        code.to_string()
    } else {
        format!("{code};")
    }
}

struct UnitBuilder<'s, 'b, 'a> {
    source: &'s str,
    analyzer: &'s EffectAnalyzer<'b, 'a>,
}

impl<'a> UnitBuilder<'_, '_, 'a> {
    fn slice(&self, span: Span) -> &str {
        self.source
            .get(span.start as usize..span.end as usize)
            .unwrap_or_default()
    }

    fn import(&self, decl: &ImportDeclaration<'a>) -> PendingImport {
        let mut pending = PendingImport::bare(decl.source.value.as_str());

        for spec in decl.specifiers.iter().flatten() {
            let imported = match spec {
                ImportDeclarationSpecifier::ImportSpecifier(s) => {
                    ImportedName::Named(self.slice(s.imported.span()).to_string())
                }
                ImportDeclarationSpecifier::ImportDefaultSpecifier(_) => ImportedName::Default,
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(_) => ImportedName::Namespace,
            };
            pending.bindings.push(ImportBinding {
                local: import_local(spec),
                imported,
            });
            pending.used.push(false);
        }

        pending
    }

    fn push_statement(&self, stmt: &Statement<'a>, out: &mut Vec<Unit>) {
        match stmt {
            Statement::EmptyStatement(_) => {}
            Statement::VariableDeclaration(v) => self.push_variables(v, out),
            Statement::FunctionDeclaration(f) => out.extend(self.function(f)),
            Statement::ClassDeclaration(c) => out.extend(self.class(c)),
            Statement::ExportNamedDeclaration(export) => {
                if let Some(decl) = &export.declaration {
                    self.push_declaration(decl, out);
                }
            }
            Statement::ExportDefaultDeclaration(export) => self.push_default_export(export, out),
            Statement::IfStatement(s) => out.extend(self.if_statement(stmt, s)),
            Statement::ExpressionStatement(s) => {
                let mut refs = ReferenceCollector::default();
                refs.visit_expression(&s.expression);
                out.push(Unit {
                    declares: Vec::new(),
                    references: refs.names,
                    has_effects: !self.analyzer.is_pure(&s.expression),
                    code: terminated(self.slice(stmt.span()), true),
                });
            }
            other => out.push(self.opaque(other)),
        }
    }

    fn push_declaration(&self, decl: &Declaration<'a>, out: &mut Vec<Unit>) {
        match decl {
            Declaration::VariableDeclaration(v) => self.push_variables(v, out),
            Declaration::FunctionDeclaration(f) => out.extend(self.function(f)),
            Declaration::ClassDeclaration(c) => out.extend(self.class(c)),
            _ => {}
        }
    }

    fn push_variables(&self, v: &VariableDeclaration<'a>, out: &mut Vec<Unit>) {
        let Some(first) = v.declarations.first() else {
            return;
        };
        let keyword = self.slice(Span::new(v.span.start, first.span.start)).trim();

        for d in &v.declarations {
            let mut refs = ReferenceCollector::default();
            refs.visit_variable_declarator(d);
            out.push(Unit {
                declares: pattern_names(&d.id),
                references: refs.names,
                has_effects: !self.analyzer.declarator_is_pure(&d.id, d.init.as_ref()),
                code: format!("{keyword} {};", self.slice(d.span)),
            });
        }
    }

    fn function(&self, f: &Function<'a>) -> Option<Unit> {
        // Anonymous `export default function () {}` binds nothing and runs nothing
        let id = f.id.as_ref()?;
        let mut refs = ReferenceCollector::default();
        refs.visit_formal_parameters(&f.params);
        if let Some(body) = &f.body {
            refs.visit_function_body(body);
        }
        Some(Unit {
            declares: vec![id.name.to_string()],
            references: refs.names,
            has_effects: false,
            code: self.slice(f.span).to_string(),
        })
    }

    fn class(&self, c: &Class<'a>) -> Option<Unit> {
        let mut refs = ReferenceCollector::default();
        refs.visit_class(c);
        let has_effects = !self.analyzer.class_is_pure(c);
        let code = self.slice(c.span);

        match &c.id {
            Some(id) => Some(Unit {
                declares: vec![id.name.to_string()],
                references: refs.names,
                has_effects,
                code: code.to_string(),
            }),
            None if has_effects => Some(Unit {
                declares: Vec::new(),
                references: refs.names,
                has_effects,
                code: format!("({code});"),
            }),
            None => None,
        }
    }

    fn push_default_export(&self, export: &ExportDefaultDeclaration<'a>, out: &mut Vec<Unit>) {
        match &export.declaration {
            ExportDefaultDeclarationKind::FunctionDeclaration(f) => out.extend(self.function(f)),
            ExportDefaultDeclarationKind::ClassDeclaration(c) => out.extend(self.class(c)),
            other => {
                let Some(expr) = other.as_expression() else {
                    return;
                };
                let mut refs = ReferenceCollector::default();
                refs.visit_expression(expr);
                out.push(Unit {
                    declares: Vec::new(),
                    references: refs.names,
                    has_effects: !self.analyzer.is_pure(expr),
                    code: format!("({});", self.slice(expr.span())),
                });
            }
        }
    }

    /// A constant test keeps only the branch that runs
    fn if_statement(&self, stmt: &Statement<'a>, s: &IfStatement<'a>) -> Option<Unit> {
        if self.analyzer.is_pure(&s.test) {
            match self.analyzer.truthiness(&s.test) {
                Some(true) => return self.branch(&s.consequent),
                Some(false) => return s.alternate.as_ref().and_then(|alt| self.branch(alt)),
                None => {}
            }
        }

        let mut unit = self.opaque(stmt);
        unit.has_effects = !self.analyzer.statement_is_pure(stmt);
        Some(unit)
    }

    fn branch(&self, stmt: &Statement<'a>) -> Option<Unit> {
        if let Statement::IfStatement(inner) = stmt {
            return self.if_statement(stmt, inner);
        }

        let mut unit = self.opaque(stmt);
        unit.has_effects = !self.analyzer.statement_is_pure(stmt);
        Some(unit)
    }

    /// Any other statement: kept as written and assumed effectful
    fn opaque(&self, stmt: &Statement<'a>) -> Unit {
        let mut refs = ReferenceCollector::default();
        refs.visit_statement(stmt);
        // Over-approximates `var` hoisting; extra names only cause extra retention
        let mut bindings = BindingCollector::default();
        bindings.visit_statement(stmt);
        Unit {
            declares: bindings.names,
            references: refs.names,
            has_effects: true,
            code: terminated(self.slice(stmt.span()), false),
        }
    }
}

/// Remove every module-level statement that nothing effectful depends on.
///
/// `source` must be the exact text `program` was parsed from. Import and
/// re-export sources are always reported since loading a module may itself
/// have effects; only their unused bindings are dropped.
pub fn shake(program: &Program<'_>, source: &str, policy: EffectPolicy) -> ShakenModule {
    let analyzer = EffectAnalyzer::new(program, source, policy);
    let builder = UnitBuilder {
        source,
        analyzer: &analyzer,
    };

    let mut imports = Vec::new();
    let mut units = Vec::new();
    for stmt in &program.body {
        match stmt {
            Statement::ImportDeclaration(decl) => imports.push(builder.import(decl)),
            Statement::ExportAllDeclaration(decl) => {
                imports.push(PendingImport::bare(decl.source.value.as_str()));
            }
            Statement::ExportNamedDeclaration(decl) if decl.source.is_some() => {
                if let Some(src) = &decl.source {
                    imports.push(PendingImport::bare(src.value.as_str()));
                }
            }
            _ => builder.push_statement(stmt, &mut units),
        }
    }

    let mut declared_by: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, unit) in units.iter().enumerate() {
        for name in &unit.declares {
            declared_by.entry(name.as_str()).or_default().push(i);
        }
    }
    let mut imported_as: HashMap<String, (usize, usize)> = HashMap::new();
    for (i, import) in imports.iter().enumerate() {
        for (j, binding) in import.bindings.iter().enumerate() {
            imported_as.insert(binding.local.clone(), (i, j));
        }
    }

    let mut kept: Vec<bool> = units.iter().map(|u| u.has_effects).collect();
    let mut queue: Vec<usize> = (0..units.len()).filter(|&i| kept[i]).collect();
    while let Some(i) = queue.pop() {
        for name in &units[i].references {
            if let Some(owners) = declared_by.get(name.as_str()) {
                for &owner in owners {
                    if !kept[owner] {
                        kept[owner] = true;
                        queue.push(owner);
                    }
                }
            }
            if let Some(&(import, binding)) = imported_as.get(name) {
                imports[import].used[binding] = true;
            }
        }
    }

    let statements = units
        .into_iter()
        .zip(kept)
        .filter(|(unit, kept)| *kept && !unit.code.is_empty())
        .map(|(unit, _)| unit.code)
        .collect();

    ShakenModule {
        imports: imports.into_iter().map(PendingImport::retain).collect(),
        statements,
    }
}
