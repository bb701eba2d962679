//! Binding and reference collection over the oxc AST

use std::collections::HashSet;

use oxc_ast::ast::{
    BindingIdentifier, BindingPattern, Declaration, ExportDefaultDeclarationKind,
    IdentifierReference, ImportDeclarationSpecifier, Program, SimpleAssignmentTarget, Statement,
};
use oxc_ast_visit::{walk, Visit};

/// Collects the names of every identifier *read or written* in a subtree
#[derive(Debug, Default)]
pub struct ReferenceCollector {
    /// Referenced names
    pub names: HashSet<String>,
}

impl<'a> Visit<'a> for ReferenceCollector {
    fn visit_identifier_reference(&mut self, it: &IdentifierReference<'a>) {
        self.names.insert(it.name.to_string());
    }
}

/// Collects the names bound by patterns, parameters and declarations
#[derive(Debug, Default)]
pub struct BindingCollector {
    /// Bound names in source order
    pub names: Vec<String>,
}

impl<'a> Visit<'a> for BindingCollector {
    fn visit_binding_identifier(&mut self, it: &BindingIdentifier<'a>) {
        self.names.push(it.name.to_string());
    }
}

/// Collects identifiers that appear as assignment or update targets
#[derive(Debug, Default)]
pub struct WriteCollector {
    /// Reassigned names
    pub names: HashSet<String>,
}

impl<'a> Visit<'a> for WriteCollector {
    fn visit_simple_assignment_target(&mut self, it: &SimpleAssignmentTarget<'a>) {
        if let SimpleAssignmentTarget::AssignmentTargetIdentifier(id) = it {
            self.names.insert(id.name.to_string());
        }
        walk::walk_simple_assignment_target(self, it);
    }
}

/// Names bound by a destructuring or plain binding pattern
pub fn pattern_names(pattern: &BindingPattern<'_>) -> Vec<String> {
    let mut collector = BindingCollector::default();
    collector.visit_binding_pattern(pattern);
    collector.names
}

/// Names introduced by a declaration
pub fn declaration_names(decl: &Declaration<'_>) -> Vec<String> {
    match decl {
        Declaration::VariableDeclaration(v) => v
            .declarations
            .iter()
            .flat_map(|d| pattern_names(&d.id))
            .collect(),
        Declaration::FunctionDeclaration(f) => f.id.iter().map(|id| id.name.to_string()).collect(),
        Declaration::ClassDeclaration(c) => c.id.iter().map(|id| id.name.to_string()).collect(),
        _ => Vec::new(),
    }
}

/// Local binding name of an import specifier
pub fn import_local(spec: &ImportDeclarationSpecifier<'_>) -> String {
    match spec {
        ImportDeclarationSpecifier::ImportSpecifier(s) => s.local.name.to_string(),
        ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => s.local.name.to_string(),
        ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => s.local.name.to_string(),
    }
}

/// Every name declared at module scope
pub fn top_level_bindings(program: &Program<'_>) -> HashSet<String> {
    let mut names = HashSet::new();

    for stmt in &program.body {
        match stmt {
            Statement::ImportDeclaration(decl) => {
                if let Some(specifiers) = &decl.specifiers {
                    names.extend(specifiers.iter().map(import_local));
                }
            }
            Statement::VariableDeclaration(v) => {
                for d in &v.declarations {
                    names.extend(pattern_names(&d.id));
                }
            }
            Statement::FunctionDeclaration(f) => {
                names.extend(f.id.iter().map(|id| id.name.to_string()));
            }
            Statement::ClassDeclaration(c) => {
                names.extend(c.id.iter().map(|id| id.name.to_string()));
            }
            Statement::ExportNamedDeclaration(export) => {
                if let Some(decl) = &export.declaration {
                    names.extend(declaration_names(decl));
                }
            }
            Statement::ExportDefaultDeclaration(export) => match &export.declaration {
                ExportDefaultDeclarationKind::FunctionDeclaration(f) => {
                    names.extend(f.id.iter().map(|id| id.name.to_string()));
                }
                ExportDefaultDeclarationKind::ClassDeclaration(c) => {
                    names.extend(c.id.iter().map(|id| id.name.to_string()));
                }
                _ => {}
            },
            _ => {}
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::js::parse_module;
    use oxc_allocator::Allocator;

    #[test]
    fn test_top_level_bindings_covers_all_declaration_forms() {
        let allocator = Allocator::default();
        let src = r#"
            import def, { a as b } from "x";
            import * as ns from "y";
            var { c, d: [e] } = obj;
            function f() { var inner; }
            class G {}
            export const h = 1;
            export default function i() {}
        "#;
        let program = parse_module(&allocator, "t", src).unwrap();
        let names = top_level_bindings(&program);

        for expected in ["def", "b", "ns", "c", "e", "f", "G", "h", "i"] {
            assert!(names.contains(expected), "missing {expected}");
        }
        assert!(!names.contains("inner"));
        assert!(!names.contains("a"));
    }

    #[test]
    fn test_reference_collector_sees_nested_reads() {
        let allocator = Allocator::default();
        let program = parse_module(&allocator, "t", "f(() => g + h.i);").unwrap();
        let mut collector = ReferenceCollector::default();
        collector.visit_program(&program);

        assert!(collector.names.contains("f"));
        assert!(collector.names.contains("g"));
        assert!(collector.names.contains("h"));
        assert!(!collector.names.contains("i"));
    }

    #[test]
    fn test_write_collector_finds_assignments_and_updates() {
        let allocator = Allocator::default();
        let program = parse_module(&allocator, "t", "a = 1; b++; c.d = 2; e;").unwrap();
        let mut collector = WriteCollector::default();
        collector.visit_program(&program);

        assert!(collector.names.contains("a"));
        assert!(collector.names.contains("b"));
        assert!(!collector.names.contains("c"));
        assert!(!collector.names.contains("e"));
    }
}
