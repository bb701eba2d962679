//! Side-effect and constant analysis
//!
//! Decides whether evaluating an expression, statement or class at module
//! scope can be observed from outside the module. Anything the analyzer
//! cannot prove pure is reported as effectful.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use oxc_ast::ast::{
    Argument, ArrayExpressionElement, ArrowFunctionExpression, AssignmentTarget, BinaryOperator,
    BindingPattern, CallExpression, Class, ClassElement, Declaration, ExportDefaultDeclarationKind,
    Expression, FormalParameters, Function, FunctionBody, LogicalOperator, NewExpression,
    ObjectPropertyKind, Program, PropertyKey, SimpleAssignmentTarget, Statement, UnaryOperator,
    VariableDeclaration,
};
use oxc_ast_visit::Visit;
use oxc_span::{GetSpan, Span};

use super::names::{pattern_names, top_level_bindings, BindingCollector, WriteCollector};

/// Nesting limit for function-body analysis
const MAX_DEPTH: usize = 16;

/// Global functions that never touch outside state
const PURE_GLOBAL_CALLS: &[&str] = &[
    "Boolean",
    "Number",
    "String",
    "Symbol",
    "isFinite",
    "isNaN",
    "parseFloat",
    "parseInt",
];

/// Built-in constructors with no observable side effects
const PURE_CONSTRUCTORS: &[&str] = &[
    "Array",
    "Date",
    "Error",
    "Map",
    "Object",
    "RangeError",
    "RegExp",
    "Set",
    "TypeError",
    "WeakMap",
    "WeakSet",
];

/// Static methods on built-in namespaces with no observable side effects
const PURE_NAMESPACE_CALLS: &[(&str, &str)] = &[
    ("Array", "isArray"),
    ("Array", "of"),
    ("Date", "now"),
    ("Number", "isFinite"),
    ("Number", "isInteger"),
    ("Number", "isNaN"),
    ("Number", "parseFloat"),
    ("Number", "parseInt"),
    ("Object", "create"),
    ("Object", "entries"),
    ("Object", "getOwnPropertyNames"),
    ("Object", "getPrototypeOf"),
    ("Object", "is"),
    ("Object", "keys"),
    ("Object", "values"),
    ("String", "fromCharCode"),
    ("Symbol", "for"),
];

fn is_pure_namespace_call(namespace: &str, property: &str) -> bool {
    namespace == "Math"
        || PURE_NAMESPACE_CALLS
            .iter()
            .any(|(ns, prop)| *ns == namespace && *prop == property)
}

/// Heuristics an engine applies when deciding what is removable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectPolicy {
    /// Honour `/*#__PURE__*/` and `/*@__PURE__*/` call annotations
    pub pure_annotations: bool,
    /// Look into the bodies of module-level functions to decide whether
    /// calling them is pure
    pub analyze_local_calls: bool,
}

impl EffectPolicy {
    /// Aggressive: follows calls into local functions
    pub const fn aggressive() -> Self {
        Self {
            pure_annotations: true,
            analyze_local_calls: true,
        }
    }

    /// Conservative: every unannotated call to a local function is kept
    pub const fn conservative() -> Self {
        Self {
            pure_annotations: true,
            analyze_local_calls: false,
        }
    }
}

impl Default for EffectPolicy {
    fn default() -> Self {
        Self::aggressive()
    }
}

/// A compile-time known primitive value
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Str(String),
    Num(f64),
    Bool(bool),
    Null,
    Undefined,
}

impl Constant {
    /// JavaScript truthiness
    pub fn truthy(&self) -> bool {
        match self {
            Self::Str(s) => !s.is_empty(),
            Self::Num(n) => *n != 0.0 && !n.is_nan(),
            Self::Bool(b) => *b,
            Self::Null | Self::Undefined => false,
        }
    }

    fn is_nullish(&self) -> bool {
        matches!(self, Self::Null | Self::Undefined)
    }

    /// Result of the `typeof` operator
    pub fn type_of(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Num(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Null => "object",
            Self::Undefined => "undefined",
        }
    }

    /// `===`
    pub fn strict_equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Num(a), Self::Num(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Null, Self::Null) | (Self::Undefined, Self::Undefined) => true,
            _ => false,
        }
    }

    /// `==`, or `None` when coercion rules would be needed
    pub fn loose_equals(&self, other: &Self) -> Option<bool> {
        match (self, other) {
            (a, b) if a.is_nullish() && b.is_nullish() => Some(true),
            (a, b) if a.is_nullish() || b.is_nullish() => Some(false),
            (a, b) if a.type_of() == b.type_of() => Some(a.strict_equals(b)),
            _ => None,
        }
    }
}

#[derive(Clone, Copy)]
enum Callable<'b, 'a> {
    Function(&'b Function<'a>),
    Arrow(&'b ArrowFunctionExpression<'a>),
}

impl<'b, 'a> Callable<'b, 'a> {
    fn params(self) -> &'b FormalParameters<'a> {
        match self {
            Self::Function(f) => &*f.params,
            Self::Arrow(a) => &*a.params,
        }
    }

    fn body(self) -> Option<&'b FunctionBody<'a>> {
        match self {
            Self::Function(f) => f.body.as_deref(),
            Self::Arrow(a) => Some(&*a.body),
        }
    }
}

/// Names visible as locals while analyzing a function body
#[derive(Clone, Copy)]
struct Scope<'l> {
    locals: Option<&'l HashSet<String>>,
    depth: usize,
}

const TOP_SCOPE: Scope<'static> = Scope {
    locals: None,
    depth: 0,
};

impl Scope<'_> {
    fn is_local(&self, name: &str) -> bool {
        self.locals.is_some_and(|locals| locals.contains(name))
    }

    fn is_local_target(&self, target: &AssignmentTarget<'_>) -> bool {
        match target {
            AssignmentTarget::AssignmentTargetIdentifier(id) => self.is_local(id.name.as_str()),
            _ => false,
        }
    }
}

fn unwrap_parens<'e, 'a>(mut expr: &'e Expression<'a>) -> &'e Expression<'a> {
    while let Expression::ParenthesizedExpression(p) = expr {
        expr = &p.expression;
    }
    expr
}

/// Collect names declared directly in a function body (not in nested functions)
fn collect_declared(stmt: &Statement<'_>, out: &mut HashSet<String>) {
    match stmt {
        Statement::VariableDeclaration(v) => {
            for d in &v.declarations {
                out.extend(pattern_names(&d.id));
            }
        }
        Statement::FunctionDeclaration(f) => out.extend(f.id.iter().map(|id| id.name.to_string())),
        Statement::ClassDeclaration(c) => out.extend(c.id.iter().map(|id| id.name.to_string())),
        Statement::BlockStatement(b) => {
            for s in &b.body {
                collect_declared(s, out);
            }
        }
        Statement::IfStatement(s) => {
            collect_declared(&s.consequent, out);
            if let Some(alt) = &s.alternate {
                collect_declared(alt, out);
            }
        }
        _ => {}
    }
}

/// Side-effect analyzer bound to one parsed module
pub struct EffectAnalyzer<'b, 'a> {
    source: &'b str,
    policy: EffectPolicy,
    declared: HashSet<String>,
    functions: HashMap<String, Callable<'b, 'a>>,
    in_progress: RefCell<HashSet<String>>,
    // Number of times a recursive call was assumed pure
    assumptions: Cell<usize>,
    call_cache: RefCell<HashMap<String, bool>>,
}

impl<'b, 'a> EffectAnalyzer<'b, 'a> {
    /// Index the module-level declarations of `program`.
    ///
    /// `source` must be the exact text `program` was parsed from.
    pub fn new(program: &'b Program<'a>, source: &'b str, policy: EffectPolicy) -> Self {
        let mut analyzer = Self {
            source,
            policy,
            declared: top_level_bindings(program),
            functions: HashMap::new(),
            in_progress: RefCell::new(HashSet::new()),
            assumptions: Cell::new(0),
            call_cache: RefCell::new(HashMap::new()),
        };

        for stmt in &program.body {
            match stmt {
                Statement::FunctionDeclaration(f) => analyzer.register_function(f),
                Statement::VariableDeclaration(v) => analyzer.register_variables(v),
                Statement::ExportNamedDeclaration(export) => match &export.declaration {
                    Some(Declaration::FunctionDeclaration(f)) => analyzer.register_function(f),
                    Some(Declaration::VariableDeclaration(v)) => analyzer.register_variables(v),
                    _ => {}
                },
                Statement::ExportDefaultDeclaration(export) => {
                    if let ExportDefaultDeclarationKind::FunctionDeclaration(f) =
                        &export.declaration
                    {
                        analyzer.register_function(f);
                    }
                }
                _ => {}
            }
        }

        // A reassigned binding may point at anything by the time it is called
        let mut writes = WriteCollector::default();
        writes.visit_program(program);
        for name in &writes.names {
            analyzer.functions.remove(name);
        }

        analyzer
    }

    fn register_function(&mut self, f: &'b Function<'a>) {
        if let Some(id) = &f.id {
            self.functions
                .insert(id.name.to_string(), Callable::Function(f));
        }
    }

    fn register_variables(&mut self, v: &'b VariableDeclaration<'a>) {
        for d in &v.declarations {
            let Some(name) = self.simple_binding(&d.id) else {
                continue;
            };
            match &d.init {
                Some(Expression::FunctionExpression(f)) => {
                    self.functions.insert(name, Callable::Function(f));
                }
                Some(Expression::ArrowFunctionExpression(a)) => {
                    self.functions.insert(name, Callable::Arrow(a));
                }
                _ => {}
            }
        }
    }

    /// Name of a plain identifier pattern; `None` for destructuring
    pub fn simple_binding(&self, pattern: &BindingPattern<'_>) -> Option<String> {
        let names = pattern_names(pattern);
        match names.as_slice() {
            [name] if name == self.slice(pattern.span()) => Some(name.clone()),
            _ => None,
        }
    }

    /// Whether `name` is bound at module scope
    pub fn is_declared(&self, name: &str) -> bool {
        self.declared.contains(name)
    }

    fn slice(&self, span: Span) -> &str {
        self.source
            .get(span.start as usize..span.end as usize)
            .unwrap_or_default()
    }

    /// Whether a `/*#__PURE__*/` comment immediately precedes `span`
    fn has_pure_annotation(&self, span: Span) -> bool {
        let Some(before) = self.source.get(..span.start as usize) else {
            return false;
        };
        let Some(rest) = before.trim_end().strip_suffix("*/") else {
            return false;
        };
        let Some(open) = rest.rfind("/*") else {
            return false;
        };
        matches!(rest[open + 2..].trim(), "#__PURE__" | "@__PURE__")
    }

    /// Whether evaluating `expr` at module scope is unobservable
    pub fn is_pure(&self, expr: &Expression<'a>) -> bool {
        self.expr_pure(expr, TOP_SCOPE)
    }

    /// Whether evaluating a class definition is unobservable
    pub fn class_is_pure(&self, class: &Class<'a>) -> bool {
        self.class_pure(class, TOP_SCOPE)
    }

    /// Whether executing `stmt` at module scope is unobservable
    pub fn statement_is_pure(&self, stmt: &Statement<'a>) -> bool {
        self.stmt_pure(stmt, TOP_SCOPE)
    }

    /// Whether a variable declarator with this init can be dropped
    pub fn declarator_is_pure(
        &self,
        pattern: &BindingPattern<'a>,
        init: Option<&Expression<'a>>,
    ) -> bool {
        self.declarator_pure(pattern, init, TOP_SCOPE)
    }

    fn declarator_pure(
        &self,
        pattern: &BindingPattern<'a>,
        init: Option<&Expression<'a>>,
        scope: Scope<'_>,
    ) -> bool {
        let Some(init) = init else {
            return true;
        };
        if !self.expr_pure(init, scope) {
            return false;
        }
        // Destructuring a non-literal may run getters or iterators
        self.simple_binding(pattern).is_some()
            || matches!(
                unwrap_parens(init),
                Expression::ObjectExpression(_) | Expression::ArrayExpression(_)
            )
    }

    fn stmt_pure(&self, stmt: &Statement<'a>, scope: Scope<'_>) -> bool {
        match stmt {
            Statement::EmptyStatement(_) | Statement::FunctionDeclaration(_) => true,
            Statement::ClassDeclaration(c) => self.class_pure(c, scope),
            Statement::VariableDeclaration(v) => v
                .declarations
                .iter()
                .all(|d| self.declarator_pure(&d.id, d.init.as_ref(), scope)),
            Statement::ExpressionStatement(s) => self.expr_pure(&s.expression, scope),
            Statement::ReturnStatement(r) => r
                .argument
                .as_ref()
                .is_none_or(|e| self.expr_pure(e, scope)),
            Statement::BlockStatement(b) => b.body.iter().all(|s| self.stmt_pure(s, scope)),
            Statement::IfStatement(s) => {
                if !self.expr_pure(&s.test, scope) {
                    return false;
                }
                let alternate_pure = || {
                    s.alternate
                        .as_ref()
                        .is_none_or(|alt| self.stmt_pure(alt, scope))
                };
                match self.truthiness(&s.test) {
                    Some(true) => self.stmt_pure(&s.consequent, scope),
                    Some(false) => alternate_pure(),
                    None => self.stmt_pure(&s.consequent, scope) && alternate_pure(),
                }
            }
            _ => false,
        }
    }

    fn expr_pure(&self, expr: &Expression<'a>, scope: Scope<'_>) -> bool {
        if scope.depth > MAX_DEPTH {
            return false;
        }

        match expr {
            Expression::BooleanLiteral(_)
            | Expression::NullLiteral(_)
            | Expression::NumericLiteral(_)
            | Expression::BigIntLiteral(_)
            | Expression::RegExpLiteral(_)
            | Expression::StringLiteral(_)
            | Expression::Identifier(_)
            | Expression::ThisExpression(_)
            | Expression::Super(_)
            | Expression::MetaProperty(_)
            | Expression::FunctionExpression(_)
            | Expression::ArrowFunctionExpression(_) => true,
            Expression::TemplateLiteral(t) => t.expressions.iter().all(|e| self.expr_pure(e, scope)),
            Expression::ArrayExpression(a) => a.elements.iter().all(|el| match el {
                ArrayExpressionElement::SpreadElement(_) => false,
                ArrayExpressionElement::Elision(_) => true,
                other => other
                    .as_expression()
                    .is_some_and(|e| self.expr_pure(e, scope)),
            }),
            Expression::ObjectExpression(o) => o.properties.iter().all(|prop| match prop {
                ObjectPropertyKind::ObjectProperty(p) => {
                    (!p.computed || self.key_pure(&p.key, scope)) && self.expr_pure(&p.value, scope)
                }
                ObjectPropertyKind::SpreadProperty(_) => false,
            }),
            Expression::ClassExpression(c) => self.class_pure(c, scope),
            Expression::ParenthesizedExpression(p) => self.expr_pure(&p.expression, scope),
            Expression::SequenceExpression(s) => {
                s.expressions.iter().all(|e| self.expr_pure(e, scope))
            }
            Expression::UnaryExpression(u) => {
                !matches!(u.operator, UnaryOperator::Delete) && self.expr_pure(&u.argument, scope)
            }
            Expression::BinaryExpression(b) => {
                self.expr_pure(&b.left, scope) && self.expr_pure(&b.right, scope)
            }
            Expression::LogicalExpression(l) => {
                if !self.expr_pure(&l.left, scope) {
                    return false;
                }
                let short_circuits = match (l.operator, self.constant(&l.left)) {
                    (LogicalOperator::And, Some(c)) => !c.truthy(),
                    (LogicalOperator::Or, Some(c)) => c.truthy(),
                    (LogicalOperator::Coalesce, Some(c)) => !c.is_nullish(),
                    (_, None) => false,
                };
                short_circuits || self.expr_pure(&l.right, scope)
            }
            Expression::ConditionalExpression(c) => {
                if !self.expr_pure(&c.test, scope) {
                    return false;
                }
                match self.truthiness(&c.test) {
                    Some(true) => self.expr_pure(&c.consequent, scope),
                    Some(false) => self.expr_pure(&c.alternate, scope),
                    None => {
                        self.expr_pure(&c.consequent, scope) && self.expr_pure(&c.alternate, scope)
                    }
                }
            }
            Expression::StaticMemberExpression(m) => self.expr_pure(&m.object, scope),
            Expression::ComputedMemberExpression(m) => {
                self.expr_pure(&m.object, scope) && self.expr_pure(&m.expression, scope)
            }
            Expression::PrivateFieldExpression(m) => self.expr_pure(&m.object, scope),
            Expression::CallExpression(c) => self.call_pure(c, scope),
            Expression::NewExpression(n) => self.new_pure(n, scope),
            Expression::AssignmentExpression(a) => {
                scope.is_local_target(&a.left) && self.expr_pure(&a.right, scope)
            }
            Expression::UpdateExpression(u) => matches!(
                &u.argument,
                SimpleAssignmentTarget::AssignmentTargetIdentifier(id)
                    if scope.is_local(id.name.as_str())
            ),
            _ => false,
        }
    }

    fn key_pure(&self, key: &PropertyKey<'a>, scope: Scope<'_>) -> bool {
        key.as_expression().is_none_or(|k| self.expr_pure(k, scope))
    }

    fn arguments_pure(&self, args: &[Argument<'a>], scope: Scope<'_>) -> bool {
        args.iter().all(|arg| match arg {
            Argument::SpreadElement(_) => false,
            other => other
                .as_expression()
                .is_some_and(|e| self.expr_pure(e, scope)),
        })
    }

    fn call_pure(&self, call: &CallExpression<'a>, scope: Scope<'_>) -> bool {
        if !self.arguments_pure(&call.arguments, scope) {
            return false;
        }
        if self.policy.pure_annotations && self.has_pure_annotation(call.span) {
            return true;
        }

        match unwrap_parens(&call.callee) {
            Expression::FunctionExpression(f) => self.callable_pure(Callable::Function(f), scope),
            Expression::ArrowFunctionExpression(a) => self.callable_pure(Callable::Arrow(a), scope),
            Expression::Identifier(id) => {
                let name = id.name.as_str();
                if scope.is_local(name) {
                    return false;
                }
                if PURE_GLOBAL_CALLS.contains(&name) && !self.is_declared(name) {
                    return true;
                }
                self.policy.analyze_local_calls && self.local_call_pure(name, scope)
            }
            Expression::StaticMemberExpression(m) => match &m.object {
                Expression::Identifier(obj) => {
                    let namespace = obj.name.as_str();
                    !scope.is_local(namespace)
                        && !self.is_declared(namespace)
                        && is_pure_namespace_call(namespace, m.property.name.as_str())
                }
                _ => false,
            },
            _ => false,
        }
    }

    fn new_pure(&self, new: &NewExpression<'a>, scope: Scope<'_>) -> bool {
        if !self.arguments_pure(&new.arguments, scope) {
            return false;
        }
        if self.policy.pure_annotations && self.has_pure_annotation(new.span) {
            return true;
        }

        match unwrap_parens(&new.callee) {
            Expression::Identifier(id) => {
                let name = id.name.as_str();
                PURE_CONSTRUCTORS.contains(&name) && !scope.is_local(name) && !self.is_declared(name)
            }
            _ => false,
        }
    }

    /// Calling a module-level function; recursion is assumed pure
    ///
    /// A `true` reached through such an assumption is only final once the
    /// outermost call settles, so it is not cached before then. `false` is
    /// always final.
    fn local_call_pure(&self, name: &str, scope: Scope<'_>) -> bool {
        if let Some(&known) = self.call_cache.borrow().get(name) {
            return known;
        }
        let Some(callable) = self.functions.get(name).copied() else {
            return false;
        };
        if !self.in_progress.borrow_mut().insert(name.to_string()) {
            self.assumptions.set(self.assumptions.get() + 1);
            return true;
        }

        let assumed_before = self.assumptions.get();
        let callee_scope = Scope {
            locals: None,
            depth: scope.depth + 1,
        };
        let pure = self.callable_pure(callable, callee_scope);

        let mut in_progress = self.in_progress.borrow_mut();
        in_progress.remove(name);
        let provisional =
            pure && self.assumptions.get() > assumed_before && !in_progress.is_empty();
        drop(in_progress);
        if !provisional {
            self.call_cache.borrow_mut().insert(name.to_string(), pure);
        }
        pure
    }

    fn callable_pure(&self, callable: Callable<'_, 'a>, scope: Scope<'_>) -> bool {
        if scope.depth >= MAX_DEPTH {
            return false;
        }
        let Some(body) = callable.body() else {
            return false;
        };

        let mut params = BindingCollector::default();
        params.visit_formal_parameters(callable.params());

        let mut locals: HashSet<String> = params.names.into_iter().collect();
        for stmt in &body.statements {
            collect_declared(stmt, &mut locals);
        }
        if let Some(outer) = scope.locals {
            locals.extend(outer.iter().cloned());
        }

        let inner = Scope {
            locals: Some(&locals),
            depth: scope.depth + 1,
        };
        body.statements.iter().all(|s| self.stmt_pure(s, inner))
    }

    fn class_pure(&self, class: &Class<'a>, scope: Scope<'_>) -> bool {
        if !class.decorators.is_empty() {
            return false;
        }
        if let Some(super_class) = &class.super_class {
            if !self.expr_pure(super_class, scope) {
                return false;
            }
        }

        class.body.body.iter().all(|element| match element {
            ClassElement::StaticBlock(_) => false,
            ClassElement::MethodDefinition(m) => !m.computed || self.key_pure(&m.key, scope),
            ClassElement::PropertyDefinition(p) => {
                (!p.computed || self.key_pure(&p.key, scope))
                    && (!p.r#static || p.value.as_ref().is_none_or(|v| self.expr_pure(v, scope)))
            }
            ClassElement::AccessorProperty(p) => {
                (!p.computed || self.key_pure(&p.key, scope))
                    && (!p.r#static || p.value.as_ref().is_none_or(|v| self.expr_pure(v, scope)))
            }
            _ => true,
        })
    }

    /// Fold `expr` to a primitive when it is built only from literals
    pub fn constant(&self, expr: &Expression<'a>) -> Option<Constant> {
        match expr {
            Expression::StringLiteral(s) => Some(Constant::Str(s.value.to_string())),
            Expression::NumericLiteral(n) => Some(Constant::Num(n.value)),
            Expression::BooleanLiteral(b) => Some(Constant::Bool(b.value)),
            Expression::NullLiteral(_) => Some(Constant::Null),
            Expression::Identifier(id)
                if id.name.as_str() == "undefined" && !self.is_declared("undefined") =>
            {
                Some(Constant::Undefined)
            }
            Expression::ParenthesizedExpression(p) => self.constant(&p.expression),
            Expression::UnaryExpression(u) => match u.operator {
                UnaryOperator::LogicalNot => self.truthiness(&u.argument).map(|t| Constant::Bool(!t)),
                UnaryOperator::Void if self.is_pure(&u.argument) => Some(Constant::Undefined),
                UnaryOperator::Typeof => self
                    .constant(&u.argument)
                    .map(|c| Constant::Str(c.type_of().to_string())),
                _ => None,
            },
            Expression::BinaryExpression(b) => {
                let left = self.constant(&b.left)?;
                let right = self.constant(&b.right)?;
                match b.operator {
                    BinaryOperator::StrictEquality => Some(Constant::Bool(left.strict_equals(&right))),
                    BinaryOperator::StrictInequality => {
                        Some(Constant::Bool(!left.strict_equals(&right)))
                    }
                    BinaryOperator::Equality => left.loose_equals(&right).map(Constant::Bool),
                    BinaryOperator::Inequality => {
                        left.loose_equals(&right).map(|eq| Constant::Bool(!eq))
                    }
                    _ => None,
                }
            }
            Expression::LogicalExpression(l) => {
                let left = self.constant(&l.left)?;
                let take_left = match l.operator {
                    LogicalOperator::And => !left.truthy(),
                    LogicalOperator::Or => left.truthy(),
                    LogicalOperator::Coalesce => !left.is_nullish(),
                };
                if take_left {
                    Some(left)
                } else {
                    self.constant(&l.right)
                }
            }
            _ => None,
        }
    }

    /// Statically known truthiness of `expr`
    pub fn truthiness(&self, expr: &Expression<'a>) -> Option<bool> {
        match unwrap_parens(expr) {
            Expression::ObjectExpression(_)
            | Expression::ArrayExpression(_)
            | Expression::FunctionExpression(_)
            | Expression::ArrowFunctionExpression(_)
            | Expression::ClassExpression(_)
            | Expression::RegExpLiteral(_) => Some(true),
            other => self.constant(other).map(|c| c.truthy()),
        }
    }
}
