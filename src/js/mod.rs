//! JavaScript toolchain glue
//!
//! Thin wrappers over the oxc parser, minifier and code generator so the
//! rest of the crate never touches oxc types except in the shaker.

pub mod define;
pub mod effects;
pub mod names;
pub mod shake;

use oxc_allocator::Allocator;
use oxc_ast::ast::{Program, Statement};
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_minifier::{CompressOptions, MangleOptions, Minifier, MinifierOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;
use thiserror::Error;

/// Errors raised by the JavaScript toolchain
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JsError {
    /// Source text failed to parse
    #[error("Failed to parse {module}: {}", .messages.join("\n"))]
    Parse {
        /// Module or chunk that failed
        module: String,
        /// One message per parser diagnostic
        messages: Vec<String>,
    },
}

impl JsError {
    /// Parser diagnostics carried by this error
    pub fn messages(&self) -> &[String] {
        match self {
            Self::Parse { messages, .. } => messages,
        }
    }
}

/// How source text should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceKind {
    /// ES module (strict, import/export allowed)
    #[default]
    Module,
    /// Classic script (CommonJS, UMD, IIFE outputs)
    Script,
}

impl SourceKind {
    fn source_type(self) -> SourceType {
        match self {
            Self::Module => SourceType::mjs(),
            Self::Script => SourceType::mjs().with_module(false),
        }
    }
}

/// Minification settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MinifyOptions {
    /// How to parse the input
    pub kind: SourceKind,
    /// Also mangle and drop unused top-level bindings
    pub top_level: bool,
}

/// Parse `source` as `kind`, failing on any diagnostic.
pub fn parse<'a>(
    allocator: &'a Allocator,
    module: &str,
    source: &'a str,
    kind: SourceKind,
) -> Result<Program<'a>, JsError> {
    let ret = Parser::new(allocator, source, kind.source_type()).parse();

    if ret.panicked || !ret.errors.is_empty() {
        let mut messages: Vec<String> = ret.errors.iter().map(|e| e.to_string()).collect();
        if messages.is_empty() {
            messages.push("unrecoverable syntax error".to_string());
        }
        return Err(JsError::Parse {
            module: module.to_string(),
            messages,
        });
    }

    Ok(ret.program)
}

/// Parse `source` as an ES module
pub fn parse_module<'a>(
    allocator: &'a Allocator,
    module: &str,
    source: &'a str,
) -> Result<Program<'a>, JsError> {
    parse(allocator, module, source, SourceKind::Module)
}

/// Compress, mangle and print `source` without whitespace.
///
/// # Examples
///
/// ```
/// use size_snapshot::js::{minify, MinifyOptions};
///
/// let out = minify("const answer = 40 + 2;\nconsole.log(answer);", MinifyOptions::default())?;
/// assert!(out.len() < 40);
/// # Ok::<(), size_snapshot::js::JsError>(())
/// ```
pub fn minify(source: &str, options: MinifyOptions) -> Result<String, JsError> {
    let allocator = Allocator::default();
    let mut program = parse(&allocator, "input", source, options.kind)?;

    let minifier = Minifier::new(MinifierOptions {
        mangle: Some(MangleOptions {
            top_level: options.top_level,
            ..MangleOptions::default()
        }),
        compress: Some(CompressOptions::default()),
    });
    let ret = minifier.build(&allocator, &mut program);

    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;

    Ok(code)
}

/// Sum of the source lengths of every top-level `import` declaration.
///
/// Used to tell how much of a tree-shaken chunk is nothing but import
/// statements for external packages.
pub fn import_statements_size(source: &str) -> Result<u64, JsError> {
    let allocator = Allocator::default();
    let program = parse_module(&allocator, "chunk", source)?;

    Ok(program
        .body
        .iter()
        .map(|stmt| match stmt {
            Statement::ImportDeclaration(decl) => u64::from(decl.span.size()),
            _ => 0,
        })
        .sum())
}
