//! Test fixture helpers
//!
//! Loads the JavaScript fixtures under `tests/fixtures/` and sets up
//! temporary project directories holding built files.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Re-export anyhow for convenience
pub use anyhow;

/// Absolute path of a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Contents of a fixture file
pub fn read_fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"))
}

/// A library re-exporting one external package and declaring only
/// side-effect-free code
pub const EXTERNALS_SOURCE: &str = r#"import React, { Component } from "react";

export class Widget extends Component {
  render() {
    return React.createElement("div", null, this.props.label);
  }
}

export const make = (label) => React.createElement(Widget, { label });
"#;

/// An external import whose binding is used by a retained side effect
pub const EFFECTFUL_IMPORT_SOURCE: &str = r#"import { register } from "registry";

register("widget");
"#;

/// Mutually recursive functions reaching an effect from either entry point
pub const MUTUAL_RECURSION_SOURCE: &str = r#"function a(flag) {
  if (flag) b(false);
  console.log("effect");
}
function b(flag) {
  a(flag);
}
a(true);
b(false);
"#;

/// Pure-annotated calls that both engines must drop
pub const PURE_ANNOTATED_SOURCE: &str = r#"function createContext(value) {
  return { value: value };
}

export const Theme = /*#__PURE__*/ createContext("light");
export const Locale = /*#__PURE__*/ createContext("en");
"#;

/// Development-only code guarded by NODE_ENV
pub const NODE_ENV_SOURCE: &str = r#"if (process.env.NODE_ENV !== "production") {
  console.warn("You are running a development build.");
}

export function noop() {}
"#;

/// Creates a temporary project directory containing the given files
///
/// # Returns
///
/// The TempDir, which must be kept alive for the duration of the test
pub fn create_project(files: &[(&str, &str)]) -> anyhow::Result<TempDir> {
    let temp_dir = TempDir::new()?;
    for (name, contents) in files {
        let path = temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
    }
    Ok(temp_dir)
}

/// Creates a temporary project holding the redux fixture as `dist/redux.js`
pub fn create_redux_project() -> anyhow::Result<TempDir> {
    let redux = read_fixture("redux.js");
    create_project(&[("dist/redux.js", redux.as_str())])
}

/// Read and parse a snapshot file written by a test
pub fn read_snapshot(path: &Path) -> anyhow::Result<serde_json::Value> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
