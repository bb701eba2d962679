//! Textual `process.env.NODE_ENV` substitution
//!
//! Libraries guard development-only code behind
//! `if (process.env.NODE_ENV !== "production")`. Replacing the member
//! expression with a string literal before parsing turns those guards into
//! constant comparisons that the shaker can fold away.

use regex::{Captures, Regex};
use std::sync::OnceLock;

static NODE_ENV_RE: OnceLock<Regex> = OnceLock::new();

/// The literal `process.env.NODE_ENV` is replaced with in production mode
pub const PRODUCTION: &str = "production";

/// Replace every read of `process.env.NODE_ENV` with `"production"`.
///
/// Assignments (`process.env.NODE_ENV = ...`) are left untouched so the
/// output stays syntactically valid; comparisons (`==`, `===`) are replaced.
///
/// # Examples
///
/// ```
/// use size_snapshot::js::define::replace_node_env;
///
/// assert_eq!(
///     replace_node_env("if (process.env.NODE_ENV !== 'production') warn();"),
///     "if (\"production\" !== 'production') warn();"
/// );
/// ```
pub fn replace_node_env(source: &str) -> String {
    let re = NODE_ENV_RE.get_or_init(|| {
        Regex::new(r"\bprocess\.env\.NODE_ENV\b(\s*=[^=])?").expect("NODE_ENV regex is valid")
    });

    re.replace_all(source, |caps: &Captures<'_>| {
        if caps.get(1).is_some() {
            caps[0].to_string()
        } else {
            format!("\"{}\"", PRODUCTION)
        }
    })
    .into_owned()
}
