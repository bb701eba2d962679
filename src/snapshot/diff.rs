//! Line diff of stored versus received metrics
//!
//! Both records are rendered as pretty JSON and compared line by line with a
//! longest-common-subsequence table, in the layout jest uses for snapshot
//! failures:
//!
//! ```text
//! - Snapshot
//! + Received
//!
//!   {
//! -   "bundled": 100,
//! +   "bundled": 150,
//!     "gzipped": 40,
//!     "minified": 60
//!   }
//! ```

use console::style;

use crate::metrics::MetricsRecord;

/// One line of a diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine<'a> {
    /// Present on both sides
    Same(&'a str),
    /// Only in the stored snapshot
    Removed(&'a str),
    /// Only in the received record
    Added(&'a str),
}

impl DiffLine<'_> {
    fn render(&self) -> String {
        match self {
            Self::Same(line) => format!("  {line}"),
            Self::Removed(line) => format!("- {line}"),
            Self::Added(line) => format!("+ {line}"),
        }
    }
}

/// Diff two line lists, keeping the shared lines in order
pub fn diff_lines<'a>(old: &[&'a str], new: &[&'a str]) -> Vec<DiffLine<'a>> {
    let (n, m) = (old.len(), new.len());
    // lcs[i][j] = length of the LCS of old[i..] and new[j..]
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if old[i] == new[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut out = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if old[i] == new[j] {
            out.push(DiffLine::Same(old[i]));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            out.push(DiffLine::Removed(old[i]));
            i += 1;
        } else {
            out.push(DiffLine::Added(new[j]));
            j += 1;
        }
    }
    out.extend(old[i..].iter().map(|line| DiffLine::Removed(*line)));
    out.extend(new[j..].iter().map(|line| DiffLine::Added(*line)));
    out
}

/// Render a plain-text diff of `stored` against `received`
pub fn render_diff(stored: &MetricsRecord, received: &MetricsRecord) -> String {
    let stored_json = to_pretty_json(stored);
    let received_json = to_pretty_json(received);
    let old: Vec<&str> = stored_json.lines().collect();
    let new: Vec<&str> = received_json.lines().collect();

    let mut out = String::from("- Snapshot\n+ Received\n\n");
    for line in diff_lines(&old, &new) {
        out.push_str(&line.render());
        out.push('\n');
    }
    out
}

/// Colour a rendered diff for the terminal
pub fn colorize(diff: &str) -> String {
    diff.lines()
        .map(|line| {
            if line.starts_with('-') {
                style(line).green().to_string()
            } else if line.starts_with('+') {
                style(line).red().to_string()
            } else {
                style(line).dim().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn to_pretty_json(record: &MetricsRecord) -> String {
    // MetricsRecord only holds strings and integers
    serde_json::to_string_pretty(record).unwrap_or_else(|_| "{}".to_string())
}
