//! Human-readable size report

use console::style;

use crate::fmt::format_size;
use crate::metrics::{MetricsRecord, BUNDLED, GZIPPED, MINIFIED, TREESHAKED};
use crate::probe::esm::{CODE, IMPORT_STATEMENTS};

/// Describes how each known probe measured its result
fn probe_label(probe: &str) -> String {
    match probe {
        "probeA" => "treeshaked as ES module with production NODE_ENV and minified".to_string(),
        "probeB" => "treeshaked with module runtime in production mode".to_string(),
        other => format!("treeshaked with {other}"),
    }
}

fn size_line(indent: usize, label: &str, bytes: u64) -> String {
    format!(
        "{}{}: {}\n",
        " ".repeat(indent),
        label,
        style(format_size(bytes)).bold()
    )
}

/// Render the report printed after measuring an output.
///
/// # Examples
///
/// ```
/// use size_snapshot::metrics::{Metric, MetricsRecord};
/// use size_snapshot::report::format_report;
///
/// let record = MetricsRecord::from_iter([
///     ("bundled", Metric::Bytes(11_138)),
///     ("minified", Metric::Bytes(5_474)),
///     ("gzipped", Metric::Bytes(2_040)),
/// ]);
/// let report = console::strip_ansi_codes(&format_report("out.js", "cjs", &record)).to_string();
///
/// assert!(report.contains("Computed sizes of \"out.js\" with \"cjs\" format"));
/// assert!(report.contains("  bundler parsing size: 11,138 B"));
/// ```
pub fn format_report(name: &str, format: &str, record: &MetricsRecord) -> String {
    let mut out = format!("\nComputed sizes of \"{name}\" with \"{format}\" format\n");

    let top_level = [
        (BUNDLED, "bundler parsing size"),
        (MINIFIED, "browser parsing size (minified)"),
        (GZIPPED, "download size (minified and gzipped)"),
    ];
    for (key, label) in top_level {
        if let Some(bytes) = record.bytes(key) {
            out.push_str(&size_line(2, label, bytes));
        }
    }

    if let Some(treeshaked) = record.group(TREESHAKED) {
        out.push('\n');
        for (probe, metric) in treeshaked {
            let label = probe_label(probe);
            match metric.as_group() {
                Some(group) => {
                    if let Some(code) = group.bytes(CODE) {
                        out.push_str(&size_line(2, &label, code));
                    }
                    if let Some(imports) = group.bytes(IMPORT_STATEMENTS) {
                        out.push_str(&size_line(4, "import statements size of it", imports));
                    }
                }
                None => {
                    if let Some(bytes) = metric.as_bytes() {
                        out.push_str(&size_line(2, &label, bytes));
                    }
                }
            }
        }
    }

    out
}
