//! Build-tool entry point
//!
//! [`SizeSnapshot`] is called once per emitted output with the output code
//! and a description of where it was written. It measures the output, then
//! either records the sizes in the snapshot file or verifies them against
//! it.

use std::path::{Component, Path, PathBuf};

use log::info;

use crate::config::SnapshotOptions;
use crate::error::SizeSnapshotError;
use crate::infra::{FileSystem, RealFileSystem};
use crate::metrics::{MetricsCalculator, MetricsRecord};
use crate::report::format_report;
use crate::snapshot::SnapshotStore;

/// Formats treated as ES-module output
pub const ES_FORMATS: [&str; 3] = ["es", "esm", "module"];

/// Where and how an output was written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputDescriptor {
    /// Module format, e.g. `es` or `cjs`
    pub format: String,
    /// Output file
    pub file: Option<PathBuf>,
    /// Output directory, used with `chunk_file_name` when `file` is unset
    pub dir: Option<PathBuf>,
    /// File name of the chunk inside `dir`
    pub chunk_file_name: Option<String>,
}

impl OutputDescriptor {
    /// Output written to a single file
    pub fn file(format: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            format: format.into(),
            file: Some(file.into()),
            ..Default::default()
        }
    }

    /// Whether the output qualifies for tree-shaking measurement
    pub fn is_es_module(&self) -> bool {
        ES_FORMATS.iter().any(|format| *format == self.format)
    }

    /// `file`, or `dir` joined with the chunk file name
    pub fn output_path(&self) -> Option<PathBuf> {
        if let Some(file) = &self.file {
            return Some(file.clone());
        }
        match (&self.dir, &self.chunk_file_name) {
            (Some(dir), Some(name)) => Some(dir.join(name)),
            _ => None,
        }
    }
}

/// Express `path` relative to `cwd` with `/` separators.
///
/// Relative paths are taken as already relative to `cwd`. Absolute paths
/// outside `cwd` get `..` segments.
///
/// # Examples
///
/// ```
/// use size_snapshot::plugin::relative_name;
/// use std::path::Path;
///
/// let cwd = Path::new("/project");
/// assert_eq!(relative_name(cwd, Path::new("/project/dist/out.js")), "dist/out.js");
/// assert_eq!(relative_name(cwd, Path::new("/other/out.js")), "../other/out.js");
/// assert_eq!(relative_name(cwd, Path::new("dist/out.js")), "dist/out.js");
/// ```
pub fn relative_name(cwd: &Path, path: &Path) -> String {
    let segments: Vec<String> = if path.is_absolute() {
        let target: Vec<Component> = path.components().collect();
        let base: Vec<Component> = cwd.components().collect();
        let common = target
            .iter()
            .zip(&base)
            .take_while(|(a, b)| a == b)
            .count();

        std::iter::repeat_n("..".to_string(), base.len() - common)
            .chain(target[common..].iter().filter_map(segment))
            .collect()
    } else {
        path.components().filter_map(|c| segment(&c)).collect()
    };
    segments.join("/")
}

fn segment(component: &Component) -> Option<String> {
    match component {
        Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
        Component::ParentDir => Some("..".to_string()),
        Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
    }
}

/// Measures outputs and maintains the snapshot file
pub struct SizeSnapshot<FS: FileSystem = RealFileSystem> {
    options: SnapshotOptions,
    cwd: PathBuf,
    calculator: MetricsCalculator,
    store: SnapshotStore<FS>,
}

impl SizeSnapshot<RealFileSystem> {
    /// Create from validated options, naming outputs relative to the
    /// process working directory
    pub fn new(options: SnapshotOptions) -> Result<Self, SizeSnapshotError> {
        let cwd = std::env::current_dir().map_err(|source| SizeSnapshotError::Io {
            context: "resolving the working directory".to_string(),
            source,
        })?;
        Self::with_fs(options, cwd, RealFileSystem)
    }
}

impl<FS: FileSystem> SizeSnapshot<FS> {
    /// Create with an explicit working directory and filesystem
    pub fn with_fs(
        options: SnapshotOptions,
        cwd: impl Into<PathBuf>,
        fs: FS,
    ) -> Result<Self, SizeSnapshotError> {
        options.validate()?;
        let store = SnapshotStore::with_fs(options.snapshot_path.clone(), fs);
        Ok(Self {
            options,
            cwd: cwd.into(),
            calculator: MetricsCalculator::new(),
            store,
        })
    }

    /// Replace the metrics calculator
    pub fn with_calculator(mut self, calculator: MetricsCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    /// Resolved options
    pub fn options(&self) -> &SnapshotOptions {
        &self.options
    }

    /// Snapshot name of an output
    pub fn output_name(&self, output: &OutputDescriptor) -> Result<String, SizeSnapshotError> {
        let path = output
            .output_path()
            .ok_or(SizeSnapshotError::MissingOutputFile)?;
        Ok(relative_name(&self.cwd, &path))
    }

    /// Measure `code` and write or verify its snapshot entry.
    ///
    /// The output name is resolved before anything is measured. In write
    /// mode the report is printed when `print_info` is set.
    pub fn transform_bundle(
        &self,
        code: &str,
        output: &OutputDescriptor,
    ) -> Result<MetricsRecord, SizeSnapshotError> {
        let name = self.output_name(output)?;
        let record = self.calculator.compute(code, output.is_es_module())?;

        if self.options.match_snapshot {
            self.store
                .match_snapshot(&name, &record, self.options.threshold)?;
            info!("{} matches {}", name, self.store.path().display());
        } else {
            if self.options.print_info {
                println!("{}", format_report(&name, &output.format, &record));
            }
            self.store.write_snapshot(&name, record.clone())?;
            info!("{} written to {}", name, self.store.path().display());
        }

        Ok(record)
    }
}
