//! Measure command implementation
//!
//! Handles the `size-snapshot measure` command which measures built
//! JavaScript files and writes or verifies their size snapshot.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use log::debug;
use std::path::{Path, PathBuf};

use crate::config::{ConfigFile, ConfigLoader, SnapshotOptions};
use crate::fmt::{format_size, CHART, CHECKMARK};
use crate::metrics::GZIPPED;
use crate::plugin::{OutputDescriptor, SizeSnapshot};

/// Arguments of the measure command; `None` leaves the config value in place
#[derive(Debug, Clone, Default, Args)]
pub struct MeasureArgs {
    /// Built JavaScript files
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Module format of the files: es, esm, module, cjs, umd, iife
    #[arg(short, long, default_value = "es")]
    pub format: String,

    /// Snapshot file (default: .size-snapshot.json in the working directory)
    #[arg(long)]
    pub snapshot_path: Option<PathBuf>,

    /// Verify sizes against the snapshot instead of writing it
    #[arg(long)]
    pub match_snapshot: bool,

    /// Allowed absolute difference per size in bytes
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Do not print the size report
    #[arg(long)]
    pub no_print_info: bool,

    /// Config file (default: .size-snapshot.toml in the working directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Resolve options from defaults, the config file and the CLI flags, in
/// increasing priority
pub fn resolve_options(args: &MeasureArgs, cwd: &Path) -> Result<SnapshotOptions> {
    let (config, base): (ConfigFile, PathBuf) = match &args.config {
        Some(path) => {
            let config = ConfigLoader::load_file(path)?;
            let base = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| cwd.to_path_buf());
            (config, base)
        }
        None => (ConfigLoader::load(cwd)?, cwd.to_path_buf()),
    };
    debug!("loaded config: {:?}", config);

    let mut options = SnapshotOptions::new(cwd).merge_file(&config, &base);
    if let Some(path) = &args.snapshot_path {
        options.snapshot_path = cwd.join(path);
    }
    if args.match_snapshot {
        options.match_snapshot = true;
    }
    if let Some(threshold) = args.threshold {
        options.threshold = threshold;
    }
    if args.no_print_info {
        options.print_info = false;
    }
    options.validate()?;
    Ok(options)
}

/// Measure every file and write or verify the snapshot
///
/// # Examples
///
/// ```no_run
/// use size_snapshot::cmd::measure::{cmd_measure, MeasureArgs};
///
/// cmd_measure(&MeasureArgs {
///     files: vec!["dist/index.mjs".into()],
///     format: "es".to_string(),
///     ..Default::default()
/// })?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The config file is invalid
/// - A file cannot be read or is not valid JavaScript
/// - In verify mode, the snapshot is missing or does not match
pub fn cmd_measure(args: &MeasureArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
    let options = resolve_options(args, &cwd)?;
    let verify = options.match_snapshot;
    let snapshot_path = options.snapshot_path.clone();
    let plugin = SizeSnapshot::new(options)?;

    for file in &args.files {
        let code = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let output = OutputDescriptor::file(&args.format, cwd.join(file));
        let record = plugin.transform_bundle(&code, &output)?;

        if verify {
            println!(
                "{} {} matches snapshot ({} gzipped)",
                CHECKMARK,
                style(plugin.output_name(&output)?).bold(),
                format_size(record.bytes(GZIPPED).unwrap_or_default())
            );
        }
    }

    if !verify {
        println!(
            "{} {} {} written to {}",
            CHART,
            args.files.len(),
            if args.files.len() == 1 { "entry" } else { "entries" },
            style(snapshot_path.display()).bold()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE_NAME;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_options_defaults() {
        let temp = TempDir::new().unwrap();
        let options = resolve_options(&MeasureArgs::default(), temp.path()).unwrap();
        assert_eq!(options, SnapshotOptions::new(temp.path()));
    }

    #[test]
    fn test_cli_flags_override_config_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "threshold = 5\nprintInfo = true\nsnapshotPath = \"from-config.json\"\n",
        )
        .unwrap();

        let args = MeasureArgs {
            threshold: Some(1.0),
            no_print_info: true,
            ..Default::default()
        };
        let options = resolve_options(&args, temp.path()).unwrap();

        assert_eq!(options.threshold, 1.0);
        assert!(!options.print_info);
        assert_eq!(options.snapshot_path, temp.path().join("from-config.json"));
    }

    #[test]
    fn test_explicit_config_resolves_relative_to_its_dir() {
        let temp = TempDir::new().unwrap();
        let conf_dir = temp.path().join("conf");
        std::fs::create_dir(&conf_dir).unwrap();
        let conf = conf_dir.join("sizes.toml");
        std::fs::write(&conf, "snapshotPath = \"snap.json\"\n").unwrap();

        let args = MeasureArgs {
            config: Some(conf),
            ..Default::default()
        };
        let options = resolve_options(&args, temp.path()).unwrap();
        assert_eq!(options.snapshot_path, conf_dir.join("snap.json"));
    }

    #[test]
    fn test_negative_threshold_flag_is_rejected() {
        let temp = TempDir::new().unwrap();
        let args = MeasureArgs {
            threshold: Some(-1.0),
            ..Default::default()
        };
        assert!(resolve_options(&args, temp.path()).is_err());
    }
}
