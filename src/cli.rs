//! Command-line interface definition
//!
//! The parser lives in the library so completion scripts are generated from
//! the same definition the binary parses with.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::cmd::MeasureArgs;

/// JavaScript bundle size tracker
///
/// size-snapshot measures bundled, minified, gzipped and tree-shaken sizes
/// of build outputs and keeps them in a snapshot file so size regressions
/// fail CI.
#[derive(Parser)]
#[command(name = "size-snapshot", author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to run; help is printed when absent
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// size-snapshot subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Measure built files and write or verify the size snapshot
    Measure(MeasureArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert()
    }

    #[test]
    fn test_measure_flags_parse() {
        let cli = Cli::try_parse_from([
            "size-snapshot",
            "measure",
            "dist/index.js",
            "--match-snapshot",
            "-t",
            "10",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Measure(args)) => {
                assert_eq!(args.format, "es");
                assert!(args.match_snapshot);
                assert_eq!(args.threshold, Some(10.0));
            }
            _ => panic!("expected measure"),
        }
    }

    #[test]
    fn test_completions_requires_shell() {
        assert!(Cli::try_parse_from(["size-snapshot", "completions"]).is_err());
        assert!(Cli::try_parse_from(["size-snapshot", "completions", "zsh"]).is_ok());
    }
}
