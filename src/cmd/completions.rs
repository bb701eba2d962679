//! Completions command implementation
//!
//! Handles the `size-snapshot completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::Write;

use crate::cli::Cli;

/// Write the completion script for `shell` to `out`
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "size-snapshot", out);
}

/// Generate shell completion scripts
///
/// Outputs completion script for the specified shell to stdout.
/// Users can redirect this to their shell's completion directory.
///
/// # Examples
///
/// ```bash
/// # Bash
/// size-snapshot completions bash > /etc/bash_completion.d/size-snapshot
///
/// # Zsh
/// size-snapshot completions zsh > ~/.zfunc/_size-snapshot
///
/// # Fish
/// size-snapshot completions fish > ~/.config/fish/completions/size-snapshot.fish
/// ```
pub fn cmd_completions(shell: Shell) {
    write_completions(shell, &mut std::io::stdout());
}
