//! Completions command implementation
//!
//! Handles the `bundle-compare completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::Write;

use crate::cli::Cli;

/// Binary name completions are generated for
const BIN_NAME: &str = "bundle-compare";

/// Write the completion script for `shell` to `out`
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, out);
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
/// bundle-compare completions bash > /etc/bash_completion.d/bundle-compare
///
/// # Zsh
/// bundle-compare completions zsh > ~/.zfunc/_bundle-compare
///
/// # Fish
/// bundle-compare completions fish > ~/.config/fish/completions/bundle-compare.fish
/// ```
pub fn cmd_completions(shell: Shell) {
    write_completions(shell, &mut std::io::stdout());
}
