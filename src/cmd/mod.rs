//! Command handlers for size-snapshot CLI
//!
//! Each submodule handles a specific CLI command.

pub mod completions;
pub mod measure;

// Re-export command functions for convenient access
pub use completions::cmd_completions;
pub use measure::{cmd_measure, MeasureArgs};
