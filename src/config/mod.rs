//! Configuration for size-snapshot
//!
//! This module provides:
//! - The `.size-snapshot.toml` file format and option key validation
//! - Loading the config file through the [`FileSystem`](crate::infra::FileSystem) trait
//! - [`SnapshotOptions`], the resolved options with their defaults

pub mod file;
pub mod loader;
pub mod options;

pub use file::{validate_option_keys, ConfigFile, CONFIG_FILE_NAME, VALID_OPTION_KEYS};
pub use loader::ConfigLoader;
pub use options::SnapshotOptions;
