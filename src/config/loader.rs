//! Configuration file loading

use super::file::{validate_option_keys, ConfigFile, CONFIG_FILE_NAME};
use crate::error::SizeSnapshotError;
use crate::infra::{FileSystem, RealFileSystem};
use log::debug;
use std::path::Path;

/// Handles loading `.size-snapshot.toml`
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from .size-snapshot.toml in the given directory
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use size_snapshot::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("threshold: {:?}", config.threshold);
    /// # Ok::<(), size_snapshot::error::SizeSnapshotError>(())
    /// ```
    pub fn load(project_root: &Path) -> Result<ConfigFile, SizeSnapshotError> {
        Self::load_with_fs(project_root, &RealFileSystem)
    }

    /// Load config with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(
        project_root: &Path,
        fs: &FS,
    ) -> Result<ConfigFile, SizeSnapshotError> {
        let config_path = project_root.join(CONFIG_FILE_NAME);
        match Self::load_file_with_fs(&config_path, fs) {
            Err(SizeSnapshotError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                debug!("no {} found, using defaults", config_path.display());
                Ok(ConfigFile::default())
            }
            other => other,
        }
    }

    /// Load an explicitly named config file; a missing file is an error
    pub fn load_file(path: &Path) -> Result<ConfigFile, SizeSnapshotError> {
        Self::load_file_with_fs(path, &RealFileSystem)
    }

    /// Load an explicitly named config file through `fs`
    pub fn load_file_with_fs<FS: FileSystem>(
        path: &Path,
        fs: &FS,
    ) -> Result<ConfigFile, SizeSnapshotError> {
        let contents = fs
            .read_to_string(path)
            .map_err(|source| SizeSnapshotError::Io {
                context: format!("reading {}", path.display()),
                source,
            })?;
        Self::parse(path, &contents)
    }

    /// Parse config text, rejecting unknown keys before deserializing
    pub fn parse(path: &Path, contents: &str) -> Result<ConfigFile, SizeSnapshotError> {
        let parse_error = |message: String| SizeSnapshotError::ConfigParse {
            path: path.to_path_buf(),
            message,
        };

        let document: toml_edit::DocumentMut = contents
            .parse()
            .map_err(|e: toml_edit::TomlError| parse_error(e.to_string()))?;
        validate_option_keys(document.iter().map(|(key, _)| key))?;

        toml_edit::de::from_str(contents).map_err(|e| parse_error(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MemoryFileSystem;
    use std::io;
    use std::path::PathBuf;

    struct DeniedFileSystem;

    impl FileSystem for DeniedFileSystem {
        fn read_to_string(&self, _path: &Path) -> io::Result<String> {
            Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ))
        }

        fn write(&self, _path: &Path, _contents: impl AsRef<[u8]>) -> io::Result<()> {
            Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ))
        }
    }

    #[test]
    fn test_loader_loads_from_valid_toml() {
        // Use real filesystem with tempdir for this test
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "matchSnapshot = true\nthreshold = 2.5\n",
        )
        .unwrap();

        let config = ConfigLoader::load(temp.path()).unwrap();
        assert_eq!(config.match_snapshot, Some(true));
        assert_eq!(config.threshold, Some(2.5));
        assert_eq!(config.snapshot_path, None);
    }

    #[test]
    fn test_loader_with_missing_file_uses_defaults() {
        let fs = MemoryFileSystem::new();
        let config = ConfigLoader::load_with_fs(Path::new("/test"), &fs).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let fs = MemoryFileSystem::new();
        let err = ConfigLoader::load_file_with_fs(Path::new("/test/custom.toml"), &fs).unwrap_err();
        assert!(matches!(err, SizeSnapshotError::Io { .. }));
    }

    #[test]
    fn test_loader_with_invalid_toml_returns_error() {
        let fs = MemoryFileSystem::with_file("/test/.size-snapshot.toml", "invalid { toml syntax");
        let err = ConfigLoader::load_with_fs(Path::new("/test"), &fs).unwrap_err();
        match err {
            SizeSnapshotError::ConfigParse { path, .. } => {
                assert_eq!(path, PathBuf::from("/test/.size-snapshot.toml"))
            }
            other => panic!("expected ConfigParse, got {other}"),
        }
    }

    #[test]
    fn test_loader_rejects_unknown_keys() {
        let fs = MemoryFileSystem::with_file(
            "/test/.size-snapshot.toml",
            "minify = true\nthreshold = 1\nsnapshot = \"x\"\n",
        );
        let err = ConfigLoader::load_with_fs(Path::new("/test"), &fs).unwrap_err();
        assert_eq!(err.to_string(), r#"Options "minify", "snapshot" are invalid"#);
    }

    #[test]
    fn test_loader_rejects_wrong_types() {
        let fs = MemoryFileSystem::with_file("/test/.size-snapshot.toml", "printInfo = \"yes\"\n");
        let err = ConfigLoader::load_with_fs(Path::new("/test"), &fs).unwrap_err();
        assert!(matches!(err, SizeSnapshotError::ConfigParse { .. }));
    }

    #[test]
    fn test_loader_with_permission_error_returns_error() {
        let err = ConfigLoader::load_with_fs(Path::new("/test"), &DeniedFileSystem).unwrap_err();
        assert!(matches!(err, SizeSnapshotError::Io { .. }));
    }

    #[test]
    fn test_loader_handles_empty_file() {
        let fs = MemoryFileSystem::with_file("/test/.size-snapshot.toml", "");
        let config = ConfigLoader::load_with_fs(Path::new("/test"), &fs).unwrap();
        assert_eq!(config, ConfigFile::default());
    }
}
