//! File-based document storage
//!
//! Supports user-level (`<config dir>/<app>/config.toml`) and workspace-level
//! (`<root>/.config/<app>/config.toml`) locations as well as explicit paths.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::codec::Format;
use super::traits::{Storage, StorageError, StorageResult};

/// Storage that reads a configuration file
///
/// The file is read on every fetch; memoization is left to the container.
///
/// # Example
///
/// ```no_run
/// use envcfg_core::storage::FileStorage;
///
/// // ~/.config/myapp/config.toml on Linux
/// let user = FileStorage::user("myapp");
///
/// // Explicit path, format taken from the extension
/// let explicit = FileStorage::new("/etc/myapp/config.yaml");
/// ```
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    format: Format,
    optional: bool,
}

impl FileStorage {
    /// Create a storage for a specific path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = Format::from_path(&path);
        Self {
            path,
            format,
            optional: false,
        }
    }

    /// Create a user-level storage (`<config dir>/<app>/config.toml`)
    pub fn user(app: &str) -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join(app).join("config.toml"))
    }

    /// Create a workspace-level storage (`<root>/.config/<app>/config.toml`)
    pub fn workspace(workspace_root: impl AsRef<Path>, app: &str) -> Self {
        let path = workspace_root.as_ref().join(".config").join(app).join("config.toml");
        Self::new(path)
    }

    /// Override the format guessed from the extension
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Treat a missing file as an empty document instead of an error
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl Storage for FileStorage {
    fn name(&self) -> &str {
        "file"
    }

    fn format(&self) -> Format {
        self.format
    }

    fn fetch_encoded_document(&self) -> StorageResult<Vec<u8>> {
        match fs::read(&self.path) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if self.optional {
                    Ok(Vec::new())
                } else {
                    Err(StorageError::NotFound(self.path.clone()))
                }
            }
            Err(source) => Err(StorageError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
