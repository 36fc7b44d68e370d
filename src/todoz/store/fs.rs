use super::backend::StorageBackend;
use crate::error::{Result, TodozError};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File-per-key storage rooted at a data directory.
///
/// ```text
/// <root>/
/// ├── todoz.items     # JSON array of items
/// ├── todoz.theme     # "light" or "dark"
/// └── config.json     # see config.rs
/// ```
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(TodozError::Store(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.root.join(key))
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(TodozError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read(path).map_err(TodozError::Io)?;
        Ok(Some(content))
    }

    fn write_bytes(&self, key: &str, value: &[u8]) -> Result<()> {
        let target = self.key_path(key)?;
        self.ensure_dir(&self.root)?;

        // Atomic write
        let tmp_path = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp_path, value).map_err(TodozError::Io)?;
        fs::rename(&tmp_path, target).map_err(TodozError::Io)?;
        Ok(())
    }
}
