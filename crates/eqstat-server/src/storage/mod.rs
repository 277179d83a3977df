//! Backing-file storage on the local filesystem.
//!
//! Uploaded CSV bytes live under a single storage root, one file per dataset
//! record, named `<uuid>_<original filename>`. Removal of a file that is
//! already gone succeeds (cleanup is idempotent); every other I/O failure
//! propagates to the caller.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a stored file name.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Write `bytes` under the storage root, creating it if needed.
    pub async fn write(&self, name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.root).await?;
        let path = self.path_for(name);
        fs::write(&path, bytes).await?;
        Ok(path)
    }

    /// Remove a stored file. A file that is already absent is not an error.
    pub async fn remove(&self, name: &str) -> io::Result<()> {
        let path = self.path_for(name);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    pub async fn exists(&self, name: &str) -> bool {
        fs::try_exists(self.path_for(name)).await.unwrap_or(false)
    }
}
