//! Local filesystem snapshot store.
//!
//! Snapshots are plain files in one directory, named by their key.

use crate::error::{ErrorKind, Result};
use crate::key::validate as validate_key;
use crate::SnapshotStore;
use async_trait::async_trait;
use std::fs::create_dir_all as sync_create_dir;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::instrument;

/// Local filesystem snapshot store.
///
/// # Examples
///
/// ```no_run
/// use pouet_storage::LocalStore;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = LocalStore::new(".")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}
impl LocalStore {
    /// Create a store over `root`, creating the directory if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` exists but is not a directory, or cannot be
    /// created.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if root.exists() {
            if !root.is_dir() {
                exn::bail!(ErrorKind::InvalidRoot(root));
            }
        } else {
            // Only happens once, on construction.
            sync_create_dir(&root).map_err(|e| Self::map_io_error(e, &root))?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_of(&self, key: &str) -> Result<PathBuf> {
        Ok(self.root.join(validate_key(key)?))
    }

    fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }
}

#[async_trait]
impl SnapshotStore for LocalStore {
    fn name(&self) -> &str {
        "local"
    }

    #[instrument(skip(self), fields(root = %self.root.display(), size))]
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_of(key)?;
        match fs::read(&path).await {
            Ok(data) => {
                tracing::Span::current().record("size", data.len());
                Ok(Some(data))
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::map_io_error(e, &path).into()),
        }
    }

    #[instrument(skip(self, data), fields(root = %self.root.display(), size = data.len()))]
    async fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        let path = self.path_of(key)?;
        let root = self.root.clone();
        let target = path.clone();
        let data = data.to_vec();
        // The temp file is unique per call and removed on drop unless persisted.
        let written = tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            let mut temp = tempfile::Builder::new().prefix(".").suffix(".tmp").tempfile_in(&root)?;
            temp.write_all(&data)?;
            temp.persist(&target).map_err(|err| err.error)?;
            Ok(())
        })
        .await;
        match written {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(Self::map_io_error(e, &path).into()),
            Err(e) => Err(ErrorKind::Io(std::io::Error::other(e)).into()),
        }
    }
}
