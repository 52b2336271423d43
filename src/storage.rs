//! File storage behind the `/files/<name>` routes.
//!
//! The router only talks to the [`Storage`] trait. [`DiskStorage`] is the
//! production implementation, rooted at the configured directory.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Named blobs that the file routes read and write.
pub trait Storage: Clone + Send + Sync + 'static {
    /// Whether `name` exists as a readable file.
    fn exists(&self, name: &str) -> impl Future<Output = bool> + Send;

    /// Reads the full contents of `name`.
    fn read(&self, name: &str) -> impl Future<Output = io::Result<Vec<u8>>> + Send;

    /// Creates or truncates `name` and writes `contents` to it.
    fn write(&self, name: &str, contents: &[u8]) -> impl Future<Output = io::Result<()>> + Send;
}

/// Files under a root directory on the local filesystem.
///
/// Cloning is cheap; all clones share the same root.
#[derive(Debug, Clone)]
pub struct DiskStorage {
    root: Arc<PathBuf>,
}

/// Permission bits for files created by POST: rw-r--r--.
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

impl DiskStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl Storage for DiskStorage {
    fn exists(&self, name: &str) -> impl Future<Output = bool> + Send {
        let path = self.resolve(name);
        async move {
            tokio::fs::metadata(&path)
                .await
                .map(|meta| meta.is_file())
                .unwrap_or(false)
        }
    }

    fn read(&self, name: &str) -> impl Future<Output = io::Result<Vec<u8>>> + Send {
        let path = self.resolve(name);
        async move { tokio::fs::read(&path).await }
    }

    fn write(&self, name: &str, contents: &[u8]) -> impl Future<Output = io::Result<()>> + Send {
        let path = self.resolve(name);
        let contents = contents.to_vec();
        async move {
            use tokio::io::AsyncWriteExt;

            let mut options = tokio::fs::OpenOptions::new();
            options.write(true).create(true).truncate(true);
            #[cfg(unix)]
            options.mode(FILE_MODE);

            let mut file = options.open(&path).await?;
            file.write_all(&contents).await?;
            file.flush().await?;
            Ok(())
        }
    }
}
