//! Optional file mirror of the logical stream.
//!
//! A legacy surface: the ring stays canonical, the file just reflects it.
//! The mirror is rewritten after each append (under the store's lock) and
//! removed on clean shutdown.

use ringlog::RingLog;
use std::io;
use std::path::{Path, PathBuf};

/// Mirrors the log's full logical stream to a regular file.
#[derive(Debug)]
pub struct MirrorFile {
    path: PathBuf,
}

impl MirrorFile {
    /// Creates a mirror writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The mirror's target path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrites the file with the log's current logical stream.
    ///
    /// Callers must hold the store's lock so the mirror never lags behind
    /// an echo.
    pub async fn sync(&self, log: &RingLog) -> io::Result<()> {
        let mut contents = Vec::with_capacity(log.logical_size() as usize);
        for record in log.records() {
            contents.extend_from_slice(record.as_bytes());
        }
        tokio::fs::write(&self.path, contents).await
    }

    /// Removes the mirror file. Missing files are fine: a server that
    /// never appended has nothing to remove.
    pub async fn remove(&self) -> io::Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
