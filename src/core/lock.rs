//! core::lock
//!
//! Exclusive run lock for ingest operations.
//!
//! # Architecture
//!
//! The run lock ensures only one ingest run can write outputs at a time.
//! Two concurrent runs would interleave manifest and output writes, leaving
//! the processed tree in a state no manifest describes.
//!
//! # Storage
//!
//! - `<root>/outputs/.lock` - Lock file with OS-level exclusive lock
//!
//! # Invariants
//!
//! - Lock must be held for the entire ingest run
//! - Lock is automatically released on drop (RAII pattern)
//! - Lock acquisition is non-blocking (fails fast if locked)

use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;

use fs2::FileExt;
use thiserror::Error;

use crate::core::paths::ProjectPaths;

/// Errors from locking operations.
#[derive(Debug, Error)]
pub enum LockError {
    /// Another process already holds the lock.
    #[error("outputs are locked by another lexroot process")]
    AlreadyLocked,

    /// Failed to create lock file or directory.
    #[error("failed to create lock: {0}")]
    CreateFailed(String),

    /// I/O error during lock operations.
    #[error("lock i/o error: {0}")]
    IoError(#[from] std::io::Error),
}

/// An exclusive lock on the project outputs.
///
/// The lock is automatically released when this guard is dropped (RAII
/// pattern). This ensures the lock is always released, even if the ingest
/// run panics.
///
/// # Example
///
/// ```no_run
/// use lexroot::core::lock::RunLock;
/// use lexroot::core::paths::ProjectPaths;
/// use std::path::PathBuf;
///
/// let paths = ProjectPaths::new(PathBuf::from("/project"));
/// let lock = RunLock::acquire(&paths).unwrap();
/// assert!(lock.is_held());
/// // Lock is released when `lock` goes out of scope
/// ```
#[derive(Debug)]
pub struct RunLock {
    /// Path to the lock file.
    path: PathBuf,
    /// The open file handle with the lock held.
    /// When this is Some, we hold the lock.
    file: Option<File>,
}

impl RunLock {
    /// Attempt to acquire the run lock.
    ///
    /// This uses OS-level file locking via `fs2`, which works across
    /// processes. The lock is non-blocking - if another process holds the
    /// lock, this returns [`LockError::AlreadyLocked`] immediately.
    ///
    /// # Errors
    ///
    /// - [`LockError::AlreadyLocked`] if another process holds the lock
    /// - [`LockError::CreateFailed`] if the lock file cannot be created
    pub fn acquire(paths: &ProjectPaths) -> Result<Self, LockError> {
        let path = paths.run_lock();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| LockError::CreateFailed(format!("{}: {}", parent.display(), e)))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| LockError::CreateFailed(format!("{}: {}", path.display(), e)))?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(Self {
                path,
                file: Some(file),
            }),
            Err(_) => Err(LockError::AlreadyLocked),
        }
    }

    /// Whether this guard currently holds the lock.
    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }

    /// Path to the lock file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Release the lock explicitly.
    ///
    /// Usually unnecessary; dropping the guard releases the lock.
    pub fn release(&mut self) {
        if let Some(file) = self.file.take() {
            let _ = fs2::FileExt::unlock(&file);
        }
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn acquire_and_release() {
        let dir = TempDir::new().unwrap();
        let paths = ProjectPaths::new(dir.path().to_path_buf());

        let mut lock = RunLock::acquire(&paths).unwrap();
        assert!(lock.is_held());
        assert!(paths.run_lock().exists());

        lock.release();
        assert!(!lock.is_held());
    }

    #[test]
    fn second_acquire_fails_while_held() {
        let dir = TempDir::new().unwrap();
        let paths = ProjectPaths::new(dir.path().to_path_buf());

        let _lock = RunLock::acquire(&paths).unwrap();
        match RunLock::acquire(&paths) {
            Err(LockError::AlreadyLocked) => {}
            other => panic!("expected AlreadyLocked, got {:?}", other),
        }
    }

    #[test]
    fn reacquire_after_drop() {
        let dir = TempDir::new().unwrap();
        let paths = ProjectPaths::new(dir.path().to_path_buf());

        {
            let _lock = RunLock::acquire(&paths).unwrap();
        }
        assert!(RunLock::acquire(&paths).is_ok());
    }
}
