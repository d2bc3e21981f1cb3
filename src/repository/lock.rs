//! repository::lock
//!
//! Exclusive store lock for record writes.
//!
//! # Storage
//!
//! - `<store>/.lock` - Lock file with OS-level exclusive lock
//!
//! # Invariants
//!
//! - Held for the whole read-modify-write of an upsert
//! - Acquisition blocks, polling until a timeout expires
//! - Released on drop (RAII pattern)

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use fs2::FileExt;

use super::traits::RepositoryError;

/// Default timeout for lock acquisition (10 seconds).
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(10);

/// Polling interval when waiting for the lock.
const LOCK_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Name of the lock file inside the store directory.
const LOCK_FILE: &str = ".lock";

/// An exclusive lock on a record store.
#[derive(Debug)]
pub struct StoreLock {
    path: PathBuf,
    file: Option<File>,
}

impl StoreLock {
    /// Acquire the lock for the store rooted at `store_dir`.
    ///
    /// # Errors
    ///
    /// - [`RepositoryError::LockTimeout`] if the timeout expires first
    /// - [`RepositoryError::WriteError`] if the lock file cannot be opened
    pub fn acquire(store_dir: &Path, timeout: Duration) -> Result<Self, RepositoryError> {
        let path = store_dir.join(LOCK_FILE);
        let deadline = Instant::now() + timeout;

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| {
                RepositoryError::WriteError(format!("cannot open {}: {}", path.display(), e))
            })?;

        loop {
            match file.try_lock_exclusive() {
                Ok(()) => {
                    return Ok(Self {
                        path,
                        file: Some(file),
                    })
                }
                Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
                    if Instant::now() >= deadline {
                        return Err(RepositoryError::LockTimeout);
                    }
                    thread::sleep(LOCK_POLL_INTERVAL);
                }
                Err(e) => {
                    return Err(RepositoryError::WriteError(format!("lock failed: {}", e)));
                }
            }
        }
    }

    /// Check if the lock is currently held.
    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            let _ = file.unlock();
        }
    }
}
