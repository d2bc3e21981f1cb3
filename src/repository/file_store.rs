//! repository::file_store
//!
//! File-based metadata repository.
//!
//! # Layout
//!
//! - `<store>/records/<key>.json` - one [`MetadataRecordV1`] per subject,
//!   where `<key>` is the subject's [`RecordKey`]
//! - `<store>/.lock` - store lock held during writes
//!
//! # Semantics
//!
//! - `find` returns `Ok(None)` only when the record file does not exist.
//!   Unreadable or undecodable records, and records whose embedded subject
//!   does not match, are errors.
//! - `save` is an upsert under the store lock: `created_at` survives,
//!   `updated_at` is stamped, and the file is replaced atomically (temp file,
//!   then rename). Concurrent saves serialize on the lock; the last one wins.
//!
//! # Example
//!
//! ```no_run
//! use keystone_seo::core::metadata::MetadataValue;
//! use keystone_seo::core::types::SubjectIdentity;
//! use keystone_seo::repository::{FileMetadataStore, MetadataRepository};
//!
//! let store = FileMetadataStore::open("/var/lib/keystone-seo").unwrap();
//! let page = SubjectIdentity::new("page", 1).unwrap();
//! store.save(&page, &MetadataValue::new("Home", "Welcome")).unwrap();
//! assert!(store.exists(&page));
//! ```

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use super::lock::{StoreLock, DEFAULT_LOCK_TIMEOUT};
use super::traits::{MetadataRepository, RepositoryError};
use crate::core::metadata::{parse_record, MetadataRecordV1, MetadataValue};
use crate::core::types::{RecordKey, SubjectIdentity};

/// Directory under the store root holding record files.
const RECORDS_DIR: &str = "records";

/// Metadata repository backed by JSON files.
#[derive(Debug, Clone)]
pub struct FileMetadataStore {
    root: PathBuf,
    lock_timeout: Duration,
}

impl FileMetadataStore {
    /// Open (creating if needed) a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::WriteError` if the directories cannot be
    /// created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let root = root.into();
        let records = root.join(RECORDS_DIR);
        fs::create_dir_all(&records).map_err(|e| {
            RepositoryError::WriteError(format!("cannot create {}: {}", records.display(), e))
        })?;
        Ok(Self {
            root,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        })
    }

    /// Override how long `save` waits for the store lock.
    pub fn with_lock_timeout(self, lock_timeout: Duration) -> Self {
        Self {
            lock_timeout,
            ..self
        }
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the record file for a subject.
    pub fn record_path(&self, subject: &SubjectIdentity) -> PathBuf {
        self.key_path(&subject.record_key())
    }

    fn key_path(&self, key: &RecordKey) -> PathBuf {
        self.root
            .join(RECORDS_DIR)
            .join(format!("{}.json", key.as_str()))
    }

    /// Check whether a record exists for the subject.
    pub fn exists(&self, subject: &SubjectIdentity) -> bool {
        self.record_path(subject).is_file()
    }

    /// Read the full stored record, including timestamps.
    ///
    /// Returns `Ok(None)` if the subject has no record.
    pub fn read_record(
        &self,
        subject: &SubjectIdentity,
    ) -> Result<Option<MetadataRecordV1>, RepositoryError> {
        let path = self.record_path(subject);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(RepositoryError::ReadError(format!(
                    "cannot read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let corrupt = |message: String| RepositoryError::Corrupt {
            subject: subject.to_string(),
            message,
        };

        let record = parse_record(&json).map_err(|e| corrupt(e.to_string()))?;
        let stored_subject = record.subject().map_err(|e| corrupt(e.to_string()))?;
        if &stored_subject != subject {
            return Err(corrupt(format!("record belongs to {}", stored_subject)));
        }

        debug!(subject = %subject, path = %path.display(), "read metadata record");
        Ok(Some(record))
    }

    /// List every subject with a stored record, sorted by type then id.
    pub fn list(&self) -> Result<Vec<SubjectIdentity>, RepositoryError> {
        let dir = self.root.join(RECORDS_DIR);
        let entries = fs::read_dir(&dir).map_err(|e| {
            RepositoryError::ReadError(format!("cannot list {}: {}", dir.display(), e))
        })?;

        let mut subjects = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| RepositoryError::ReadError(e.to_string()))?
                .path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let json = fs::read_to_string(&path).map_err(|e| {
                RepositoryError::ReadError(format!("cannot read {}: {}", path.display(), e))
            })?;
            let subject = parse_record(&json)
                .and_then(|r| r.subject())
                .map_err(|e| RepositoryError::Corrupt {
                    subject: path.display().to_string(),
                    message: e.to_string(),
                })?;
            subjects.push(subject);
        }

        subjects.sort_by(|a, b| {
            (a.subject_type(), a.id()).cmp(&(b.subject_type(), b.id()))
        });
        Ok(subjects)
    }

    /// Write a record atomically.
    fn write_record(&self, path: &Path, record: &MetadataRecordV1) -> Result<(), RepositoryError> {
        let json = record
            .to_json()
            .map_err(|e| RepositoryError::WriteError(format!("cannot serialize record: {}", e)))?;

        let temp_path = path.with_extension("json.tmp");
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| {
                    RepositoryError::WriteError(format!("cannot create temp file: {}", e))
                })?;

            file.write_all(json.as_bytes())
                .map_err(|e| RepositoryError::WriteError(format!("cannot write record: {}", e)))?;

            file.sync_all()
                .map_err(|e| RepositoryError::WriteError(format!("cannot sync to disk: {}", e)))?;
        }

        fs::rename(&temp_path, path)
            .map_err(|e| RepositoryError::WriteError(format!("cannot rename temp file: {}", e)))
    }
}

impl MetadataRepository for FileMetadataStore {
    fn find(&self, subject: &SubjectIdentity) -> Result<Option<MetadataValue>, RepositoryError> {
        Ok(self
            .read_record(subject)?
            .map(|record| record.to_metadata()))
    }

    fn save(
        &self,
        subject: &SubjectIdentity,
        metadata: &MetadataValue,
    ) -> Result<(), RepositoryError> {
        let _lock = StoreLock::acquire(&self.root, self.lock_timeout)?;

        let record = match self.read_record(subject)? {
            Some(existing) => existing.upsert(metadata),
            None => MetadataRecordV1::new(subject, metadata),
        };

        let path = self.record_path(subject);
        self.write_record(&path, &record)?;
        debug!(subject = %subject, path = %path.display(), "wrote metadata record");
        Ok(())
    }
}
