//! repository::memory
//!
//! In-process repository for tests and embedding.
//!
//! # Design
//!
//! Stores values in a `HashMap` behind `Arc<Mutex<...>>`, so clones share
//! state. Failures can be injected per operation to exercise the engine's
//! error paths, and every call is recorded for verification.
//!
//! # Example
//!
//! ```
//! use keystone_seo::core::types::SubjectIdentity;
//! use keystone_seo::repository::{FailOn, MemoryRepository, MetadataRepository, RepositoryError};
//!
//! let repo = MemoryRepository::new();
//! repo.fail_on(FailOn::Find(RepositoryError::Unavailable("db down".into())));
//!
//! let page = SubjectIdentity::new("page", 1).unwrap();
//! assert!(repo.find(&page).is_err());
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::traits::{MetadataRepository, RepositoryError};
use crate::core::metadata::MetadataValue;
use crate::core::types::SubjectIdentity;

/// In-memory repository.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    records: HashMap<SubjectIdentity, MetadataValue>,
    fail_on: Option<FailOn>,
    operations: Vec<MemoryOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail `find` with the given error.
    Find(RepositoryError),
    /// Fail `save` with the given error.
    Save(RepositoryError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq)]
pub enum MemoryOperation {
    Find {
        subject: SubjectIdentity,
    },
    Save {
        subject: SubjectIdentity,
        metadata: MetadataValue,
    },
}

impl MemoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record directly, bypassing recording and failure injection.
    pub fn with_record(self, subject: SubjectIdentity, metadata: MetadataValue) -> Self {
        self.lock().records.insert(subject, metadata);
        self
    }

    /// Make subsequent calls of the given operation fail.
    pub fn fail_on(&self, fail_on: FailOn) {
        self.lock().fail_on = Some(fail_on);
    }

    /// Clear any injected failure.
    pub fn clear_failure(&self) {
        self.lock().fail_on = None;
    }

    /// Get the stored value for a subject without recording a call.
    pub fn get(&self, subject: &SubjectIdentity) -> Option<MetadataValue> {
        self.lock().records.get(subject).cloned()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Operations recorded so far.
    pub fn operations(&self) -> Vec<MemoryOperation> {
        self.lock().operations.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        // A poisoned lock only means a test thread panicked mid-call; the map
        // itself is still consistent.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl MetadataRepository for MemoryRepository {
    fn find(&self, subject: &SubjectIdentity) -> Result<Option<MetadataValue>, RepositoryError> {
        let mut inner = self.lock();
        inner.operations.push(MemoryOperation::Find {
            subject: subject.clone(),
        });

        if let Some(FailOn::Find(err)) = &inner.fail_on {
            return Err(err.clone());
        }

        Ok(inner.records.get(subject).cloned())
    }

    fn save(
        &self,
        subject: &SubjectIdentity,
        metadata: &MetadataValue,
    ) -> Result<(), RepositoryError> {
        let mut inner = self.lock();
        inner.operations.push(MemoryOperation::Save {
            subject: subject.clone(),
            metadata: metadata.clone(),
        });

        if let Some(FailOn::Save(err)) = &inner.fail_on {
            return Err(err.clone());
        }

        inner.records.insert(subject.clone(), metadata.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(id: i64) -> SubjectIdentity {
        SubjectIdentity::new("page", id).unwrap()
    }

    #[test]
    fn find_missing_is_none() {
        let repo = MemoryRepository::new();
        assert_eq!(repo.find(&page(1)).unwrap(), None);
    }

    #[test]
    fn save_is_upsert() {
        let repo = MemoryRepository::new();
        repo.save(&page(1), &MetadataValue::new("A", "")).unwrap();
        repo.save(&page(1), &MetadataValue::new("B", "")).unwrap();

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.find(&page(1)).unwrap().unwrap().title(), "B");
    }

    #[test]
    fn subjects_keyed_by_type_and_id() {
        let repo = MemoryRepository::new()
            .with_record(page(1), MetadataValue::new("Page", ""))
            .with_record(
                SubjectIdentity::new("product", 1).unwrap(),
                MetadataValue::new("Product", ""),
            );

        assert_eq!(repo.len(), 2);
        assert_eq!(repo.get(&page(1)).unwrap().title(), "Page");
    }

    #[test]
    fn injected_failures() {
        let repo = MemoryRepository::new();
        repo.fail_on(FailOn::Save(RepositoryError::WriteError("full".into())));
        assert!(repo.save(&page(1), &MetadataValue::new("A", "")).is_err());
        assert!(repo.find(&page(1)).is_ok());
        assert!(repo.is_empty());

        repo.clear_failure();
        assert!(repo.save(&page(1), &MetadataValue::new("A", "")).is_ok());
    }

    #[test]
    fn operations_recorded() {
        let repo = MemoryRepository::new();
        let _ = repo.find(&page(2));
        repo.save(&page(2), &MetadataValue::new("A", "")).unwrap();

        let ops = repo.operations();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0], MemoryOperation::Find { subject: page(2) });
        assert!(matches!(ops[1], MemoryOperation::Save { .. }));
    }
}
