//! repository::traits
//!
//! The metadata repository port.
//!
//! # Design
//!
//! The `MetadataRepository` trait is the engine's only doorway to storage.
//! It has exactly two operations:
//!
//! - `find` - lookup by subject. `Ok(None)` is the one and only not-found
//!   signal; every `Err` is an infrastructure failure.
//! - `save` - upsert keyed by subject. Creates the record if absent,
//!   overwrites every field if present. Concurrent saves for the same
//!   subject are last-write-wins.
//!
//! # Example
//!
//! ```
//! use keystone_seo::core::metadata::MetadataValue;
//! use keystone_seo::core::types::SubjectIdentity;
//! use keystone_seo::repository::{MemoryRepository, MetadataRepository, RepositoryError};
//!
//! fn title_of(
//!     repo: &dyn MetadataRepository,
//!     subject: &SubjectIdentity,
//! ) -> Result<Option<String>, RepositoryError> {
//!     Ok(repo.find(subject)?.map(|m| m.title().to_string()))
//! }
//!
//! let repo = MemoryRepository::new();
//! let page = SubjectIdentity::new("page", 1).unwrap();
//! assert_eq!(title_of(&repo, &page).unwrap(), None);
//!
//! repo.save(&page, &MetadataValue::new("Home", "")).unwrap();
//! assert_eq!(title_of(&repo, &page).unwrap().as_deref(), Some("Home"));
//! ```

use thiserror::Error;

use crate::core::metadata::MetadataValue;
use crate::core::types::SubjectIdentity;

/// Infrastructure failures from a repository.
///
/// There is deliberately no "not found" variant: absence is `Ok(None)`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// Failed to read from storage.
    #[error("failed to read metadata: {0}")]
    ReadError(String),

    /// Failed to write to storage.
    #[error("failed to write metadata: {0}")]
    WriteError(String),

    /// A stored record exists but cannot be decoded.
    #[error("corrupt metadata record for {subject}: {message}")]
    Corrupt {
        /// The subject whose record is corrupt
        subject: String,
        /// What is wrong with it
        message: String,
    },

    /// Timed out waiting for exclusive access to the store.
    #[error("timed out waiting for store lock")]
    LockTimeout,

    /// Storage backend is unreachable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Keyed, durable storage for SEO metadata.
///
/// Implementations must be thread-safe (`Send + Sync`); the engine may be
/// shared across request handlers.
pub trait MetadataRepository: Send + Sync {
    /// Look up the metadata stored for `subject`.
    ///
    /// # Errors
    ///
    /// Any failure to determine whether a record exists, or to decode one
    /// that does, is an error. It must never be reported as `Ok(None)`.
    fn find(&self, subject: &SubjectIdentity) -> Result<Option<MetadataValue>, RepositoryError>;

    /// Create or overwrite the metadata stored for `subject`.
    fn save(&self, subject: &SubjectIdentity, metadata: &MetadataValue)
        -> Result<(), RepositoryError>;
}

impl<T: MetadataRepository + ?Sized> MetadataRepository for &T {
    fn find(&self, subject: &SubjectIdentity) -> Result<Option<MetadataValue>, RepositoryError> {
        (**self).find(subject)
    }

    fn save(
        &self,
        subject: &SubjectIdentity,
        metadata: &MetadataValue,
    ) -> Result<(), RepositoryError> {
        (**self).save(subject, metadata)
    }
}

impl<T: MetadataRepository + ?Sized> MetadataRepository for Box<T> {
    fn find(&self, subject: &SubjectIdentity) -> Result<Option<MetadataValue>, RepositoryError> {
        (**self).find(subject)
    }

    fn save(
        &self,
        subject: &SubjectIdentity,
        metadata: &MetadataValue,
    ) -> Result<(), RepositoryError> {
        (**self).save(subject, metadata)
    }
}
