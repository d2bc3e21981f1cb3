//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`SubjectIdentity`] - Validated (type, id) pair identifying a content item
//! - [`RecordKey`] - Stable storage key derived from a subject
//! - [`UtcTimestamp`] - RFC3339 timestamp
//!
//! # Validation
//!
//! These types enforce validity at construction time. A subject with an
//! empty type or a non-positive id cannot be represented.
//!
//! # Examples
//!
//! ```
//! use keystone_seo::core::types::SubjectIdentity;
//!
//! let page = SubjectIdentity::new("page", 42).unwrap();
//! assert_eq!(page.subject_type(), "page");
//! assert_eq!(page.id(), 42);
//!
//! assert!(SubjectIdentity::new("", 1).is_err());
//! assert!(SubjectIdentity::new("page", 0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid subject: {0}")]
    InvalidSubject(String),
}

/// The content item a piece of SEO metadata belongs to.
///
/// Equality is structural over `(type, id)`. The type is a caller-defined
/// tag such as `"page"` or `"product"`; it is compared verbatim.
///
/// # Example
///
/// ```
/// use keystone_seo::core::types::SubjectIdentity;
///
/// let a = SubjectIdentity::new("product", 7).unwrap();
/// let b = SubjectIdentity::new("product", 7).unwrap();
/// let c = SubjectIdentity::new("page", 7).unwrap();
/// assert_eq!(a, b);
/// assert_ne!(a, c);
/// assert_eq!(a.to_string(), "product:7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSubject", into = "RawSubject")]
pub struct SubjectIdentity {
    subject_type: String,
    id: u64,
}

/// Wire form used for validated deserialization.
#[derive(Serialize, Deserialize)]
struct RawSubject {
    #[serde(rename = "type")]
    subject_type: String,
    id: i64,
}

impl SubjectIdentity {
    /// Create a new validated subject identity.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidSubject` if the type is empty (or only
    /// whitespace) or the id is not a positive integer.
    pub fn new(subject_type: impl Into<String>, id: i64) -> Result<Self, TypeError> {
        let subject_type = subject_type.into();
        if subject_type.trim().is_empty() {
            return Err(TypeError::InvalidSubject(
                "subject type cannot be empty".into(),
            ));
        }
        if id <= 0 {
            return Err(TypeError::InvalidSubject(format!(
                "subject id must be a positive integer, got {id}"
            )));
        }
        Ok(Self {
            subject_type,
            id: id as u64,
        })
    }

    /// The caller-defined type tag.
    pub fn subject_type(&self) -> &str {
        &self.subject_type
    }

    /// The numeric id within the type.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Storage key for this subject.
    pub fn record_key(&self) -> RecordKey {
        RecordKey::for_subject(self)
    }
}

impl TryFrom<RawSubject> for SubjectIdentity {
    type Error = TypeError;

    fn try_from(raw: RawSubject) -> Result<Self, Self::Error> {
        Self::new(raw.subject_type, raw.id)
    }
}

impl From<SubjectIdentity> for RawSubject {
    fn from(subject: SubjectIdentity) -> Self {
        RawSubject {
            subject_type: subject.subject_type,
            id: subject.id as i64,
        }
    }
}

impl std::fmt::Display for SubjectIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.subject_type, self.id)
    }
}

/// A stable, filesystem-safe key for a subject.
///
/// The key is the hex SHA-256 of the subject type and id separated by a NUL
/// byte, so arbitrary type tags never leak path separators into storage.
///
/// # Example
///
/// ```
/// use keystone_seo::core::types::SubjectIdentity;
///
/// let key = SubjectIdentity::new("page", 1).unwrap().record_key();
/// assert_eq!(key.as_str().len(), 64);
///
/// // Same subject, same key
/// let again = SubjectIdentity::new("page", 1).unwrap().record_key();
/// assert_eq!(key, again);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey(String);

impl RecordKey {
    /// Derive the key for a subject.
    pub fn for_subject(subject: &SubjectIdentity) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(subject.subject_type().as_bytes());
        hasher.update([0u8]);
        hasher.update(subject.id().to_string().as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A UTC timestamp in RFC3339 format.
///
/// # Example
///
/// ```
/// use keystone_seo::core::types::UtcTimestamp;
///
/// let now = UtcTimestamp::now();
/// println!("Current time: {}", now);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UtcTimestamp(chrono::DateTime<chrono::Utc>);

impl UtcTimestamp {
    /// Create a timestamp for the current moment.
    pub fn now() -> Self {
        Self(chrono::Utc::now())
    }
}

impl std::fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
