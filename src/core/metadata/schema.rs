//! core::metadata::schema
//!
//! Persisted SEO metadata record (v1).
//!
//! # Schema Design
//!
//! One record per subject, holding exactly the logical columns of the
//! store: subject type and id, title, description, no-index flag,
//! canonical URL (nullable), Open Graph map (nullable) and the creation
//! and last-update timestamps.
//!
//! Records are:
//! - Self-describing with `kind` and `schema_version`
//! - Strictly parsed (unknown fields rejected)
//!
//! Twitter-card data has no column and is not persisted. A value rebuilt
//! from a record carries an empty twitter map.
//!
//! # Example
//!
//! ```
//! use keystone_seo::core::metadata::schema::{parse_record, MetadataRecordV1, RECORD_KIND};
//! use keystone_seo::core::metadata::MetadataValue;
//! use keystone_seo::core::types::SubjectIdentity;
//!
//! let subject = SubjectIdentity::new("page", 1).unwrap();
//! let record = MetadataRecordV1::new(&subject, &MetadataValue::new("Home", "Welcome"));
//! assert_eq!(record.kind, RECORD_KIND);
//!
//! let json = serde_json::to_string(&record).unwrap();
//! let parsed = parse_record(&json).unwrap();
//! assert_eq!(parsed.to_metadata().title(), "Home");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::value::{MetadataValue, SocialMap};
use crate::core::types::{SubjectIdentity, TypeError, UtcTimestamp};

/// The kind identifier for stored SEO records.
pub const RECORD_KIND: &str = "keystone.seo-metadata";

/// Current schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors from record parsing and validation.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to parse record: {0}")]
    ParseError(String),

    #[error("invalid kind '{found}', expected '{}'", RECORD_KIND)]
    InvalidKind { found: String },

    #[error("unsupported schema version {0}, supported: {SCHEMA_VERSION}")]
    UnsupportedVersion(u32),

    #[error("type validation failed: {0}")]
    TypeError(#[from] TypeError),
}

/// Envelope for version dispatch before full parsing.
#[derive(Debug, Deserialize)]
struct RecordEnvelope {
    kind: String,
    schema_version: u32,
}

/// Parse a record with version dispatch.
///
/// # Errors
///
/// Returns an error if:
/// - The JSON is malformed or has unknown fields
/// - The `kind` field doesn't match [`RECORD_KIND`]
/// - The `schema_version` is not supported
/// - The embedded subject is invalid
///
/// # Example
///
/// ```
/// use keystone_seo::core::metadata::schema::parse_record;
///
/// let json = r#"{
///     "kind": "keystone.seo-metadata",
///     "schema_version": 1,
///     "subject_type": "page",
///     "subject_id": 4,
///     "title": "Contact",
///     "description": "",
///     "no_index": true,
///     "canonical": null,
///     "open_graph": null,
///     "created_at": "2026-01-01T00:00:00Z",
///     "updated_at": "2026-01-01T00:00:00Z"
/// }"#;
///
/// let record = parse_record(json).unwrap();
/// assert!(record.to_metadata().no_index());
/// assert!(record.to_metadata().open_graph().is_empty());
/// ```
pub fn parse_record(json: &str) -> Result<MetadataRecordV1, MetadataError> {
    let envelope: RecordEnvelope =
        serde_json::from_str(json).map_err(|e| MetadataError::ParseError(e.to_string()))?;

    if envelope.kind != RECORD_KIND {
        return Err(MetadataError::InvalidKind {
            found: envelope.kind,
        });
    }

    match envelope.schema_version {
        1 => {
            let record: MetadataRecordV1 =
                serde_json::from_str(json).map_err(|e| MetadataError::ParseError(e.to_string()))?;
            record.validate()?;
            Ok(record)
        }
        v => Err(MetadataError::UnsupportedVersion(v)),
    }
}

/// Stored SEO record (v1).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MetadataRecordV1 {
    /// Kind identifier (always "keystone.seo-metadata")
    pub kind: String,

    /// Schema version (always 1 for this struct)
    pub schema_version: u32,

    pub subject_type: String,
    pub subject_id: i64,

    pub title: String,
    pub description: String,
    pub no_index: bool,
    pub canonical: Option<String>,
    pub open_graph: Option<SocialMap>,

    pub created_at: UtcTimestamp,
    pub updated_at: UtcTimestamp,
}

impl MetadataRecordV1 {
    /// Build a fresh record for `subject`, stamped with the current time.
    pub fn new(subject: &SubjectIdentity, metadata: &MetadataValue) -> Self {
        let now = UtcTimestamp::now();
        Self {
            kind: RECORD_KIND.to_string(),
            schema_version: SCHEMA_VERSION,
            subject_type: subject.subject_type().to_string(),
            subject_id: subject.id() as i64,
            title: metadata.title().to_string(),
            description: metadata.description().to_string(),
            no_index: metadata.no_index(),
            canonical: metadata.canonical().map(str::to_string),
            open_graph: Some(metadata.open_graph().clone()),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Overwrite every data field from `metadata`, keeping `created_at`
    /// and stamping `updated_at`.
    pub fn upsert(self, metadata: &MetadataValue) -> Self {
        Self {
            title: metadata.title().to_string(),
            description: metadata.description().to_string(),
            no_index: metadata.no_index(),
            canonical: metadata.canonical().map(str::to_string),
            open_graph: Some(metadata.open_graph().clone()),
            updated_at: UtcTimestamp::now(),
            ..self
        }
    }

    /// Validate kind, version and the embedded subject.
    pub fn validate(&self) -> Result<(), MetadataError> {
        if self.kind != RECORD_KIND {
            return Err(MetadataError::InvalidKind {
                found: self.kind.clone(),
            });
        }
        if self.schema_version != SCHEMA_VERSION {
            return Err(MetadataError::UnsupportedVersion(self.schema_version));
        }
        self.subject()?;
        Ok(())
    }

    /// The subject this record belongs to.
    pub fn subject(&self) -> Result<SubjectIdentity, MetadataError> {
        Ok(SubjectIdentity::new(
            self.subject_type.clone(),
            self.subject_id,
        )?)
    }

    /// Rebuild the metadata value held by this record.
    pub fn to_metadata(&self) -> MetadataValue {
        MetadataValue::new(self.title.clone(), self.description.clone())
            .with_no_index(self.no_index)
            .with_canonical(self.canonical.clone())
            .with_open_graph(self.open_graph.clone().unwrap_or_default())
    }

    /// Serialize to pretty JSON for storage.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
