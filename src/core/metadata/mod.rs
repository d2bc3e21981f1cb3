//! core::metadata
//!
//! SEO metadata values, the persisted record schema and raw editor input.
//!
//! # Modules
//!
//! - [`value`] - The immutable [`MetadataValue`] and [`SocialMap`]
//! - [`schema`] - Stored record schema (v1)
//! - [`payload`] - Raw update input from an editor
//!
//! # Example
//!
//! ```
//! use keystone_seo::core::metadata::{MetadataValue, UpdatePayload};
//!
//! let raw = UpdatePayload {
//!     title: Some("Shop".into()),
//!     ..Default::default()
//! }
//! .into_metadata();
//!
//! assert_eq!(raw, MetadataValue::new("Shop", ""));
//! ```

pub mod payload;
pub mod schema;
pub mod value;

// Re-export commonly used types
pub use payload::UpdatePayload;
pub use schema::{parse_record, MetadataError, MetadataRecordV1, RECORD_KIND, SCHEMA_VERSION};
pub use value::{MetadataValue, SocialMap};
