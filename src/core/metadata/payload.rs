//! core::metadata::payload
//!
//! Raw metadata input as submitted by an editor.
//!
//! Form-style input is lenient: missing text fields are empty, the
//! no-index flag is a presence flag, and an empty canonical URL means
//! "no canonical". [`UpdatePayload::into_metadata`] turns that input into
//! a raw [`MetadataValue`], ready for normalization.

use serde::Deserialize;

use super::value::{MetadataValue, SocialMap};

/// Editor-supplied metadata before normalization.
///
/// # Example
///
/// ```
/// use keystone_seo::core::metadata::UpdatePayload;
///
/// let payload: UpdatePayload =
///     serde_json::from_str(r#"{"title": "Pricing", "canonical": ""}"#).unwrap();
/// let meta = payload.into_metadata();
///
/// assert_eq!(meta.title(), "Pricing");
/// assert_eq!(meta.description(), "");
/// assert_eq!(meta.canonical(), None);
/// assert!(!meta.no_index());
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct UpdatePayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub no_index: bool,
    pub canonical: Option<String>,
    pub open_graph: SocialMap,
    pub twitter: SocialMap,
}

impl UpdatePayload {
    /// Build the raw metadata value described by this payload.
    pub fn into_metadata(self) -> MetadataValue {
        let canonical = self.canonical.filter(|c| !c.is_empty());

        MetadataValue::new(
            self.title.unwrap_or_default(),
            self.description.unwrap_or_default(),
        )
        .with_no_index(self.no_index)
        .with_canonical(canonical)
        .with_open_graph(self.open_graph)
        .with_twitter(self.twitter)
    }
}
