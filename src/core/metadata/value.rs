//! core::metadata::value
//!
//! The SEO metadata value attached to a subject.
//!
//! # Immutability
//!
//! [`MetadataValue`] has no setters. Every transformation (defaulting,
//! merging, normalization) builds a fresh value through the consuming
//! `with_*` methods, so a value handed out by the engine can never be
//! changed behind the caller's back.
//!
//! # Example
//!
//! ```
//! use keystone_seo::core::metadata::{MetadataValue, SocialMap};
//! use serde_json::json;
//!
//! let mut og = SocialMap::new();
//! og.insert("image".into(), json!("https://example.com/cover.png"));
//!
//! let meta = MetadataValue::new("About us", "Who we are")
//!     .with_canonical(Some("https://example.com/about".into()))
//!     .with_open_graph(og);
//!
//! assert_eq!(meta.title(), "About us");
//! assert!(!meta.no_index());
//! assert_eq!(meta.open_graph()["image"], "https://example.com/cover.png");
//! assert!(meta.twitter().is_empty());
//! ```

use serde::{Deserialize, Serialize};

/// Open-ended string-keyed map used for social-card data.
///
/// Keys are free-form so new card fields need no contract change.
pub type SocialMap = serde_json::Map<String, serde_json::Value>;

/// SEO metadata for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataValue {
    title: String,
    description: String,
    #[serde(default)]
    no_index: bool,
    #[serde(default)]
    canonical: Option<String>,
    #[serde(default)]
    open_graph: SocialMap,
    #[serde(default)]
    twitter: SocialMap,
}

impl MetadataValue {
    /// Create a value with the given title and description.
    ///
    /// The remaining fields start out as: indexable, no canonical URL and
    /// empty social-card maps.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            no_index: false,
            canonical: None,
            open_graph: SocialMap::new(),
            twitter: SocialMap::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether search engines are asked not to index the subject.
    pub fn no_index(&self) -> bool {
        self.no_index
    }

    pub fn canonical(&self) -> Option<&str> {
        self.canonical.as_deref()
    }

    /// Open Graph card data.
    pub fn open_graph(&self) -> &SocialMap {
        &self.open_graph
    }

    /// Twitter card data.
    pub fn twitter(&self) -> &SocialMap {
        &self.twitter
    }

    pub fn with_title(self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self
        }
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self
        }
    }

    pub fn with_no_index(self, no_index: bool) -> Self {
        Self { no_index, ..self }
    }

    pub fn with_canonical(self, canonical: Option<String>) -> Self {
        Self { canonical, ..self }
    }

    pub fn with_open_graph(self, open_graph: SocialMap) -> Self {
        Self { open_graph, ..self }
    }

    pub fn with_twitter(self, twitter: SocialMap) -> Self {
        Self { twitter, ..self }
    }
}
