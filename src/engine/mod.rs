//! engine
//!
//! The metadata resolution engine.
//!
//! # Architecture
//!
//! The engine decides what SEO metadata a caller actually gets, and what is
//! written back on update:
//!
//! 1. **Resolve**: look the subject up through the [`MetadataRepository`].
//!    - No record: synthesize *default* metadata purely from fallbacks.
//!    - A record: fill blank fields from fallbacks to get *effective*
//!      metadata.
//! 2. **Normalize**: truncate text fields and merge the Open Graph map over
//!    its derived `{title, description}` base.
//! 3. **Update**: normalize, then save through the repository.
//!
//! # Invariants
//!
//! - Defaults replace a record only when the repository confirms there is
//!   none (`Ok(None)`). Repository failures surface as errors.
//! - Caller-supplied social-card keys are never overwritten by derived ones.
//! - The engine holds no state besides the repository and never mutates a
//!   value in place.
//!
//! # Example
//!
//! ```
//! use keystone_seo::core::types::SubjectIdentity;
//! use keystone_seo::engine::{Fallback, ResolutionEngine};
//! use keystone_seo::repository::MemoryRepository;
//!
//! let engine = ResolutionEngine::new(MemoryRepository::new());
//! let page = SubjectIdentity::new("page", 1).unwrap();
//! let fallback = Fallback::new("About", "Who we are", "/about");
//!
//! let meta = engine
//!     .resolve_for_subject(&page, &fallback, "https://example.com/")
//!     .unwrap();
//! assert_eq!(meta.canonical(), Some("https://example.com/about"));
//! assert_eq!(meta.twitter()["card"], "summary_large_image");
//! ```

pub mod rules;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::metadata::{MetadataValue, SocialMap};
use crate::core::types::{SubjectIdentity, TypeError};
use crate::repository::{MetadataRepository, RepositoryError};

use rules::{
    canonical_for_slug, merge_over, text_base, truncate, DEFAULT_OG_TYPE, DEFAULT_TWITTER_CARD,
    MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH,
};

/// Errors from engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The subject identity is malformed.
    #[error(transparent)]
    InvalidSubject(#[from] TypeError),

    /// The repository failed while looking the subject up.
    #[error("metadata unavailable for {subject}: {source}")]
    MetadataUnavailable {
        subject: SubjectIdentity,
        #[source]
        source: RepositoryError,
    },

    /// The repository failed while saving.
    #[error("failed to persist metadata for {subject}: {source}")]
    PersistFailure {
        subject: SubjectIdentity,
        #[source]
        source: RepositoryError,
    },
}

/// Content-derived values used where explicit metadata is missing.
///
/// The description is expected to be plain text already; markup stripping
/// is the caller's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fallback {
    pub title: String,
    pub description: String,
    /// URL path segment of the content item, possibly empty
    pub slug: String,
}

impl Fallback {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            slug: slug.into(),
        }
    }
}

/// Resolves, defaults and normalizes SEO metadata.
#[derive(Debug, Clone)]
pub struct ResolutionEngine<R> {
    repository: R,
}

impl<R: MetadataRepository> ResolutionEngine<R> {
    /// Create an engine over the given repository.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Metadata to present for `subject`.
    ///
    /// Performs no writes.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MetadataUnavailable`] if the repository lookup
    /// fails. Defaults are never substituted for a failed lookup.
    pub fn resolve_for_subject(
        &self,
        subject: &SubjectIdentity,
        fallback: &Fallback,
        base_url: &str,
    ) -> Result<MetadataValue, EngineError> {
        let stored = self.repository.find(subject).map_err(|source| {
            EngineError::MetadataUnavailable {
                subject: subject.clone(),
                source,
            }
        })?;

        match stored {
            None => {
                debug!(subject = %subject, "no stored metadata, synthesizing defaults");
                Ok(Self::default_metadata(fallback, base_url))
            }
            Some(stored) => {
                debug!(subject = %subject, "applying fallbacks to stored metadata");
                Ok(Self::effective_metadata(stored, fallback))
            }
        }
    }

    /// Normalize `metadata` and persist it for `subject`.
    ///
    /// Returns the normalized value that was handed to the repository.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PersistFailure`] if the save fails. No retry is
    /// attempted.
    pub fn update(
        &self,
        subject: &SubjectIdentity,
        metadata: &MetadataValue,
    ) -> Result<MetadataValue, EngineError> {
        let normalized = Self::normalize_for_persist(metadata);
        self.repository
            .save(subject, &normalized)
            .map_err(|source| EngineError::PersistFailure {
                subject: subject.clone(),
                source,
            })?;

        info!(subject = %subject, no_index = normalized.no_index(), "saved metadata");
        Ok(normalized)
    }

    /// Normalize a raw value for storage.
    ///
    /// Title and description are truncated to 60 and 160 characters. The
    /// Open Graph map is merged over a `{title, description}` base built
    /// from the truncated text, with the map's own keys winning. Everything
    /// else passes through. Applying this twice gives the same result as
    /// applying it once.
    pub fn normalize_for_persist(metadata: &MetadataValue) -> MetadataValue {
        let title = truncate(metadata.title(), MAX_TITLE_LENGTH);
        let description = truncate(metadata.description(), MAX_DESCRIPTION_LENGTH);
        let open_graph = merge_over(text_base(&title, &description), metadata.open_graph());

        metadata
            .clone()
            .with_title(title)
            .with_description(description)
            .with_open_graph(open_graph)
    }

    /// Metadata synthesized when nothing is stored.
    fn default_metadata(fallback: &Fallback, base_url: &str) -> MetadataValue {
        let canonical = canonical_for_slug(base_url, &fallback.slug);
        let title = truncate(&fallback.title, MAX_TITLE_LENGTH);
        let description = truncate(&fallback.description, MAX_DESCRIPTION_LENGTH);

        let mut open_graph = text_base(&title, &description);
        open_graph.insert("type".into(), Value::from(DEFAULT_OG_TYPE));
        open_graph.insert(
            "url".into(),
            canonical.clone().map(Value::String).unwrap_or(Value::Null),
        );

        let mut twitter = SocialMap::new();
        twitter.insert("card".into(), Value::from(DEFAULT_TWITTER_CARD));
        twitter.insert("title".into(), Value::String(title.clone()));
        twitter.insert("description".into(), Value::String(description.clone()));

        MetadataValue::new(title, description)
            .with_canonical(canonical)
            .with_open_graph(open_graph)
            .with_twitter(twitter)
    }

    /// Stored metadata with blank text filled from fallbacks.
    ///
    /// Text is not re-truncated: stored values were normalized on save.
    /// The twitter map passes through as stored.
    fn effective_metadata(stored: MetadataValue, fallback: &Fallback) -> MetadataValue {
        let title = if stored.title().is_empty() {
            fallback.title.clone()
        } else {
            stored.title().to_string()
        };
        let description = if stored.description().is_empty() {
            fallback.description.clone()
        } else {
            stored.description().to_string()
        };
        let open_graph = merge_over(text_base(&title, &description), stored.open_graph());

        stored
            .with_title(title)
            .with_description(description)
            .with_open_graph(open_graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{FailOn, MemoryOperation, MemoryRepository};
    use serde_json::json;

    fn page() -> SubjectIdentity {
        SubjectIdentity::new("page", 1).unwrap()
    }

    fn map(value: serde_json::Value) -> SocialMap {
        value.as_object().cloned().unwrap()
    }

    mod default_path {
        use super::*;

        #[test]
        fn synthesizes_from_fallbacks() {
            let engine = ResolutionEngine::new(MemoryRepository::new());
            let fallback = Fallback::new("Hello World", "x".repeat(200), "/about");

            let meta = engine
                .resolve_for_subject(&page(), &fallback, "https://x.com")
                .unwrap();

            assert_eq!(meta.title(), "Hello World");
            assert_eq!(meta.description().chars().count(), 160);
            assert_eq!(meta.canonical(), Some("https://x.com/about"));
            assert!(!meta.no_index());
            assert_eq!(
                meta.open_graph(),
                &map(json!({
                    "title": "Hello World",
                    "description": "x".repeat(160),
                    "type": "website",
                    "url": "https://x.com/about",
                }))
            );
            assert_eq!(
                meta.twitter(),
                &map(json!({
                    "card": "summary_large_image",
                    "title": "Hello World",
                    "description": "x".repeat(160),
                }))
            );
        }

        #[test]
        fn empty_slug_means_null_canonical() {
            let engine = ResolutionEngine::new(MemoryRepository::new());
            let meta = engine
                .resolve_for_subject(&page(), &Fallback::new("T", "D", ""), "https://x.com")
                .unwrap();

            assert_eq!(meta.canonical(), None);
            assert_eq!(meta.open_graph()["url"], serde_json::Value::Null);
        }

        #[test]
        fn all_empty_fallbacks_are_valid() {
            let engine = ResolutionEngine::new(MemoryRepository::new());
            let meta = engine
                .resolve_for_subject(&page(), &Fallback::default(), "https://x.com")
                .unwrap();

            assert_eq!(meta.title(), "");
            assert_eq!(meta.description(), "");
            assert_eq!(meta.open_graph()["title"], "");
        }

        #[test]
        fn resolve_never_writes() {
            let repo = MemoryRepository::new();
            let engine = ResolutionEngine::new(&repo);
            engine
                .resolve_for_subject(&page(), &Fallback::new("T", "D", "t"), "https://x.com")
                .unwrap();

            assert!(repo.is_empty());
            assert!(repo
                .operations()
                .iter()
                .all(|op| matches!(op, MemoryOperation::Find { .. })));
        }
    }

    mod effective_path {
        use super::*;

        #[test]
        fn blank_fields_filled_from_fallback() {
            let repo = MemoryRepository::new().with_record(
                page(),
                MetadataValue::new("", "Stored description").with_no_index(true),
            );
            let engine = ResolutionEngine::new(repo);

            let meta = engine
                .resolve_for_subject(&page(), &Fallback::new("Fallback", "FD", "slug"), "https://x.com")
                .unwrap();

            assert_eq!(meta.title(), "Fallback");
            assert_eq!(meta.description(), "Stored description");
            assert!(meta.no_index());
            assert_eq!(meta.canonical(), None);
        }

        #[test]
        fn stored_open_graph_keys_win() {
            let repo = MemoryRepository::new().with_record(
                page(),
                MetadataValue::new("", "D").with_open_graph(map(json!({"title": "Custom"}))),
            );
            let engine = ResolutionEngine::new(repo);

            let meta = engine
                .resolve_for_subject(&page(), &Fallback::new("Fallback", "", ""), "https://x.com")
                .unwrap();

            assert_eq!(
                meta.open_graph(),
                &map(json!({"title": "Custom", "description": "D"}))
            );
        }

        #[test]
        fn fallback_not_truncated() {
            let repo = MemoryRepository::new().with_record(page(), MetadataValue::new("", ""));
            let engine = ResolutionEngine::new(repo);
            let long = "y".repeat(100);

            let meta = engine
                .resolve_for_subject(&page(), &Fallback::new(long.clone(), "", ""), "https://x.com")
                .unwrap();
            assert_eq!(meta.title(), long);
        }

        #[test]
        fn twitter_passed_through() {
            let stored_twitter = map(json!({"site": "@shop"}));
            let repo = MemoryRepository::new().with_record(
                page(),
                MetadataValue::new("T", "D")
                    .with_canonical(Some("https://x.com/c".into()))
                    .with_twitter(stored_twitter.clone()),
            );
            let engine = ResolutionEngine::new(repo);

            let meta = engine
                .resolve_for_subject(&page(), &Fallback::new("F", "F", "f"), "https://x.com")
                .unwrap();
            assert_eq!(meta.twitter(), &stored_twitter);
            assert_eq!(meta.canonical(), Some("https://x.com/c"));
        }
    }

    mod failures {
        use super::*;

        #[test]
        fn lookup_failure_is_not_defaulted() {
            let repo = MemoryRepository::new();
            repo.fail_on(FailOn::Find(RepositoryError::Unavailable("down".into())));
            let engine = ResolutionEngine::new(repo);

            let err = engine
                .resolve_for_subject(&page(), &Fallback::new("T", "D", "s"), "https://x.com")
                .unwrap_err();
            assert!(matches!(err, EngineError::MetadataUnavailable { .. }));
            assert!(err.to_string().contains("page:1"));
        }

        #[test]
        fn save_failure_surfaces() {
            let repo = MemoryRepository::new();
            repo.fail_on(FailOn::Save(RepositoryError::WriteError("disk full".into())));
            let engine = ResolutionEngine::new(&repo);

            let err = engine
                .update(&page(), &MetadataValue::new("T", "D"))
                .unwrap_err();
            assert!(matches!(err, EngineError::PersistFailure { .. }));
            // exactly one attempt
            assert_eq!(repo.operations().len(), 1);
        }

        #[test]
        fn invalid_subject_converts() {
            let err: EngineError = SubjectIdentity::new("", 1).unwrap_err().into();
            assert!(matches!(err, EngineError::InvalidSubject(_)));
        }
    }

    mod normalization {
        use super::*;

        type Engine = ResolutionEngine<MemoryRepository>;

        #[test]
        fn truncates_and_builds_open_graph() {
            let raw = MetadataValue::new("t".repeat(80), "d".repeat(300))
                .with_no_index(true)
                .with_canonical(Some("https://x.com/p".into()));

            let normalized = Engine::normalize_for_persist(&raw);
            assert_eq!(normalized.title(), "t".repeat(60));
            assert_eq!(normalized.description(), "d".repeat(160));
            assert!(normalized.no_index());
            assert_eq!(normalized.canonical(), Some("https://x.com/p"));
            assert_eq!(normalized.open_graph()["title"], "t".repeat(60));
            assert_eq!(normalized.open_graph()["description"], "d".repeat(160));
        }

        #[test]
        fn raw_open_graph_keys_win() {
            let raw = MetadataValue::new("T", "D")
                .with_open_graph(map(json!({"description": "Share text", "image": "i.png"})));

            let normalized = Engine::normalize_for_persist(&raw);
            assert_eq!(
                normalized.open_graph(),
                &map(json!({"title": "T", "description": "Share text", "image": "i.png"}))
            );
        }

        #[test]
        fn idempotent() {
            let raw = MetadataValue::new("Ä".repeat(70), "d")
                .with_open_graph(map(json!({"title": "OG"})));
            let once = Engine::normalize_for_persist(&raw);
            let twice = Engine::normalize_for_persist(&once);
            assert_eq!(once, twice);
        }

        #[test]
        fn update_saves_normalized_value() {
            let repo = MemoryRepository::new();
            let engine = ResolutionEngine::new(&repo);

            let saved = engine
                .update(&page(), &MetadataValue::new("x".repeat(61), "D"))
                .unwrap();

            assert_eq!(saved.title().len(), 60);
            assert_eq!(repo.get(&page()), Some(saved));
        }
    }
}
