//! engine::rules
//!
//! Pure business rules shared by resolution and normalization.
//!
//! Every function here is total: no input makes them fail or panic.
//!
//! # Example
//!
//! ```
//! use keystone_seo::engine::rules::{join_canonical, truncate};
//!
//! assert_eq!(truncate("Zürich", 3), "Zür");
//! assert_eq!(
//!     join_canonical("https://example.com/", "/about"),
//!     "https://example.com/about"
//! );
//! ```

use serde_json::Value;

use crate::core::metadata::SocialMap;

/// Maximum title length, in characters.
pub const MAX_TITLE_LENGTH: usize = 60;

/// Maximum description length, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 160;

/// Open Graph object type for synthesized cards.
pub const DEFAULT_OG_TYPE: &str = "website";

/// Twitter card style for synthesized cards.
pub const DEFAULT_TWITTER_CARD: &str = "summary_large_image";

/// Cut `value` to at most `max_chars` characters.
///
/// Counts Unicode scalar values, never bytes, and always cuts on a
/// character boundary. Strings already within the limit come back
/// unchanged.
pub fn truncate(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((byte_index, _)) => value[..byte_index].to_string(),
        None => value.to_string(),
    }
}

/// Join a base URL and a slug with exactly one `/` between them.
///
/// Trailing slashes on the base and leading slashes on the slug are
/// dropped first.
pub fn join_canonical(base_url: &str, slug: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        slug.trim_start_matches('/')
    )
}

/// Canonical URL for a fallback slug, or `None` when the slug is empty.
pub fn canonical_for_slug(base_url: &str, slug: &str) -> Option<String> {
    if slug.is_empty() {
        None
    } else {
        Some(join_canonical(base_url, slug))
    }
}

/// Merge `overrides` over `base`.
///
/// Keys present in `overrides` always win; keys only in `base` survive.
pub fn merge_over(base: SocialMap, overrides: &SocialMap) -> SocialMap {
    let mut merged = base;
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// The `{title, description}` base every Open Graph map is merged over.
pub fn text_base(title: &str, description: &str) -> SocialMap {
    let mut base = SocialMap::new();
    base.insert("title".into(), Value::String(title.to_string()));
    base.insert("description".into(), Value::String(description.to_string()));
    base
}
