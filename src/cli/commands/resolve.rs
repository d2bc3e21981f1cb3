//! resolve command - Show the metadata a subject resolves to

use anyhow::{bail, Context as _, Result};

use crate::cli::Context;
use crate::core::config::schema::validate_base_url;
use crate::engine::{Fallback, ResolutionEngine};

/// Resolve metadata for a subject and print it as JSON.
pub fn resolve(
    ctx: &Context,
    subject_type: &str,
    id: i64,
    fallback: Fallback,
    base_url: Option<&str>,
) -> Result<()> {
    let subject = super::subject_arg(subject_type, id)?;

    let base_url = match base_url.or(ctx.config.base_url()) {
        Some(url) => {
            validate_base_url(url)?;
            url.to_string()
        }
        None if fallback.slug.is_empty() => String::new(),
        None => bail!("No base URL configured. Pass --base-url or set BASE_URL."),
    };

    let engine = ResolutionEngine::new(ctx.open_store()?);
    let metadata = engine
        .resolve_for_subject(&subject, &fallback, &base_url)
        .with_context(|| format!("Failed to resolve metadata for {}", subject))?;

    println!("{}", serde_json::to_string_pretty(&metadata)?);
    Ok(())
}
