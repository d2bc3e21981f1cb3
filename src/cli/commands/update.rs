//! update command - Normalize and store metadata for a subject

use anyhow::{bail, Context as _, Result};
use serde_json::Value;

use crate::cli::Context;
use crate::core::metadata::{SocialMap, UpdatePayload};
use crate::engine::ResolutionEngine;

/// Store metadata for a subject and print the normalized result.
pub fn update(
    ctx: &Context,
    subject_type: &str,
    id: i64,
    payload: UpdatePayload,
) -> Result<()> {
    let subject = super::subject_arg(subject_type, id)?;

    let engine = ResolutionEngine::new(ctx.open_store()?);
    let saved = engine
        .update(&subject, &payload.into_metadata())
        .with_context(|| format!("Failed to save metadata for {}", subject))?;

    if !ctx.quiet {
        println!("{}", serde_json::to_string_pretty(&saved)?);
    }
    Ok(())
}

/// Parse `KEY=VALUE` arguments into a social-card map.
///
/// Later entries for the same key win. Values are kept as strings.
pub fn parse_entries(entries: &[String]) -> Result<SocialMap> {
    let mut map = SocialMap::new();
    for entry in entries {
        let Some((key, value)) = entry.split_once('=') else {
            bail!("Expected KEY=VALUE, got '{}'", entry);
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("Empty key in '{}'", entry);
        }
        map.insert(key.to_string(), Value::String(value.to_string()));
    }
    Ok(map)
}
