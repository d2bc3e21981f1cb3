//! show and list commands - Inspect stored records

use anyhow::{Context as _, Result};

use crate::cli::Context;

/// Print the stored record for a subject.
pub fn show(ctx: &Context, subject_type: &str, id: i64) -> Result<()> {
    let subject = super::subject_arg(subject_type, id)?;
    let store = ctx.open_store()?;

    match store
        .read_record(&subject)
        .with_context(|| format!("Failed to read metadata for {}", subject))?
    {
        Some(record) => println!("{}", record.to_json()?),
        None => println!("No metadata stored for {}", subject),
    }
    Ok(())
}

/// Print every subject with stored metadata, one per line.
pub fn list(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let subjects = store.list().context("Failed to list stored metadata")?;

    if subjects.is_empty() && !ctx.quiet {
        println!("No metadata stored");
    }
    for subject in subjects {
        println!("{}", subject);
    }
    Ok(())
}
