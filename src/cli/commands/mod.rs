//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Calls the engine (or the store, for inspection)
//! 3. Formats and displays output

mod completion;
mod config_cmd;
mod resolve;
mod show;
mod update;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use config_cmd::show as config_show;
pub use resolve::resolve;
pub use show::{list, show};
pub use update::{parse_entries, update};

use crate::cli::args::Command;
use crate::cli::Context;
use crate::core::metadata::UpdatePayload;
use crate::core::types::SubjectIdentity;
use crate::engine::{EngineError, Fallback};
use anyhow::{Context as _, Result};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Resolve {
            subject_type,
            id,
            title,
            description,
            slug,
            base_url,
        } => resolve::resolve(
            ctx,
            &subject_type,
            id,
            Fallback::new(title, description, slug),
            base_url.as_deref(),
        ),
        Command::Update {
            subject_type,
            id,
            title,
            description,
            no_index,
            canonical,
            open_graph,
        } => {
            let payload = UpdatePayload {
                title,
                description,
                no_index,
                canonical,
                open_graph: parse_entries(&open_graph)?,
                ..Default::default()
            };
            update::update(ctx, &subject_type, id, payload)
        }
        Command::Show { subject_type, id } => show::show(ctx, &subject_type, id),
        Command::List => show::list(ctx),
        Command::Config => config_cmd::show(ctx),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Build the subject a command operates on.
///
/// Failures carry [`EngineError::InvalidSubject`] in their source chain.
pub(crate) fn subject_arg(subject_type: &str, id: i64) -> Result<SubjectIdentity> {
    SubjectIdentity::new(subject_type, id)
        .map_err(EngineError::from)
        .context("Invalid subject")
}
