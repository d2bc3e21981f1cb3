//! config command - Show the effective configuration

use anyhow::Result;

use crate::cli::Context;

/// Print the effective configuration values and where they came from.
pub fn show(ctx: &Context) -> Result<()> {
    println!("# Configuration");

    match ctx.config.loaded_from() {
        Some(path) => println!("# loaded from {}", path.display()),
        None => println!("# no config file found, using defaults"),
    }

    println!(
        "base_url = {}",
        ctx.config.base_url().unwrap_or("(not set)")
    );
    println!("store.path = {}", ctx.store_path()?.display());

    Ok(())
}
