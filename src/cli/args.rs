//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--store <path>`: Use this record store directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// kseo - Resolve and edit SEO metadata for content subjects
#[derive(Parser, Debug)]
#[command(name = "kseo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Record store directory (overrides config)
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the metadata a subject resolves to
    #[command(
        name = "resolve",
        long_about = "Show the metadata a subject resolves to.\n\n\
            Stored metadata has blank fields filled from the fallbacks. Without \
            stored metadata, defaults are synthesized from the fallbacks, including \
            a canonical URL built from the base URL and slug.",
        after_help = "\
EXAMPLES:
    # Page without stored metadata
    kseo resolve page 12 --title \"About us\" --slug /about --base-url https://example.com"
    )]
    Resolve {
        /// Subject type (e.g. page, product)
        subject_type: String,

        /// Subject id
        #[arg(allow_negative_numbers = true)]
        id: i64,

        /// Fallback title from the content item
        #[arg(long, default_value = "")]
        title: String,

        /// Fallback plain-text description from the content item
        #[arg(long, default_value = "")]
        description: String,

        /// Fallback URL slug from the content item
        #[arg(long, default_value = "")]
        slug: String,

        /// Site base URL (overrides BASE_URL and config)
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },

    /// Normalize and store metadata for a subject
    #[command(
        name = "update",
        long_about = "Normalize and store metadata for a subject.\n\n\
            Title and description are cut to 60 and 160 characters. Open Graph \
            title and description default to the stored text unless given with --og. \
            Existing metadata for the subject is overwritten.",
        after_help = "\
EXAMPLES:
    kseo update page 12 --title \"About us\" --description \"Who we are\"
    kseo update product 7 --no-index --og image=https://example.com/p7.png"
    )]
    Update {
        /// Subject type (e.g. page, product)
        subject_type: String,

        /// Subject id
        #[arg(allow_negative_numbers = true)]
        id: i64,

        /// SEO title
        #[arg(long)]
        title: Option<String>,

        /// SEO description
        #[arg(long)]
        description: Option<String>,

        /// Ask search engines not to index the subject
        #[arg(long)]
        no_index: bool,

        /// Canonical URL (empty for none)
        #[arg(long, value_name = "URL")]
        canonical: Option<String>,

        /// Open Graph entry
        #[arg(long = "og", value_name = "KEY=VALUE")]
        open_graph: Vec<String>,
    },

    /// Show the stored record for a subject
    Show {
        /// Subject type (e.g. page, product)
        subject_type: String,

        /// Subject id
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// List subjects with stored metadata
    List,

    /// Show the effective configuration
    Config,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion generation.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_update_with_social_entries() {
        let cli = Cli::try_parse_from([
            "kseo", "update", "page", "3", "--title", "T", "--og", "image=a.png", "--no-index",
        ])
        .unwrap();

        match cli.command {
            Command::Update {
                subject_type,
                id,
                title,
                no_index,
                open_graph,
                ..
            } => {
                assert_eq!(subject_type, "page");
                assert_eq!(id, 3);
                assert_eq!(title.as_deref(), Some("T"));
                assert!(no_index);
                assert_eq!(open_graph, vec!["image=a.png".to_string()]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_store_flag() {
        let cli = Cli::try_parse_from(["kseo", "list", "--store", "/tmp/s"]).unwrap();
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/s")));
    }
}
