//! keystone-seo - SEO metadata resolution for content subjects
//!
//! Resolves, defaults, normalizes and persists the SEO metadata (title,
//! description, canonical URL, social cards) attached to pages, products
//! and other content items.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Resolution and normalization rules
//! - [`repository`] - Storage port and adapters
//! - [`core`] - Domain types, record schema and configuration
//!
//! # Correctness Invariants
//!
//! 1. Stored titles are at most 60 characters, descriptions at most 160
//! 2. Defaults are synthesized only for a confirmed missing record
//! 3. Caller-supplied social-card keys win over derived ones
//! 4. Normalization is idempotent

pub mod cli;
pub mod core;
pub mod engine;
pub mod repository;
