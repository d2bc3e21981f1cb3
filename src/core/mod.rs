//! core
//!
//! Core domain types, schemas and configuration for keystone-seo.
//!
//! # Modules
//!
//! - [`types`] - Strong types: SubjectIdentity, RecordKey, UtcTimestamp
//! - [`metadata`] - Metadata value, record schema and update payload
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at construction time
//! - Schemas are strict and self-describing
//! - Values are immutable; transformations build new ones

pub mod config;
pub mod metadata;
pub mod types;
