//! repository
//!
//! Storage port for SEO metadata and its adapters.
//!
//! # Architecture
//!
//! The engine talks to storage only through the [`MetadataRepository`]
//! trait, which has two implementations:
//!
//! - [`FileMetadataStore`]: one JSON record per subject on disk
//! - [`MemoryRepository`]: in-process map with failure injection
//!
//! Any keyed durable store with upsert semantics can implement the trait.

mod file_store;
mod lock;
mod memory;
mod traits;

pub use file_store::FileMetadataStore;
pub use lock::{StoreLock, DEFAULT_LOCK_TIMEOUT};
pub use memory::{FailOn, MemoryOperation, MemoryRepository};
pub use traits::{MetadataRepository, RepositoryError};
