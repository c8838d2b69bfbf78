//! # lexis-db
//!
//! Storage layer for lexis.
//!
//! The production triple store lives behind the `lexis_core` lookup traits;
//! this crate ships the in-memory repository used by tests, imports that
//! stage data before committing, and local tooling.

pub mod memory;

pub use memory::MemoryResourceRepository;

// Re-export core types for convenience
pub use lexis_core::{Error, Resource, ResourceLookup, ResourceRepository, Result};
