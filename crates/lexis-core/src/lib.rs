//! # lexis-core
//!
//! Core types, traits, and abstractions for the lexis thesaurus validator.
//!
//! This crate provides the RDF resource model, the SKOS/OpenSKOS vocabulary,
//! typed wrappers for concepts, sets and tenants, and the lookup traits
//! that storage backends implement.

pub mod rdf;

pub mod concept;
pub mod config;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod namespaces;
pub mod scheme;
pub mod set;
pub mod tenant;
pub mod traits;

// Re-export commonly used types at crate root
pub use concept::{generate_notation, Concept, ConceptStatus, MetadataParams};
pub use config::{ConfigError, ImportRelaxations, ValidatorConfig};
pub use error::{Error, ResourceReport, Result, ValidationFailure};
pub use namespaces::PropertyCategory;
pub use rdf::{Literal, Resource, Uri, Value};
pub use scheme::ConceptScheme;
pub use set::Set;
pub use tenant::{code_to_uri, Tenant, TenantProfile};
pub use traits::*;
