//! # lexis-validator
//!
//! Validation pipeline for SKOS thesaurus resources.
//!
//! [`PropertyChecker`] holds the generic property checks and the tenant
//! ownership rules; per-type [`ResourceValidator`]s compose them; the
//! [`Validator`] orchestrator runs a validator list over one resource or a
//! batch and turns any rejection into a single [`lexis_core::Error::InvalidResource`].

pub mod context;
pub mod orchestrator;
pub mod outcome;
mod ownership;
pub mod property;
pub mod validators;

pub use context::{ValidationContext, ValidationMode};
pub use orchestrator::{default_validators, Validator, ValidatorBuilder};
pub use outcome::Outcome;
pub use property::{check_boolean, PropertyChecker, PropertyRule};
pub use validators::*;
