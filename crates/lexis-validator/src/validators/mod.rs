//! Resource-type validators.
//!
//! Each validator inspects resources of the types it knows and passes
//! everything else, so one list can run over a mixed batch.

use async_trait::async_trait;

use lexis_core::{Resource, Result};

use crate::outcome::Outcome;
use crate::property::PropertyChecker;

mod concept;
mod scheme;
mod set;
mod tenant;

pub use concept::{
    ConceptValidator, DuplicateRelation, InScheme, RelatedToSelf, SinglePrefLabel,
    UniqueNotation, UniqueNotationInTenant,
};
pub use scheme::SchemeValidator;
pub use set::SetValidator;
pub use tenant::TenantValidator;

/// One independent rule set over a resource.
#[async_trait]
pub trait ResourceValidator: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Every violation found, in check order.
    async fn validate(&self, checker: &PropertyChecker, resource: &Resource) -> Result<Outcome>;
}
