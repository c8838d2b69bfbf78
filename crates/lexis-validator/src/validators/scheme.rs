use async_trait::async_trait;

use lexis_core::namespaces::skos;
use lexis_core::{Resource, Result};

use super::ResourceValidator;
use crate::outcome::Outcome;
use crate::property::PropertyChecker;

/// Checks on concept schemes and SKOS collections.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemeValidator;

#[async_trait]
impl ResourceValidator for SchemeValidator {
    fn name(&self) -> &'static str {
        "scheme"
    }

    async fn validate(&self, checker: &PropertyChecker, resource: &Resource) -> Result<Outcome> {
        if !resource.has_type(skos::CONCEPT_SCHEME) && !resource.has_type(skos::COLLECTION) {
            return Ok(Outcome::valid());
        }

        let mut outcome = checker.check_type(resource).await?;
        outcome.merge(checker.check_uuid(resource).await?);
        outcome.merge(checker.check_title(resource).await?);
        outcome.merge(checker.check_description(resource).await?);
        outcome.merge(checker.check_in_set(resource).await?);
        outcome.merge(checker.check_creator(resource).await?);
        Ok(outcome)
    }
}
