use async_trait::async_trait;

use lexis_core::namespaces::{dcmi, dcterms, openskos, org};
use lexis_core::{Resource, Result};

use super::ResourceValidator;
use crate::outcome::Outcome;
use crate::property::{PropertyChecker, PropertyRule};

const PUBLISHER: PropertyRule = PropertyRule::new(dcterms::PUBLISHER)
    .required()
    .single()
    .references(org::FORMAL_ORGANIZATION);
const ALLOW_OAI: PropertyRule = PropertyRule::new(openskos::ALLOW_OAI).single().boolean();
const OAI_BASE_URI: PropertyRule = PropertyRule::new(openskos::OAI_BASE_URI).single();

/// Checks on `dcmitype:Dataset` resources.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetValidator;

#[async_trait]
impl ResourceValidator for SetValidator {
    fn name(&self) -> &'static str {
        "set"
    }

    async fn validate(&self, checker: &PropertyChecker, resource: &Resource) -> Result<Outcome> {
        if !resource.has_type(dcmi::DATASET) {
            return Ok(Outcome::valid());
        }

        let mut outcome = checker.check_type(resource).await?;
        outcome.merge(checker.check_code(resource).await?);
        outcome.merge(checker.check_title(resource).await?);
        outcome.merge(checker.check_description(resource).await?);
        outcome.merge(checker.check_property(resource, PUBLISHER).await?);
        outcome.merge(checker.check_property(resource, ALLOW_OAI).await?);
        outcome.merge(checker.check_property(resource, OAI_BASE_URI).await?);
        outcome.merge(checker.check_webpage(resource).await?);
        Ok(outcome)
    }
}
