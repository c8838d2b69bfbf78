use async_trait::async_trait;

use lexis_core::namespaces::{openskos, org, vcard};
use lexis_core::{Resource, Result};

use super::ResourceValidator;
use crate::outcome::Outcome;
use crate::property::{PropertyChecker, PropertyRule};

const RULES: [PropertyRule; 6] = [
    PropertyRule::new(openskos::NAME).required().single(),
    PropertyRule::new(vcard::EMAIL).single(),
    PropertyRule::new(openskos::NOTATION_UNIQUE_PER_TENANT).single().boolean(),
    PropertyRule::new(openskos::NOTATION_AUTO_GENERATED).single().boolean(),
    PropertyRule::new(openskos::ENABLE_SKOS_XL).single().boolean(),
    PropertyRule::new(openskos::ENABLE_STATUSES_SYSTEM).single().boolean(),
];

/// Checks on `org:FormalOrganization` resources.
#[derive(Debug, Clone, Copy, Default)]
pub struct TenantValidator;

#[async_trait]
impl ResourceValidator for TenantValidator {
    fn name(&self) -> &'static str {
        "tenant"
    }

    async fn validate(&self, checker: &PropertyChecker, resource: &Resource) -> Result<Outcome> {
        if !resource.has_type(org::FORMAL_ORGANIZATION) {
            return Ok(Outcome::valid());
        }

        let mut outcome = checker.check_type(resource).await?;
        outcome.merge(checker.check_code(resource).await?);
        for rule in RULES {
            outcome.merge(checker.check_property(resource, rule).await?);
        }
        outcome.merge(checker.check_webpage(resource).await?);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use lexis_core::{Literal, ResourceRepository, Tenant, Uri, ValidatorConfig};
    use lexis_db::MemoryResourceRepository;

    use crate::context::{ValidationContext, ValidationMode};

    fn tenant(uri: &str, code: &str) -> Tenant {
        let mut t = Tenant::new(Some(Uri::parse(uri).unwrap()));
        t.set_property(openskos::CODE, Literal::new(code))
            .set_property(openskos::NAME, Literal::new("Example"))
            .set_property(openskos::ENABLE_SKOS_XL, Literal::boolean(false));
        t
    }

    fn checker(repo: &MemoryResourceRepository, mode: ValidationMode) -> PropertyChecker {
        PropertyChecker::new(
            Arc::new(repo.clone()),
            ValidationContext::new(ValidatorConfig::default()).with_mode(mode),
        )
    }

    #[tokio::test]
    async fn test_tenant_code_unique() {
        let repo = MemoryResourceRepository::new();
        let stored = tenant("http://example.com/tenants/a", "pic");
        repo.insert(stored.clone().into_resource()).await.unwrap();

        let update = checker(&repo, ValidationMode::Update);
        assert!(TenantValidator
            .validate(&update, &stored)
            .await
            .unwrap()
            .is_valid());

        let newcomer = tenant("http://example.com/tenants/b", "pic");
        let create = checker(&repo, ValidationMode::Create);
        let outcome = TenantValidator.validate(&create, &newcomer).await.unwrap();
        assert_eq!(outcome.len(), 1);
        assert!(outcome.messages()[0].contains("has been already registered"));
    }

    #[tokio::test]
    async fn test_tenant_flags_must_be_boolean() {
        let repo = MemoryResourceRepository::new();
        let mut t = tenant("http://example.com/tenants/a", "pic");
        t.set_property(openskos::NOTATION_UNIQUE_PER_TENANT, Literal::new("1"));
        let outcome = TenantValidator
            .validate(&checker(&repo, ValidationMode::Create), &t)
            .await
            .unwrap();
        assert_eq!(outcome.len(), 1);
        assert!(outcome.messages()[0].contains(openskos::NOTATION_UNIQUE_PER_TENANT));
    }
}
