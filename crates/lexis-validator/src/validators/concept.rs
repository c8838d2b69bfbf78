//! Concept rules.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;

use lexis_core::namespaces::{openskos, relation_predicates, skos};
use lexis_core::{ConceptStatus, Resource, Result, Uri, Value};

use super::ResourceValidator;
use crate::outcome::Outcome;
use crate::property::{PropertyChecker, PropertyRule};

fn is_deleted(resource: &Resource) -> bool {
    resource
        .single_value(openskos::STATUS)
        .is_some_and(|s| s.lexical() == ConceptStatus::Deleted.as_str())
}

/// A relation predicate must not list the same target twice.
#[derive(Debug, Clone, Copy)]
pub struct DuplicateRelation {
    name: &'static str,
    predicate: &'static str,
}

impl DuplicateRelation {
    pub const fn broader() -> Self {
        Self {
            name: "duplicate_broader",
            predicate: skos::BROADER,
        }
    }

    pub const fn narrower() -> Self {
        Self {
            name: "duplicate_narrower",
            predicate: skos::NARROWER,
        }
    }

    pub const fn related() -> Self {
        Self {
            name: "duplicate_related",
            predicate: skos::RELATED,
        }
    }
}

#[async_trait]
impl ResourceValidator for DuplicateRelation {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn validate(&self, _checker: &PropertyChecker, resource: &Resource) -> Result<Outcome> {
        if !resource.has_type(skos::CONCEPT) {
            return Ok(Outcome::valid());
        }

        let mut seen = BTreeSet::new();
        let mut reported = BTreeSet::new();
        let mut outcome = Outcome::valid();
        for target in resource.uris(self.predicate) {
            if !seen.insert(target.as_str()) && reported.insert(target.as_str()) {
                outcome.push(format!(
                    "The concept {} lists {} more than once as {}.",
                    resource.display_uri(),
                    target,
                    self.predicate
                ));
            }
        }
        Ok(outcome)
    }
}

/// A concept must not relate or map to itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelatedToSelf;

#[async_trait]
impl ResourceValidator for RelatedToSelf {
    fn name(&self) -> &'static str {
        "related_to_self"
    }

    async fn validate(&self, _checker: &PropertyChecker, resource: &Resource) -> Result<Outcome> {
        let Some(own_uri) = resource.uri().filter(|_| resource.has_type(skos::CONCEPT)) else {
            return Ok(Outcome::valid());
        };

        Ok(relation_predicates()
            .filter(|predicate| resource.uris(predicate).any(|target| target == own_uri))
            .map(|predicate| {
                format!(
                    "The concept {} refers to itself via {}.",
                    own_uri, predicate
                )
            })
            .collect())
    }
}

/// Schemes a concept lists must exist and be reachable for the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct InScheme;

#[async_trait]
impl ResourceValidator for InScheme {
    fn name(&self) -> &'static str {
        "in_scheme"
    }

    async fn validate(&self, checker: &PropertyChecker, resource: &Resource) -> Result<Outcome> {
        if !resource.has_type(skos::CONCEPT) {
            return Ok(Outcome::valid());
        }
        checker.check_in_scheme(resource).await
    }
}

/// Live concepts with the same notation as `resource`, other than itself.
async fn notation_holders(
    checker: &PropertyChecker,
    resource: &Resource,
    notation: &str,
) -> Result<Vec<Resource>> {
    let holders = checker
        .lookup()
        .fetch_by_literal(skos::CONCEPT, skos::NOTATION, notation)
        .await?;
    Ok(holders
        .into_iter()
        .filter(|other| resource.uri().is_none() || other.uri() != resource.uri())
        .filter(|other| !is_deleted(other))
        .collect())
}

/// Notations are unique within each concept scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueNotation;

#[async_trait]
impl ResourceValidator for UniqueNotation {
    fn name(&self) -> &'static str {
        "unique_notation"
    }

    async fn validate(&self, checker: &PropertyChecker, resource: &Resource) -> Result<Outcome> {
        if !resource.has_type(skos::CONCEPT) || is_deleted(resource) {
            return Ok(Outcome::valid());
        }

        let schemes: BTreeSet<&Uri> = resource.uris(skos::IN_SCHEME).collect();
        let mut outcome = Outcome::valid();
        for notation in resource.property(skos::NOTATION).iter().map(Value::lexical) {
            let holders = notation_holders(checker, resource, notation).await?;
            let clashes: BTreeSet<&Uri> = holders
                .iter()
                .flat_map(|other| other.uris(skos::IN_SCHEME))
                .filter(|scheme| schemes.contains(scheme))
                .collect();
            for scheme in clashes {
                outcome.push(format!(
                    "The notation {} is already in use in the concept scheme {}.",
                    notation, scheme
                ));
            }
        }
        Ok(outcome)
    }
}

/// Notations are unique across all schemes of a tenant.
#[derive(Debug, Clone)]
pub struct UniqueNotationInTenant {
    tenant_uri: Uri,
}

impl UniqueNotationInTenant {
    pub fn new(tenant_uri: Uri) -> Self {
        Self { tenant_uri }
    }
}

#[async_trait]
impl ResourceValidator for UniqueNotationInTenant {
    fn name(&self) -> &'static str {
        "unique_notation_in_tenant"
    }

    async fn validate(&self, checker: &PropertyChecker, resource: &Resource) -> Result<Outcome> {
        if !resource.has_type(skos::CONCEPT) || is_deleted(resource) {
            return Ok(Outcome::valid());
        }

        let mut outcome = Outcome::valid();
        for notation in resource.property(skos::NOTATION).iter().map(Value::lexical) {
            let holders = notation_holders(checker, resource, notation).await?;
            let taken = holders.iter().any(|other| {
                other
                    .property(openskos::TENANT)
                    .iter()
                    .any(|t| t.lexical() == self.tenant_uri.as_str())
            });
            if taken {
                outcome.push(format!(
                    "The notation {} is already in use in the tenant {}.",
                    notation, self.tenant_uri
                ));
            }
        }
        Ok(outcome)
    }
}

/// At most one distinct preferred label per language.
#[derive(Debug, Clone, Copy, Default)]
pub struct SinglePrefLabel;

impl SinglePrefLabel {
    fn check(resource: &Resource) -> Outcome {
        let mut by_language: BTreeMap<Option<&str>, BTreeSet<&str>> = BTreeMap::new();
        for label in resource.property(skos::PREF_LABEL) {
            by_language
                .entry(label.language())
                .or_default()
                .insert(label.lexical());
        }

        by_language
            .into_iter()
            .filter(|(_, labels)| labels.len() > 1)
            .map(|(language, labels)| {
                format!(
                    "Only single pref label per language is allowed. Found {} for {}",
                    labels.len(),
                    language.unwrap_or("untagged")
                )
            })
            .collect()
    }
}

#[async_trait]
impl ResourceValidator for SinglePrefLabel {
    fn name(&self) -> &'static str {
        "single_pref_label"
    }

    async fn validate(&self, _checker: &PropertyChecker, resource: &Resource) -> Result<Outcome> {
        if !resource.has_type(skos::CONCEPT) {
            return Ok(Outcome::valid());
        }
        Ok(Self::check(resource))
    }
}

/// Structural and ownership checks on a concept's own properties.
///
/// Scheme membership is left to [`InScheme`] in the default list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConceptValidator;

impl ConceptValidator {
    fn check_status(resource: &Resource) -> Outcome {
        resource
            .property(openskos::STATUS)
            .iter()
            .map(Value::lexical)
            .filter(|status| status.parse::<ConceptStatus>().is_err())
            .map(|status| format!("The status {} is not a valid concept status.", status))
            .collect()
    }
}

#[async_trait]
impl ResourceValidator for ConceptValidator {
    fn name(&self) -> &'static str {
        "concept"
    }

    async fn validate(&self, checker: &PropertyChecker, resource: &Resource) -> Result<Outcome> {
        if !resource.has_type(skos::CONCEPT) {
            return Ok(Outcome::valid());
        }

        let mut outcome = checker.check_type(resource).await?;
        outcome.merge(checker.check_uuid(resource).await?);
        outcome.merge(checker.check_in_set(resource).await?);
        outcome.merge(checker.check_creator(resource).await?);
        outcome.merge(checker.check_in_skos_collection(resource).await?);
        outcome.merge(checker.check_top_concept_of(resource).await?);
        outcome.merge(
            checker
                .check_property(resource, PropertyRule::new(openskos::STATUS).single())
                .await?,
        );
        outcome.merge(Self::check_status(resource));
        outcome.merge(SinglePrefLabel::check(resource));
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use lexis_core::{Literal, ValidatorConfig};
    use lexis_db::MemoryResourceRepository;

    use crate::context::{ValidationContext, ValidationMode};

    const SELF: &str = "http://example.com/concepts/self";

    fn uri(s: &str) -> Uri {
        Uri::parse(s).unwrap()
    }

    fn concept() -> Resource {
        Resource::typed(Some(uri(SELF)), skos::CONCEPT)
    }

    fn checker(repo: MemoryResourceRepository) -> PropertyChecker {
        PropertyChecker::new(
            Arc::new(repo),
            ValidationContext::new(ValidatorConfig::default()).with_mode(ValidationMode::Create),
        )
    }

    #[tokio::test]
    async fn test_related_to_self_names_predicate() {
        let mut c = concept();
        c.add_property(skos::BROADER, uri(SELF));
        let outcome = RelatedToSelf
            .validate(&checker(MemoryResourceRepository::new()), &c)
            .await
            .unwrap();
        assert_eq!(outcome.len(), 1);
        assert!(outcome.messages()[0].contains(skos::BROADER));
    }

    #[tokio::test]
    async fn test_related_to_self_checks_mapping_relations() {
        let mut c = concept();
        c.add_property(skos::EXACT_MATCH, uri(SELF))
            .add_property(skos::RELATED, uri("http://example.com/concepts/other"));
        let outcome = RelatedToSelf
            .validate(&checker(MemoryResourceRepository::new()), &c)
            .await
            .unwrap();
        assert_eq!(outcome.len(), 1);
        assert!(outcome.messages()[0].contains(skos::EXACT_MATCH));
    }

    #[tokio::test]
    async fn test_duplicate_relation_reported_once_per_target() {
        let target = uri("http://example.com/concepts/parent");
        let mut c = concept();
        c.add_property(skos::BROADER, target.clone())
            .add_property(skos::BROADER, target.clone())
            .add_property(skos::BROADER, target)
            .add_property(skos::NARROWER, uri("http://example.com/concepts/child"));

        let checker = checker(MemoryResourceRepository::new());
        let broader = DuplicateRelation::broader().validate(&checker, &c).await.unwrap();
        assert_eq!(broader.len(), 1);
        assert!(DuplicateRelation::narrower()
            .validate(&checker, &c)
            .await
            .unwrap()
            .is_valid());
    }

    #[tokio::test]
    async fn test_in_scheme_optional_but_must_exist() {
        let checker = checker(MemoryResourceRepository::new());
        assert!(InScheme.validate(&checker, &concept()).await.unwrap().is_valid());

        let mut c = concept();
        c.add_property(skos::IN_SCHEME, uri("http://example.com/schemes/missing"));
        let outcome = InScheme.validate(&checker, &c).await.unwrap();
        assert_eq!(outcome.len(), 1);
        assert!(outcome.messages()[0].contains("is not found"));
    }

    #[tokio::test]
    async fn test_single_pref_label_counts_distinct_values() {
        let mut c = concept();
        c.add_property(skos::PREF_LABEL, Value::lang_literal("Tree", "en"))
            .add_property(skos::PREF_LABEL, Value::lang_literal("Tree", "en"))
            .add_property(skos::PREF_LABEL, Value::lang_literal("Boom", "nl"))
            .add_property(skos::PREF_LABEL, Value::lang_literal("Struik", "nl"));

        let outcome = SinglePrefLabel
            .validate(&checker(MemoryResourceRepository::new()), &c)
            .await
            .unwrap();
        assert_eq!(
            outcome.messages(),
            ["Only single pref label per language is allowed. Found 2 for nl"]
        );
    }

    fn stored_concept(uri_str: &str, notation: &str, scheme: &str, tenant: &str) -> Resource {
        let mut c = Resource::typed(Some(uri(uri_str)), skos::CONCEPT);
        c.add_property(skos::NOTATION, Literal::new(notation))
            .add_property(skos::IN_SCHEME, uri(scheme))
            .add_property(openskos::TENANT, uri(tenant));
        c
    }

    #[tokio::test]
    async fn test_unique_notation_per_scheme() {
        let repo = MemoryResourceRepository::with_resources([stored_concept(
            "http://example.com/concepts/1",
            "42",
            "http://example.com/schemes/a",
            "http://example.com/tenants/a",
        )]);
        let checker = checker(repo);

        let mut same_scheme = concept();
        same_scheme
            .add_property(skos::NOTATION, Literal::new("42"))
            .add_property(skos::IN_SCHEME, uri("http://example.com/schemes/a"));
        let outcome = UniqueNotation.validate(&checker, &same_scheme).await.unwrap();
        assert_eq!(outcome.len(), 1);

        let mut other_scheme = concept();
        other_scheme
            .add_property(skos::NOTATION, Literal::new("42"))
            .add_property(skos::IN_SCHEME, uri("http://example.com/schemes/b"));
        assert!(UniqueNotation
            .validate(&checker, &other_scheme)
            .await
            .unwrap()
            .is_valid());

        let tenant_rule = UniqueNotationInTenant::new(uri("http://example.com/tenants/a"));
        assert!(!tenant_rule
            .validate(&checker, &other_scheme)
            .await
            .unwrap()
            .is_valid());
    }

    #[tokio::test]
    async fn test_unique_notation_ignores_self_and_deleted() {
        let mut deleted = stored_concept(
            "http://example.com/concepts/2",
            "7",
            "http://example.com/schemes/a",
            "http://example.com/tenants/a",
        );
        deleted.set_property(openskos::STATUS, Literal::new("deleted"));
        let own = stored_concept(SELF, "7", "http://example.com/schemes/a", "http://example.com/tenants/a");
        let repo = MemoryResourceRepository::with_resources([deleted, own.clone()]);

        let checker = checker(repo);
        assert!(UniqueNotation.validate(&checker, &own).await.unwrap().is_valid());
        assert!(UniqueNotationInTenant::new(uri("http://example.com/tenants/a"))
            .validate(&checker, &own)
            .await
            .unwrap()
            .is_valid());
    }

    #[tokio::test]
    async fn test_concept_status_must_be_known() {
        let mut c = concept();
        c.add_property(openskos::STATUS, Literal::new("archived"));
        let outcome = ConceptValidator::check_status(&c);
        assert_eq!(
            outcome.messages(),
            ["The status archived is not a valid concept status."]
        );
    }
}
