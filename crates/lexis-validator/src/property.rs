//! Generic property checks shared by every resource validator.
//!
//! A check never fails on a bad resource; violations come back as
//! [`Outcome`] messages. Only wiring defects ([`Error::Config`]) and
//! lookup failures other than "not found" are returned as errors.

use std::sync::Arc;

use tracing::debug;

use lexis_core::defaults::UNKNOWN;
use lexis_core::namespaces::{dcterms, foaf, openskos, rdf, skos};
use lexis_core::{Error, Resource, ResourceLookup, Result, Uri, Value};

use crate::context::{ValidationContext, ValidationMode};
use crate::outcome::Outcome;

/// Policy for one predicate of one resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyRule {
    pub predicate: &'static str,
    pub required: bool,
    pub single: bool,
    pub boolean: bool,
    pub unique: bool,
    /// Type URI values must resolve to when stored.
    pub references: Option<&'static str>,
}

impl PropertyRule {
    /// Optional, multi-valued, unchecked.
    pub const fn new(predicate: &'static str) -> Self {
        Self {
            predicate,
            required: false,
            single: false,
            boolean: false,
            unique: false,
            references: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn single(mut self) -> Self {
        self.single = true;
        self
    }

    pub const fn boolean(mut self) -> Self {
        self.boolean = true;
        self
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub const fn references(mut self, rdf_type: &'static str) -> Self {
        self.references = Some(rdf_type);
        self
    }
}

/// Literal booleans must read exactly `true` or `false` once trimmed.
pub fn check_boolean(value: &Value, predicate: &str) -> Option<String> {
    match value.lexical().trim() {
        "true" | "false" => None,
        _ => Some(format!(
            "The value of {} must be set to true or false. ",
            predicate
        )),
    }
}

/// Property-check toolkit bound to one lookup and one validation context.
///
/// Cheap to clone; holds no per-call state.
#[derive(Clone)]
pub struct PropertyChecker {
    lookup: Arc<dyn ResourceLookup>,
    context: Arc<ValidationContext>,
}

impl PropertyChecker {
    pub fn new(lookup: Arc<dyn ResourceLookup>, context: ValidationContext) -> Self {
        Self {
            lookup,
            context: Arc::new(context),
        }
    }

    pub fn lookup(&self) -> &dyn ResourceLookup {
        self.lookup.as_ref()
    }

    pub fn context(&self) -> &ValidationContext {
        &self.context
    }

    /// Check one predicate of `resource` against `rule`.
    ///
    /// Absent optional properties pass without further checks. A
    /// cardinality violation does not stop the per-value checks.
    pub async fn check_property(&self, resource: &Resource, rule: PropertyRule) -> Result<Outcome> {
        let values = resource.property(rule.predicate);
        let mut outcome = Outcome::valid();

        if values.is_empty() {
            if rule.required {
                outcome.push(format!(
                    "{} is required for all resources of this type.",
                    rule.predicate
                ));
            }
            return Ok(outcome);
        }

        if values.len() > 1 && rule.single {
            outcome.push(format!(
                "There must be exactly 1 {} per resource. A few of them are given.",
                rule.predicate
            ));
        }

        for value in values {
            if rule.boolean {
                outcome.extend(check_boolean(value, rule.predicate));
            }
            if let (Value::Uri(uri), Some(rdf_type)) = (value, rule.references) {
                outcome.extend(self.check_exists(uri, rdf_type).await?);
            }
            if rule.unique {
                outcome.extend(self.check_unique(resource, rule.predicate, value).await?);
            }
        }

        Ok(outcome)
    }

    /// The referenced resource must be stored with `rdf_type`, unless
    /// reference checks are switched off by configuration.
    async fn check_exists(&self, uri: &Uri, rdf_type: &str) -> Result<Option<String>> {
        let config = self.context.config();
        if !config.check_references {
            debug!(referenced_uri = %uri, rdf_type, suppressed = true, "Reference check disabled");
            return Ok(None);
        }
        if rdf_type == skos::CONCEPT && config.import.skip_concept_references {
            debug!(referenced_uri = %uri, suppressed = true, "Concept reference check skipped for import");
            return Ok(None);
        }

        if self.lookup.resource_exists(uri.as_str().trim(), rdf_type).await? {
            Ok(None)
        } else {
            Ok(Some(format!(
                "The resource (of type {}) referred by  uri {} is not found. ",
                rdf_type, uri
            )))
        }
    }

    /// Other stored resources of the same type must not carry the value.
    ///
    /// On update a single match that is the resource itself passes.
    async fn check_unique(
        &self,
        resource: &Resource,
        predicate: &str,
        value: &Value,
    ) -> Result<Option<String>> {
        let mode = self.context.require_mode()?;
        let others = match value {
            Value::Uri(uri) => {
                self.lookup
                    .fetch_subject_uris_for_uri_object(resource, predicate, uri)
                    .await?
            }
            Value::Literal(literal) => {
                self.lookup
                    .fetch_subject_uris_for_literal_object(resource, predicate, literal)
                    .await?
            }
        };

        let duplicate = match (others.as_slice(), mode) {
            ([], _) => false,
            ([only], ValidationMode::Update) => resource.uri_str() != Some(only.as_str()),
            (_, _) => true,
        };

        if !duplicate {
            return Ok(None);
        }
        let rdf_type = resource.primary_type().map_or(UNKNOWN, Uri::as_str);
        Ok(Some(format!(
            "The resource of type {} with the property {} set to {} has been already registered.",
            rdf_type,
            predicate,
            value.lexical()
        )))
    }

    // ===== COMMON PROPERTIES =====

    pub async fn check_uuid(&self, resource: &Resource) -> Result<Outcome> {
        self.check_property(resource, PropertyRule::new(openskos::UUID).required().single().unique())
            .await
    }

    pub async fn check_code(&self, resource: &Resource) -> Result<Outcome> {
        self.check_property(resource, PropertyRule::new(openskos::CODE).required().single().unique())
            .await
    }

    /// Titles are required and unique; each needs a language, one
    /// distinct title per language.
    pub async fn check_title(&self, resource: &Resource) -> Result<Outcome> {
        let mut outcome = self
            .check_property(resource, PropertyRule::new(dcterms::TITLE).required().unique())
            .await?;

        let mut seen: Vec<(&str, &str)> = Vec::new();
        for title in resource.property(dcterms::TITLE) {
            let text = title.lexical();
            match title.language() {
                None => outcome.push(format!("Title {} is given without language. ", text)),
                Some(lang) => match seen.iter().find(|(l, _)| *l == lang) {
                    Some((_, first)) if *first != text => outcome.push(format!(
                        "More than 1 distinct title is given for the language tag {} .",
                        lang
                    )),
                    Some(_) => {}
                    None => seen.push((lang, text)),
                },
            }
        }
        Ok(outcome)
    }

    pub async fn check_description(&self, resource: &Resource) -> Result<Outcome> {
        self.check_property(resource, PropertyRule::new(dcterms::DESCRIPTION).single())
            .await
    }

    pub async fn check_type(&self, resource: &Resource) -> Result<Outcome> {
        self.check_property(resource, PropertyRule::new(rdf::TYPE).required().single())
            .await
    }

    pub async fn check_creator(&self, resource: &Resource) -> Result<Outcome> {
        self.check_property(
            resource,
            PropertyRule::new(dcterms::CREATOR)
                .required()
                .single()
                .references(foaf::PERSON),
        )
        .await
    }

    pub async fn check_top_concept_of(&self, resource: &Resource) -> Result<Outcome> {
        self.check_property(
            resource,
            PropertyRule::new(skos::TOP_CONCEPT_OF).references(skos::CONCEPT_SCHEME),
        )
        .await
    }

    pub async fn check_webpage(&self, resource: &Resource) -> Result<Outcome> {
        self.check_property(resource, PropertyRule::new(openskos::WEBPAGE).single().unique())
            .await
    }

    /// Fetch a referenced resource, turning "not found" into a message.
    pub(crate) async fn fetch_reference(
        &self,
        uri: &Uri,
        rdf_type: &str,
    ) -> Result<std::result::Result<Resource, String>> {
        match self.lookup.fetch_by_uri(uri.as_str(), rdf_type).await {
            Ok(resource) => Ok(Ok(resource)),
            Err(e @ Error::NotFound(_)) => Ok(Err(e.to_string())),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexis_core::namespaces::dcmi;
    use lexis_core::{Literal, ResourceRepository, ValidatorConfig};
    use lexis_db::MemoryResourceRepository;

    const FLAG: &str = "http://example.com/ns#flag";

    fn uri(s: &str) -> Uri {
        Uri::parse(s).unwrap()
    }

    fn checker(repo: &MemoryResourceRepository, mode: ValidationMode) -> PropertyChecker {
        PropertyChecker::new(
            Arc::new(repo.clone()),
            ValidationContext::new(ValidatorConfig::default()).with_mode(mode),
        )
    }

    fn with_values(predicate: &str, values: &[&str]) -> Resource {
        let mut r = Resource::typed(Some(uri("http://example.com/c/1")), skos::CONCEPT);
        for v in values {
            r.add_property(predicate, Literal::new(*v));
        }
        r
    }

    #[tokio::test]
    async fn test_required_missing_single_message() {
        let repo = MemoryResourceRepository::new();
        let checker = checker(&repo, ValidationMode::Create);
        let resource = with_values(FLAG, &[]);

        let outcome = checker
            .check_property(&resource, PropertyRule::new(FLAG).required().single().boolean())
            .await
            .unwrap();
        assert!(!outcome.is_valid());
        assert_eq!(outcome.len(), 1);
        assert_eq!(
            outcome.messages()[0],
            format!("{} is required for all resources of this type.", FLAG)
        );
    }

    #[tokio::test]
    async fn test_optional_missing_passes() {
        let repo = MemoryResourceRepository::new();
        let checker = checker(&repo, ValidationMode::Create);
        let outcome = checker
            .check_property(&with_values(FLAG, &[]), PropertyRule::new(FLAG).single())
            .await
            .unwrap();
        assert!(outcome.is_valid());
    }

    #[tokio::test]
    async fn test_cardinality_violation_still_checks_values() {
        let repo = MemoryResourceRepository::new();
        let checker = checker(&repo, ValidationMode::Create);
        let resource = with_values(FLAG, &["true", "yes"]);

        let outcome = checker
            .check_property(&resource, PropertyRule::new(FLAG).single().boolean())
            .await
            .unwrap();
        assert_eq!(outcome.len(), 2);
        assert!(outcome.messages()[0].starts_with("There must be exactly 1"));
        assert!(outcome.messages()[1].contains("must be set to true or false"));
    }

    #[tokio::test]
    async fn test_cardinality_violation_still_checks_references() {
        let repo = MemoryResourceRepository::new();
        let mut holder = Resource::typed(Some(uri("http://example.com/c/2")), skos::CONCEPT);
        holder.add_property(openskos::SET, uri("http://example.com/sets/x"));
        repo.insert(holder).await.unwrap();
        let checker = checker(&repo, ValidationMode::Create);

        let mut resource = with_values(FLAG, &[]);
        resource
            .add_property(openskos::SET, uri("http://example.com/sets/x"))
            .add_property(openskos::SET, uri("http://example.com/sets/y"));

        let rule = PropertyRule::new(openskos::SET).single().references(dcmi::DATASET);
        let outcome = checker.check_property(&resource, rule).await.unwrap();
        assert_eq!(outcome.len(), 3);
        assert!(outcome.messages()[0].starts_with("There must be exactly 1"));
        assert!(outcome.messages()[1].contains("sets/x is not found"));
        assert!(outcome.messages()[2].contains("sets/y is not found"));

        let outcome = checker.check_property(&resource, rule.unique()).await.unwrap();
        assert_eq!(outcome.len(), 4);
        assert!(outcome.messages()[2].contains("has been already registered"));
    }

    #[test]
    fn test_check_boolean_spellings() {
        for ok in ["true", "false", " true ", "false\n"] {
            assert!(check_boolean(&Value::literal(ok), FLAG).is_none(), "{:?}", ok);
        }
        for bad in ["True", "1", "", "TRUE", " yes "] {
            assert!(check_boolean(&Value::literal(bad), FLAG).is_some(), "{:?}", bad);
        }
    }

    #[tokio::test]
    async fn test_missing_reference_reported() {
        let repo = MemoryResourceRepository::new();
        let checker = checker(&repo, ValidationMode::Create);
        let mut resource = with_values(FLAG, &[]);
        resource.add_property(openskos::SET, uri("http://example.com/sets/missing"));

        let outcome = checker
            .check_property(&resource, PropertyRule::new(openskos::SET).references(dcmi::DATASET))
            .await
            .unwrap();
        assert_eq!(
            outcome.messages(),
            [format!(
                "The resource (of type {}) referred by  uri http://example.com/sets/missing is not found. ",
                dcmi::DATASET
            )]
        );
    }

    #[tokio::test]
    async fn test_reference_checks_can_be_suppressed() {
        let repo = MemoryResourceRepository::new();
        let mut resource = with_values(FLAG, &[]);
        resource.add_property(skos::BROADER, uri("http://example.com/c/404"));
        resource.add_property(openskos::SET, uri("http://example.com/sets/404"));

        let off = PropertyChecker::new(
            Arc::new(repo.clone()),
            ValidationContext::new(ValidatorConfig {
                check_references: false,
                ..ValidatorConfig::default()
            }),
        );
        let set_rule = PropertyRule::new(openskos::SET).references(dcmi::DATASET);
        assert!(off.check_property(&resource, set_rule).await.unwrap().is_valid());

        let import = PropertyChecker::new(
            Arc::new(repo.clone()),
            ValidationContext::new(ValidatorConfig::for_import()),
        );
        let broader_rule = PropertyRule::new(skos::BROADER).references(skos::CONCEPT);
        assert!(import
            .check_property(&resource, broader_rule)
            .await
            .unwrap()
            .is_valid());
        // Only concept references are relaxed during import.
        assert!(!import
            .check_property(&resource, set_rule)
            .await
            .unwrap()
            .is_valid());
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let repo = MemoryResourceRepository::new();
        repo.set_unavailable(true);
        let checker = checker(&repo, ValidationMode::Create);
        let mut resource = with_values(FLAG, &[]);
        resource.add_property(openskos::SET, uri("http://example.com/sets/1"));

        let err = checker
            .check_property(&resource, PropertyRule::new(openskos::SET).references(dcmi::DATASET))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
    }

    #[tokio::test]
    async fn test_uniqueness_create_and_update() {
        let repo = MemoryResourceRepository::new();
        repo.insert(with_values(openskos::CODE, &["alpha"])).await.unwrap();
        let mut other = Resource::typed(Some(uri("http://example.com/c/2")), skos::CONCEPT);
        other.add_property(openskos::CODE, Literal::new("beta"));
        repo.insert(other).await.unwrap();

        let rule = PropertyRule::new(openskos::CODE).required().single().unique();
        let unchanged = with_values(openskos::CODE, &["alpha"]);
        let taken = with_values(openskos::CODE, &["beta"]);
        let unused = with_values(openskos::CODE, &["gamma"]);

        let update = checker(&repo, ValidationMode::Update);
        assert!(update.check_property(&unchanged, rule).await.unwrap().is_valid());
        assert!(update.check_property(&unused, rule).await.unwrap().is_valid());
        let outcome = update.check_property(&taken, rule).await.unwrap();
        assert_eq!(
            outcome.messages(),
            [format!(
                "The resource of type {} with the property {} set to beta has been already registered.",
                skos::CONCEPT,
                openskos::CODE
            )]
        );

        let create = checker(&repo, ValidationMode::Create);
        assert!(!create.check_property(&unchanged, rule).await.unwrap().is_valid());
    }

    #[tokio::test]
    async fn test_uniqueness_without_mode_is_config_error() {
        let repo = MemoryResourceRepository::new();
        let checker = PropertyChecker::new(Arc::new(repo), ValidationContext::default());
        let err = checker
            .check_uuid(&with_values(openskos::UUID, &["abc"]))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_title_languages() {
        let repo = MemoryResourceRepository::new();
        let checker = checker(&repo, ValidationMode::Create);
        let mut resource = Resource::typed(None, dcmi::DATASET);
        resource
            .add_property(dcterms::TITLE, Value::lang_literal("Trees", "en"))
            .add_property(dcterms::TITLE, Value::lang_literal("Bushes", "en"))
            .add_property(dcterms::TITLE, Value::literal("Bomen"));

        let outcome = checker.check_title(&resource).await.unwrap();
        assert_eq!(
            outcome.messages(),
            [
                "More than 1 distinct title is given for the language tag en .",
                "Title Bomen is given without language. ",
            ]
        );
    }

    #[tokio::test]
    async fn test_same_title_repeated_in_language_passes() {
        let repo = MemoryResourceRepository::new();
        let checker = checker(&repo, ValidationMode::Create);
        let mut resource = Resource::typed(None, dcmi::DATASET);
        resource
            .add_property(dcterms::TITLE, Value::lang_literal("Trees", "en"))
            .add_property(dcterms::TITLE, Value::lang_literal("Trees", "en"))
            .add_property(dcterms::TITLE, Value::lang_literal("Bomen", "nl"));
        assert!(checker.check_title(&resource).await.unwrap().is_valid());
    }
}
