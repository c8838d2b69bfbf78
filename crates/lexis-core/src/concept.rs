//! SKOS concept wrapper and metadata lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::defaults::{FIRST_NOTATION, UNKNOWN};
use crate::error::{Error, Result};
use crate::namespaces::{dcterms, openskos, skos, xsd, PropertyCategory};
use crate::rdf::{resource_wrapper, Literal, Resource, Uri, Value};
use crate::traits::ResourceRepository;

// =============================================================================
// STATUS
// =============================================================================

/// Editorial status of a concept.
///
/// Any status may be set by an editor; entering or leaving `Approved` and
/// `Deleted` has metadata side effects (see [`Concept::add_metadata`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConceptStatus {
    #[default]
    Candidate,
    Approved,
    Redirected,
    NotCompliant,
    Rejected,
    Obsolete,
    Deleted,
}

impl ConceptStatus {
    pub const ALL: [ConceptStatus; 7] = [
        Self::Candidate,
        Self::Approved,
        Self::Redirected,
        Self::NotCompliant,
        Self::Rejected,
        Self::Obsolete,
        Self::Deleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Candidate => "candidate",
            Self::Approved => "approved",
            Self::Redirected => "redirected",
            Self::NotCompliant => "not_compliant",
            Self::Rejected => "rejected",
            Self::Obsolete => "obsolete",
            Self::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for ConceptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConceptStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Invalid concept status: {}", s))
    }
}

// =============================================================================
// CONCEPT
// =============================================================================

/// Request-scoped inputs for [`Concept::add_metadata`].
#[derive(Debug, Clone, Default)]
pub struct MetadataParams {
    /// Set announced by the request, if any.
    pub set_uri: Option<Uri>,
}

/// A resource typed `skos:Concept`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Resource", into = "Resource")]
pub struct Concept(Resource);

impl Concept {
    pub fn new(uri: Option<Uri>) -> Self {
        Self(Resource::typed(uri, skos::CONCEPT))
    }

    /// Raw status literal.
    pub fn status_str(&self) -> Option<&str> {
        self.0.single_value(openskos::STATUS).map(Value::lexical)
    }

    /// Parsed status; `None` when absent or not a known status.
    pub fn status(&self) -> Option<ConceptStatus> {
        self.status_str().and_then(|s| s.parse().ok())
    }

    pub fn set_status(&mut self, status: ConceptStatus) {
        self.0
            .set_property(openskos::STATUS, Literal::new(status.as_str()));
    }

    pub fn is_deleted(&self) -> bool {
        self.status() == Some(ConceptStatus::Deleted)
    }

    /// Preferred label in `language`, falling back to all preferred labels.
    pub fn caption(&self, language: Option<&str>) -> Option<String> {
        match language {
            Some(lang) if self.0.has_property_in_language(skos::PREF_LABEL, Some(lang)) => {
                self.0.property_flat_value(skos::PREF_LABEL, Some(lang))
            }
            _ => self.0.property_flat_value(skos::PREF_LABEL, None),
        }
    }

    /// Legacy `openskos:uuid` identifier.
    pub fn uuid(&self) -> Option<&str> {
        self.0.single_value(openskos::UUID).map(Value::lexical)
    }

    /// Owning tenant: a URI, or the literal `unknown` for legacy data.
    pub fn tenant(&self) -> Value {
        self.0
            .single_value(openskos::TENANT)
            .cloned()
            .unwrap_or_else(|| Value::literal(UNKNOWN))
    }

    /// The set (`openskos:set`) this concept belongs to.
    pub fn dataset(&self) -> Option<&Uri> {
        self.0.single_uri(openskos::SET)
    }

    pub fn skos_collection(&self) -> Option<&Value> {
        self.0.single_value(openskos::IN_SKOS_COLLECTION)
    }

    pub fn schemes(&self) -> impl Iterator<Item = &Uri> {
        self.0.uris(skos::IN_SCHEME)
    }

    pub fn is_top_concept_of(&self, scheme_uri: &str) -> bool {
        self.0.uris(skos::TOP_CONCEPT_OF).any(|u| u == scheme_uri)
    }

    /// Whether any semantic relation or mapping property is filled.
    pub fn has_any_relations(&self) -> bool {
        PropertyCategory::SemanticRelations
            .predicates()
            .iter()
            .chain(PropertyCategory::MappingProperties.predicates())
            .any(|p| !self.0.is_property_empty(p))
    }

    /// Stamp lifecycle metadata before persisting.
    ///
    /// `existing` is the stored concept when updating, `None` when creating.
    pub fn add_metadata(&mut self, user: &Uri, params: &MetadataParams, existing: Option<&Concept>) {
        self.add_metadata_at(user, params, existing, Utc::now());
    }

    /// [`Concept::add_metadata`] with an explicit clock.
    pub fn add_metadata_at(
        &mut self,
        user: &Uri,
        params: &MetadataParams,
        existing: Option<&Concept>,
        now: DateTime<Utc>,
    ) {
        if let Some(set) = derive_set_uri(params, existing) {
            self.0.set_property(openskos::SET, set);
        }

        let Some(existing) = existing else {
            self.0
                .set_property(dcterms::CREATOR, user.clone())
                .set_property(dcterms::DATE_SUBMITTED, Literal::datetime(now));
            self.clear_acceptance_and_deletion();
            self.set_status(ConceptStatus::Candidate);
            return;
        };

        self.0
            .set_property(dcterms::MODIFIED, Literal::datetime(now))
            .add_unique_property(dcterms::CONTRIBUTOR, user.clone());

        if existing.status_str() != self.status_str() {
            debug!(
                status_from = existing.status_str().unwrap_or(""),
                status_to = self.status_str().unwrap_or(""),
                "Concept status changed"
            );
            self.clear_acceptance_and_deletion();
            match self.status() {
                Some(ConceptStatus::Approved) => {
                    self.0
                        .add_property(dcterms::DATE_ACCEPTED, Literal::datetime(now))
                        .add_property(openskos::ACCEPTED_BY, user.clone());
                }
                Some(ConceptStatus::Deleted) => {
                    self.0
                        .add_property(openskos::DATE_DELETED, Literal::datetime(now))
                        .add_property(openskos::DELETED_BY, user.clone());
                }
                _ => {}
            }
        }

        match existing.uuid() {
            Some(uuid) => {
                self.0.set_property(openskos::UUID, Literal::new(uuid));
            }
            None => {
                self.0.unset_property(openskos::UUID);
            }
        }

        match existing.0.single_value(dcterms::CREATOR) {
            Some(creator) => self.0.set_property(dcterms::CREATOR, creator.clone()),
            None => self.0.set_property(dcterms::CREATOR, Literal::new(UNKNOWN)),
        };

        if let Some(submitted) = existing.0.single_value(dcterms::DATE_SUBMITTED) {
            let submitted = match submitted {
                Value::Literal(lit) => Literal::typed(lit.value.clone(), xsd::DATETIME),
                Value::Uri(uri) => Literal::typed(uri.as_str(), xsd::DATETIME),
            };
            self.0.set_property(dcterms::DATE_SUBMITTED, submitted);
        }
    }

    fn clear_acceptance_and_deletion(&mut self) {
        self.0
            .unset_property(dcterms::DATE_ACCEPTED)
            .unset_property(openskos::ACCEPTED_BY)
            .unset_property(openskos::DATE_DELETED)
            .unset_property(openskos::DELETED_BY);
    }

    /// Add the next numeric notation after `max_numeric` (1 when none).
    ///
    /// Fails with [`Error::InvalidInput`] once the numeric range is used up.
    pub fn self_generate_notation(&mut self, max_numeric: Option<u64>) -> Result<()> {
        let notation = match max_numeric {
            None => FIRST_NOTATION,
            Some(max) => max.checked_add(1).ok_or_else(|| {
                Error::InvalidInput(format!("Notation sequence exhausted after {}", max))
            })?,
        };
        self.0
            .add_property(skos::NOTATION, Literal::new(notation.to_string()));
        Ok(())
    }
}

/// Request parameter wins; otherwise keep the stored concept's set.
fn derive_set_uri(params: &MetadataParams, existing: Option<&Concept>) -> Option<Uri> {
    params
        .set_uri
        .clone()
        .or_else(|| existing.and_then(|c| c.dataset().cloned()))
}

/// Generate a tenant-unique numeric notation for `concept`.
///
/// Racy against concurrent creation; a duplicate is caught by the
/// unique-notation validators.
pub async fn generate_notation(
    repository: &dyn ResourceRepository,
    tenant_uri: &str,
    concept: &mut Concept,
) -> Result<()> {
    let max = repository.fetch_max_numeric_notation(tenant_uri).await?;
    concept.self_generate_notation(max)
}

resource_wrapper!(Concept, skos::CONCEPT);
