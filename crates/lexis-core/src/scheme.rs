//! Concept schemes.

use serde::{Deserialize, Serialize};

use crate::namespaces::{dcterms, openskos, skos};
use crate::rdf::{resource_wrapper, Resource, Uri, Value};

/// A resource typed `skos:ConceptScheme`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Resource", into = "Resource")]
pub struct ConceptScheme(Resource);

resource_wrapper!(ConceptScheme, skos::CONCEPT_SCHEME);

impl ConceptScheme {
    pub fn new(uri: Option<Uri>) -> Self {
        Self(Resource::typed(uri, skos::CONCEPT_SCHEME))
    }

    /// Set the scheme belongs to; ownership follows the set's publisher.
    pub fn dataset(&self) -> Option<&Uri> {
        self.0.single_uri(openskos::SET)
    }

    pub fn title(&self, language: Option<&str>) -> Option<&str> {
        let titles = self.0.property(dcterms::TITLE);
        language
            .and_then(|lang| titles.iter().find(|v| v.language() == Some(lang)))
            .or_else(|| titles.first())
            .map(Value::lexical)
    }

    pub fn top_concepts(&self) -> impl Iterator<Item = &Uri> {
        self.0.uris(skos::HAS_TOP_CONCEPT)
    }

    pub fn add_top_concept(&mut self, concept: Uri) -> &mut Self {
        self.0.add_unique_property(skos::HAS_TOP_CONCEPT, concept);
        self
    }
}
