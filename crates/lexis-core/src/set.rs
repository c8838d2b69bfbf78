//! Sets: tenant-scoped datasets grouping concepts and schemes.

use serde::{Deserialize, Serialize};

use crate::namespaces::{dcmi, dcterms, openskos};
use crate::rdf::{resource_wrapper, Literal, Resource, Uri, Value};

/// A resource typed `dcmitype:Dataset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Resource", into = "Resource")]
pub struct Set(Resource);

resource_wrapper!(Set, dcmi::DATASET);

impl Set {
    pub fn new(uri: Option<Uri>) -> Self {
        Self(Resource::typed(uri, dcmi::DATASET))
    }

    pub fn code(&self) -> Option<&str> {
        self.0.single_value(openskos::CODE).map(Value::lexical)
    }

    /// Title in `language`, or the first title.
    pub fn title(&self, language: Option<&str>) -> Option<&str> {
        let titles = self.0.property(dcterms::TITLE);
        language
            .and_then(|lang| titles.iter().find(|v| v.language() == Some(lang)))
            .or_else(|| titles.first())
            .map(Value::lexical)
    }

    /// Owning tenant.
    pub fn publisher(&self) -> Option<&Uri> {
        self.0.single_uri(dcterms::PUBLISHER)
    }

    pub fn set_publisher(&mut self, tenant: Uri) -> &mut Self {
        self.0.set_property(dcterms::PUBLISHER, tenant);
        self
    }

    /// Whether the set is exposed over OAI-PMH.
    pub fn allows_oai(&self) -> bool {
        self.0
            .single_value(openskos::ALLOW_OAI)
            .is_some_and(|v| v.lexical().trim() == "true")
    }

    pub fn set_allow_oai(&mut self, allow: bool) -> &mut Self {
        self.0.set_property(openskos::ALLOW_OAI, Literal::boolean(allow));
        self
    }

    pub fn oai_base_uri(&self) -> Option<&Uri> {
        self.0.single_uri(openskos::OAI_BASE_URI)
    }

    pub fn webpage(&self) -> Option<&Uri> {
        self.0.single_uri(openskos::WEBPAGE)
    }
}
