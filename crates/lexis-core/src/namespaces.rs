//! RDF vocabulary terms used by the thesaurus model.
//!
//! Each submodule mirrors one namespace. Terms are plain `&'static str`
//! IRIs so they can be used directly as property-map keys.

/// `rdf:` terms.
pub mod rdf {
    pub const NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}

/// `xsd:` datatypes.
pub mod xsd {
    pub const DATETIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
}

/// W3C SKOS core terms.
pub mod skos {
    pub const NAMESPACE: &str = "http://www.w3.org/2004/02/skos/core#";

    // Classes
    pub const CONCEPT: &str = "http://www.w3.org/2004/02/skos/core#Concept";
    pub const CONCEPT_SCHEME: &str = "http://www.w3.org/2004/02/skos/core#ConceptScheme";
    pub const COLLECTION: &str = "http://www.w3.org/2004/02/skos/core#Collection";
    pub const ORDERED_COLLECTION: &str = "http://www.w3.org/2004/02/skos/core#OrderedCollection";

    // Concept schemes
    pub const IN_SCHEME: &str = "http://www.w3.org/2004/02/skos/core#inScheme";
    pub const HAS_TOP_CONCEPT: &str = "http://www.w3.org/2004/02/skos/core#hasTopConcept";
    pub const TOP_CONCEPT_OF: &str = "http://www.w3.org/2004/02/skos/core#topConceptOf";

    // Lexical labels
    pub const PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";
    pub const ALT_LABEL: &str = "http://www.w3.org/2004/02/skos/core#altLabel";
    pub const HIDDEN_LABEL: &str = "http://www.w3.org/2004/02/skos/core#hiddenLabel";

    pub const NOTATION: &str = "http://www.w3.org/2004/02/skos/core#notation";

    // Documentation
    pub const CHANGE_NOTE: &str = "http://www.w3.org/2004/02/skos/core#changeNote";
    pub const DEFINITION: &str = "http://www.w3.org/2004/02/skos/core#definition";
    pub const EDITORIAL_NOTE: &str = "http://www.w3.org/2004/02/skos/core#editorialNote";
    pub const EXAMPLE: &str = "http://www.w3.org/2004/02/skos/core#example";
    pub const HISTORY_NOTE: &str = "http://www.w3.org/2004/02/skos/core#historyNote";
    pub const NOTE: &str = "http://www.w3.org/2004/02/skos/core#note";
    pub const SCOPE_NOTE: &str = "http://www.w3.org/2004/02/skos/core#scopeNote";

    // Semantic relations
    pub const BROADER: &str = "http://www.w3.org/2004/02/skos/core#broader";
    pub const BROADER_TRANSITIVE: &str = "http://www.w3.org/2004/02/skos/core#broaderTransitive";
    pub const NARROWER: &str = "http://www.w3.org/2004/02/skos/core#narrower";
    pub const NARROWER_TRANSITIVE: &str =
        "http://www.w3.org/2004/02/skos/core#narrowerTransitive";
    pub const RELATED: &str = "http://www.w3.org/2004/02/skos/core#related";
    pub const SEMANTIC_RELATION: &str = "http://www.w3.org/2004/02/skos/core#semanticRelation";

    // Collections
    pub const MEMBER: &str = "http://www.w3.org/2004/02/skos/core#member";
    pub const MEMBER_LIST: &str = "http://www.w3.org/2004/02/skos/core#memberList";

    // Mapping properties
    pub const BROAD_MATCH: &str = "http://www.w3.org/2004/02/skos/core#broadMatch";
    pub const CLOSE_MATCH: &str = "http://www.w3.org/2004/02/skos/core#closeMatch";
    pub const EXACT_MATCH: &str = "http://www.w3.org/2004/02/skos/core#exactMatch";
    pub const MAPPING_RELATION: &str = "http://www.w3.org/2004/02/skos/core#mappingRelation";
    pub const NARROW_MATCH: &str = "http://www.w3.org/2004/02/skos/core#narrowMatch";
    pub const RELATED_MATCH: &str = "http://www.w3.org/2004/02/skos/core#relatedMatch";
}

/// Application-specific terms for tenants, sets and concept workflow.
pub mod openskos {
    pub const NAMESPACE: &str = "http://openskos.org/xmlns#";

    pub const UUID: &str = "http://openskos.org/xmlns#uuid";
    pub const CODE: &str = "http://openskos.org/xmlns#code";
    pub const NAME: &str = "http://openskos.org/xmlns#name";
    pub const SET: &str = "http://openskos.org/xmlns#set";
    pub const TENANT: &str = "http://openskos.org/xmlns#tenant";
    pub const STATUS: &str = "http://openskos.org/xmlns#status";
    pub const IN_SKOS_COLLECTION: &str = "http://openskos.org/xmlns#inSkosCollection";
    pub const WEBPAGE: &str = "http://openskos.org/xmlns#webpage";

    pub const ACCEPTED_BY: &str = "http://openskos.org/xmlns#acceptedBy";
    pub const DELETED_BY: &str = "http://openskos.org/xmlns#deletedBy";
    pub const DATE_DELETED: &str = "http://openskos.org/xmlns#dateDeleted";

    // Tenant policy flags
    pub const NOTATION_UNIQUE_PER_TENANT: &str = "http://openskos.org/xmlns#notationUniquePerTenant";
    pub const NOTATION_AUTO_GENERATED: &str = "http://openskos.org/xmlns#notationAutoGenerated";
    pub const ENABLE_SKOS_XL: &str = "http://openskos.org/xmlns#enableSkosXl";
    pub const ENABLE_STATUSES_SYSTEM: &str = "http://openskos.org/xmlns#enableStatussesSystem";

    // Set flags
    pub const ALLOW_OAI: &str = "http://openskos.org/xmlns#allow_oai";
    pub const OAI_BASE_URI: &str = "http://openskos.org/xmlns#oai_baseURL";
}

/// Dublin Core terms.
pub mod dcterms {
    pub const TITLE: &str = "http://purl.org/dc/terms/title";
    pub const DESCRIPTION: &str = "http://purl.org/dc/terms/description";
    pub const CREATOR: &str = "http://purl.org/dc/terms/creator";
    pub const CONTRIBUTOR: &str = "http://purl.org/dc/terms/contributor";
    pub const PUBLISHER: &str = "http://purl.org/dc/terms/publisher";
    pub const DATE_SUBMITTED: &str = "http://purl.org/dc/terms/dateSubmitted";
    pub const DATE_ACCEPTED: &str = "http://purl.org/dc/terms/dateAccepted";
    pub const MODIFIED: &str = "http://purl.org/dc/terms/modified";
}

/// DCMI type vocabulary.
pub mod dcmi {
    pub const DATASET: &str = "http://purl.org/dc/dcmitype/Dataset";
}

/// FOAF terms.
pub mod foaf {
    pub const PERSON: &str = "http://xmlns.com/foaf/0.1/Person";
}

/// W3C organization ontology.
pub mod org {
    pub const FORMAL_ORGANIZATION: &str = "http://www.w3.org/ns/org#FormalOrganization";
}

/// vCard contact terms.
pub mod vcard {
    pub const ORG_UNIT: &str = "http://www.w3.org/2006/vcard/ns#orgunit";
    pub const EMAIL: &str = "http://www.w3.org/2006/vcard/ns#email";
    pub const ADR: &str = "http://www.w3.org/2006/vcard/ns#street-address";
    pub const LOCALITY: &str = "http://www.w3.org/2006/vcard/ns#locality";
    pub const PCODE: &str = "http://www.w3.org/2006/vcard/ns#postal-code";
    pub const COUNTRY: &str = "http://www.w3.org/2006/vcard/ns#country-name";
}

// =============================================================================
// PROPERTY CATEGORIES
// =============================================================================

/// Grouping of concept predicates by SKOS category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyCategory {
    ConceptSchemes,
    LexicalLabels,
    Notations,
    DocumentationProperties,
    SemanticRelations,
    SkosCollections,
    MappingProperties,
}

impl PropertyCategory {
    pub const ALL: [PropertyCategory; 7] = [
        Self::ConceptSchemes,
        Self::LexicalLabels,
        Self::Notations,
        Self::DocumentationProperties,
        Self::SemanticRelations,
        Self::SkosCollections,
        Self::MappingProperties,
    ];

    /// Predicates belonging to this category.
    pub const fn predicates(self) -> &'static [&'static str] {
        match self {
            Self::ConceptSchemes => &[
                skos::CONCEPT_SCHEME,
                skos::IN_SCHEME,
                skos::HAS_TOP_CONCEPT,
                skos::TOP_CONCEPT_OF,
            ],
            Self::LexicalLabels => &[skos::ALT_LABEL, skos::HIDDEN_LABEL, skos::PREF_LABEL],
            Self::Notations => &[skos::NOTATION],
            Self::DocumentationProperties => &[
                skos::CHANGE_NOTE,
                skos::DEFINITION,
                skos::EDITORIAL_NOTE,
                skos::EXAMPLE,
                skos::HISTORY_NOTE,
                skos::NOTE,
                skos::SCOPE_NOTE,
            ],
            Self::SemanticRelations => &[
                skos::BROADER,
                skos::BROADER_TRANSITIVE,
                skos::NARROWER,
                skos::NARROWER_TRANSITIVE,
                skos::RELATED,
                skos::SEMANTIC_RELATION,
            ],
            Self::SkosCollections => &[
                openskos::IN_SKOS_COLLECTION,
                skos::ORDERED_COLLECTION,
                skos::MEMBER,
                skos::MEMBER_LIST,
            ],
            Self::MappingProperties => &[
                skos::BROAD_MATCH,
                skos::CLOSE_MATCH,
                skos::EXACT_MATCH,
                skos::MAPPING_RELATION,
                skos::NARROW_MATCH,
                skos::RELATED_MATCH,
            ],
        }
    }

    /// Category a predicate belongs to, if any.
    pub fn of(predicate: &str) -> Option<PropertyCategory> {
        Self::ALL
            .into_iter()
            .find(|category| category.predicates().iter().any(|p| *p == predicate))
    }
}

impl std::fmt::Display for PropertyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConceptSchemes => write!(f, "ConceptSchemes"),
            Self::LexicalLabels => write!(f, "LexicalLabels"),
            Self::Notations => write!(f, "Notations"),
            Self::DocumentationProperties => write!(f, "DocumentationProperties"),
            Self::SemanticRelations => write!(f, "SemanticRelations"),
            Self::SkosCollections => write!(f, "SkosCollections"),
            Self::MappingProperties => write!(f, "MappingProperties"),
        }
    }
}

impl std::str::FromStr for PropertyCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Invalid property category: {}", s))
    }
}

/// Predicates a concept may use to point at another concept.
///
/// Semantic relations followed by mapping properties.
pub fn relation_predicates() -> impl Iterator<Item = &'static str> {
    PropertyCategory::SemanticRelations
        .predicates()
        .iter()
        .chain(PropertyCategory::MappingProperties.predicates())
        .copied()
}
