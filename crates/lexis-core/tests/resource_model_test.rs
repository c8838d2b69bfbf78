/// Integration tests for the resource model as seen by API clients:
/// JSON payloads deserialize into typed wrappers, and the wrappers reject
/// resources of the wrong type.
use lexis_core::namespaces::{dcmi, dcterms, openskos, skos};
use lexis_core::{Concept, ConceptStatus, Error, PropertyCategory, Resource, Set, Tenant, Value};

const CONCEPT_JSON: &str = r#"{
    "uri": "http://example.com/concepts/1",
    "properties": {
        "http://www.w3.org/1999/02/22-rdf-syntax-ns#type": [
            {"type": "uri", "value": "http://www.w3.org/2004/02/skos/core#Concept"}
        ],
        "http://www.w3.org/2004/02/skos/core#prefLabel": [
            {"type": "literal", "value": {"value": "Tree", "language": "en"}},
            {"type": "literal", "value": {"value": "Boom", "language": "nl"}}
        ],
        "http://openskos.org/xmlns#status": [
            {"type": "literal", "value": {"value": "approved"}}
        ],
        "http://www.w3.org/2004/02/skos/core#inScheme": [
            {"type": "uri", "value": "http://example.com/schemes/nature"}
        ]
    }
}"#;

#[test]
fn test_concept_from_json_payload() {
    let concept: Concept = serde_json::from_str(CONCEPT_JSON).expect("Failed to deserialize");

    assert_eq!(concept.uri_str(), Some("http://example.com/concepts/1"));
    assert_eq!(concept.status(), Some(ConceptStatus::Approved));
    assert_eq!(concept.caption(Some("nl")).as_deref(), Some("Boom"));
    assert_eq!(
        concept.schemes().map(|u| u.as_str()).collect::<Vec<_>>(),
        vec!["http://example.com/schemes/nature"]
    );
    assert_eq!(
        concept.languages().into_iter().collect::<Vec<_>>(),
        vec!["en".to_string(), "nl".to_string()]
    );
}

#[test]
fn test_concept_json_roundtrip_keeps_property_order() {
    let concept: Concept = serde_json::from_str(CONCEPT_JSON).unwrap();
    let json = serde_json::to_string(&concept).unwrap();
    let back: Resource = serde_json::from_str(&json).unwrap();

    let predicates: Vec<&str> = back.properties().map(|(p, _)| p).collect();
    assert_eq!(predicates[1], skos::PREF_LABEL);
    assert_eq!(predicates[3], skos::IN_SCHEME);
}

#[test]
fn test_wrong_type_rejected_by_wrappers() {
    let resource: Resource = serde_json::from_str(CONCEPT_JSON).unwrap();

    let err = Set::try_from(resource.clone()).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(err.to_string().contains(dcmi::DATASET));

    assert!(Tenant::try_from(resource).is_err());
}

#[test]
fn test_invalid_uri_rejected_on_deserialize() {
    let json = r#"{"uri": "not a uri", "properties": {}}"#;
    assert!(serde_json::from_str::<Resource>(json).is_err());
}

#[test]
fn test_category_membership_of_concept_properties() {
    let concept: Concept = serde_json::from_str(CONCEPT_JSON).unwrap();
    let categories: Vec<PropertyCategory> = concept
        .properties()
        .filter_map(|(p, _)| PropertyCategory::of(p))
        .collect();

    assert_eq!(
        categories,
        vec![PropertyCategory::LexicalLabels, PropertyCategory::ConceptSchemes]
    );
}

#[test]
fn test_set_wrapper_over_built_resource() {
    let mut resource = Resource::typed(None, dcmi::DATASET);
    resource
        .add_property(openskos::CODE, Value::literal("nature"))
        .add_property(dcterms::TITLE, Value::lang_literal("Nature", "en"));

    let set = Set::try_from(resource).unwrap();
    assert_eq!(set.code(), Some("nature"));
    assert_eq!(set.title(None), Some("Nature"));
    assert_eq!(set.display_uri(), "<new resource>");
}
