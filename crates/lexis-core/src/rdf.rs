//! In-memory RDF resource model.
//!
//! A [`Resource`] is a URI (absent until persisted) plus an ordered,
//! multi-valued property map from predicate IRI to [`Value`]s. Values are
//! either URI references or literals with an optional language tag and
//! datatype.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use oxiri::Iri;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::namespaces::{rdf, xsd};

// =============================================================================
// URI
// =============================================================================

/// A syntactically valid absolute URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Uri(String);

impl Uri {
    /// Parse and validate an absolute URI.
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if let Err(e) = Iri::parse(value.as_str()) {
            return Err(Error::InvalidInput(format!("Invalid URI <{}>: {}", value, e)));
        }
        Ok(Self(value))
    }

    /// Wrap a string known to be a valid absolute URI (vocabulary terms).
    ///
    /// No validation is done; prefer [`Uri::parse`] for external input.
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Uri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Uri {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for Uri {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<Uri> for String {
    fn from(uri: Uri) -> Self {
        uri.0
    }
}

impl PartialEq<str> for Uri {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Uri {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// =============================================================================
// LITERAL / VALUE
// =============================================================================

/// A literal with optional language tag and datatype.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
}

impl Literal {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: None,
            datatype: None,
        }
    }

    pub fn with_language(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: Some(language.into()),
            datatype: None,
        }
    }

    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: None,
            datatype: Some(datatype.into()),
        }
    }

    /// `xsd:dateTime` literal in RFC 3339 form.
    pub fn datetime(at: DateTime<Utc>) -> Self {
        Self::typed(at.to_rfc3339_opts(SecondsFormat::Secs, true), xsd::DATETIME)
    }

    /// Boolean stored as the literal string `"true"` or `"false"`.
    pub fn boolean(flag: bool) -> Self {
        Self::new(if flag { "true" } else { "false" })
    }

    /// Language tag, treating an empty tag as absent.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref().filter(|l| !l.is_empty())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// An RDF object: URI reference or literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Uri(Uri),
    Literal(Literal),
}

impl Value {
    /// URI value from an already-validated [`Uri`].
    pub fn uri(uri: Uri) -> Self {
        Self::Uri(uri)
    }

    /// Plain literal value.
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(Literal::new(value))
    }

    /// Language-tagged literal value.
    pub fn lang_literal(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self::Literal(Literal::with_language(value, language))
    }

    pub fn as_uri(&self) -> Option<&Uri> {
        match self {
            Self::Uri(uri) => Some(uri),
            Self::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Uri(_) => None,
            Self::Literal(literal) => Some(literal),
        }
    }

    /// The URI string or the literal content.
    pub fn lexical(&self) -> &str {
        match self {
            Self::Uri(uri) => uri.as_str(),
            Self::Literal(literal) => &literal.value,
        }
    }

    pub fn language(&self) -> Option<&str> {
        self.as_literal().and_then(Literal::language)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.lexical())
    }
}

impl From<Uri> for Value {
    fn from(uri: Uri) -> Self {
        Self::Uri(uri)
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

// =============================================================================
// RESOURCE
// =============================================================================

/// An RDF resource: optional URI plus predicate → ordered values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    uri: Option<Uri>,
    #[serde(default)]
    properties: IndexMap<String, Vec<Value>>,
}

impl Resource {
    pub fn new(uri: Option<Uri>) -> Self {
        Self {
            uri,
            properties: IndexMap::new(),
        }
    }

    /// Resource with a URI and a single `rdf:type`.
    pub fn typed(uri: Option<Uri>, rdf_type: &str) -> Self {
        let mut resource = Self::new(uri);
        resource.set_property(rdf::TYPE, Value::Uri(Uri::new_unchecked(rdf_type)));
        resource
    }

    pub fn uri(&self) -> Option<&Uri> {
        self.uri.as_ref()
    }

    pub fn uri_str(&self) -> Option<&str> {
        self.uri.as_ref().map(Uri::as_str)
    }

    pub fn set_uri(&mut self, uri: Uri) {
        self.uri = Some(uri);
    }

    /// All `rdf:type` URIs.
    pub fn types(&self) -> impl Iterator<Item = &Uri> {
        self.property(rdf::TYPE).iter().filter_map(Value::as_uri)
    }

    /// First `rdf:type`, used when naming the resource in messages.
    pub fn primary_type(&self) -> Option<&Uri> {
        self.types().next()
    }

    pub fn has_type(&self, rdf_type: &str) -> bool {
        self.types().any(|t| t == rdf_type)
    }

    /// Values for a predicate, empty when the property is absent.
    pub fn property(&self, predicate: &str) -> &[Value] {
        self.properties
            .get(predicate)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_property(&self, predicate: &str) -> bool {
        !self.property(predicate).is_empty()
    }

    pub fn is_property_empty(&self, predicate: &str) -> bool {
        self.property(predicate)
            .iter()
            .all(|v| v.lexical().trim().is_empty())
    }

    /// First value for a predicate.
    pub fn single_value(&self, predicate: &str) -> Option<&Value> {
        self.property(predicate).first()
    }

    /// First URI value for a predicate.
    pub fn single_uri(&self, predicate: &str) -> Option<&Uri> {
        self.property(predicate).iter().find_map(Value::as_uri)
    }

    /// URI values for a predicate, skipping literals.
    pub fn uris(&self, predicate: &str) -> impl Iterator<Item = &Uri> {
        self.property(predicate).iter().filter_map(Value::as_uri)
    }

    /// Append a value.
    pub fn add_property(&mut self, predicate: &str, value: impl Into<Value>) -> &mut Self {
        self.properties
            .entry(predicate.to_string())
            .or_default()
            .push(value.into());
        self
    }

    /// Append a value unless an equal value is already present.
    pub fn add_unique_property(&mut self, predicate: &str, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        let values = self.properties.entry(predicate.to_string()).or_default();
        if !values.contains(&value) {
            values.push(value);
        }
        self
    }

    /// Replace all values of a predicate with a single value.
    pub fn set_property(&mut self, predicate: &str, value: impl Into<Value>) -> &mut Self {
        self.properties
            .insert(predicate.to_string(), vec![value.into()]);
        self
    }

    /// Replace all values of a predicate.
    pub fn set_properties(&mut self, predicate: &str, values: Vec<Value>) -> &mut Self {
        if values.is_empty() {
            self.unset_property(predicate);
        } else {
            self.properties.insert(predicate.to_string(), values);
        }
        self
    }

    pub fn unset_property(&mut self, predicate: &str) -> &mut Self {
        self.properties.shift_remove(predicate);
        self
    }

    /// Iterate predicates and their values in insertion order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Distinct language tags used by any literal of this resource.
    pub fn languages(&self) -> BTreeSet<String> {
        self.properties
            .values()
            .flatten()
            .filter_map(Value::language)
            .map(str::to_string)
            .collect()
    }

    /// Literals of a predicate in the given language (`None` = untagged).
    pub fn property_in_language(&self, predicate: &str, language: Option<&str>) -> Vec<&Literal> {
        self.property(predicate)
            .iter()
            .filter_map(Value::as_literal)
            .filter(|l| l.language() == language)
            .collect()
    }

    pub fn has_property_in_language(&self, predicate: &str, language: Option<&str>) -> bool {
        !self.property_in_language(predicate, language).is_empty()
    }

    /// Values joined with ", ", optionally restricted to a language.
    pub fn property_flat_value(&self, predicate: &str, language: Option<&str>) -> Option<String> {
        let values: Vec<&str> = match language {
            Some(lang) => self
                .property_in_language(predicate, Some(lang))
                .into_iter()
                .map(|l| l.value.as_str())
                .collect(),
            None => self.property(predicate).iter().map(Value::lexical).collect(),
        };
        if values.is_empty() {
            None
        } else {
            Some(values.join(", "))
        }
    }

    /// Human-readable identity for messages.
    pub fn display_uri(&self) -> &str {
        self.uri_str().unwrap_or("<new resource>")
    }
}

// =============================================================================
// TYPED WRAPPERS
// =============================================================================

/// Implements `Deref`/`DerefMut` to [`Resource`], a type-checked
/// `TryFrom<Resource>` and `From<Wrapper> for Resource` for a newtype
/// wrapper around a resource of one `rdf:type`.
macro_rules! resource_wrapper {
    ($wrapper:ident, $rdf_type:expr) => {
        impl $wrapper {
            /// The `rdf:type` of this kind of resource.
            pub const TYPE: &'static str = $rdf_type;

            pub fn resource(&self) -> &$crate::rdf::Resource {
                &self.0
            }

            pub fn into_resource(self) -> $crate::rdf::Resource {
                self.0
            }
        }

        impl std::ops::Deref for $wrapper {
            type Target = $crate::rdf::Resource;

            fn deref(&self) -> &$crate::rdf::Resource {
                &self.0
            }
        }

        impl std::ops::DerefMut for $wrapper {
            fn deref_mut(&mut self) -> &mut $crate::rdf::Resource {
                &mut self.0
            }
        }

        impl TryFrom<$crate::rdf::Resource> for $wrapper {
            type Error = $crate::error::Error;

            fn try_from(resource: $crate::rdf::Resource) -> $crate::error::Result<Self> {
                if resource.has_type($rdf_type) {
                    Ok(Self(resource))
                } else {
                    Err($crate::error::Error::InvalidInput(format!(
                        "Resource {} is not a {}",
                        resource.display_uri(),
                        $rdf_type
                    )))
                }
            }
        }

        impl From<$wrapper> for $crate::rdf::Resource {
            fn from(wrapper: $wrapper) -> Self {
                wrapper.0
            }
        }
    };
}

pub(crate) use resource_wrapper;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::skos;

    fn uri(s: &str) -> Uri {
        Uri::parse(s).unwrap()
    }

    #[test]
    fn test_uri_parse_accepts_absolute() {
        let u = uri("http://example.com/concept/1");
        assert_eq!(u.as_str(), "http://example.com/concept/1");
        assert_eq!(u.to_string(), "http://example.com/concept/1");
    }

    #[test]
    fn test_uri_parse_rejects_relative_and_garbage() {
        assert!(Uri::parse("concept/1").is_err());
        assert!(Uri::parse("").is_err());
        assert!(Uri::parse("http://exa mple.com").is_err());
    }

    #[test]
    fn test_uri_serde_validates() {
        let ok: Uri = serde_json::from_str("\"http://example.com/a\"").unwrap();
        assert_eq!(ok, "http://example.com/a");
        assert!(serde_json::from_str::<Uri>("\"not a uri\"").is_err());
    }

    #[test]
    fn test_literal_language_ignores_empty_tag() {
        let lit = Literal::with_language("Boom", "");
        assert_eq!(lit.language(), None);
        let lit = Literal::with_language("Boom", "nl");
        assert_eq!(lit.language(), Some("nl"));
    }

    #[test]
    fn test_literal_boolean_and_datetime() {
        assert_eq!(Literal::boolean(true).value, "true");
        assert_eq!(Literal::boolean(false).value, "false");
        let at = DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        let lit = Literal::datetime(at);
        assert_eq!(lit.value, "2024-01-02T03:04:05Z");
        assert_eq!(lit.datatype.as_deref(), Some(xsd::DATETIME));
    }

    #[test]
    fn test_value_accessors() {
        let v = Value::uri(uri("http://example.com/a"));
        assert!(v.as_uri().is_some());
        assert!(v.as_literal().is_none());
        assert_eq!(v.lexical(), "http://example.com/a");

        let v = Value::lang_literal("tree", "en");
        assert_eq!(v.language(), Some("en"));
        assert_eq!(v.to_string(), "tree");
    }

    #[test]
    fn test_resource_typed_and_types() {
        let r = Resource::typed(Some(uri("http://example.com/c")), skos::CONCEPT);
        assert!(r.has_type(skos::CONCEPT));
        assert!(!r.has_type(skos::CONCEPT_SCHEME));
        assert_eq!(r.primary_type().unwrap(), skos::CONCEPT);
    }

    #[test]
    fn test_resource_property_order_preserved() {
        let mut r = Resource::new(None);
        r.add_property(skos::ALT_LABEL, Value::literal("b"))
            .add_property(skos::ALT_LABEL, Value::literal("a"))
            .add_property(skos::ALT_LABEL, Value::literal("c"));
        let values: Vec<_> = r.property(skos::ALT_LABEL).iter().map(Value::lexical).collect();
        assert_eq!(values, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_resource_set_and_unset() {
        let mut r = Resource::new(None);
        r.add_property(skos::NOTATION, Value::literal("1"));
        r.add_property(skos::NOTATION, Value::literal("2"));
        r.set_property(skos::NOTATION, Value::literal("3"));
        assert_eq!(r.property(skos::NOTATION).len(), 1);
        r.unset_property(skos::NOTATION);
        assert!(!r.has_property(skos::NOTATION));
        assert!(r.property(skos::NOTATION).is_empty());
    }

    #[test]
    fn test_add_unique_property_skips_duplicates() {
        let mut r = Resource::new(None);
        let v = Value::uri(uri("http://example.com/user"));
        r.add_unique_property(skos::NOTE, v.clone());
        r.add_unique_property(skos::NOTE, v);
        assert_eq!(r.property(skos::NOTE).len(), 1);
    }

    #[test]
    fn test_languages_and_property_in_language() {
        let mut r = Resource::new(None);
        r.add_property(skos::PREF_LABEL, Value::lang_literal("tree", "en"));
        r.add_property(skos::PREF_LABEL, Value::lang_literal("boom", "nl"));
        r.add_property(skos::ALT_LABEL, Value::lang_literal("arbre", "fr"));
        r.add_property(skos::ALT_LABEL, Value::literal("untagged"));

        let langs: Vec<_> = r.languages().into_iter().collect();
        assert_eq!(langs, vec!["en", "fr", "nl"]);

        let nl = r.property_in_language(skos::PREF_LABEL, Some("nl"));
        assert_eq!(nl.len(), 1);
        assert_eq!(nl[0].value, "boom");
        assert_eq!(r.property_in_language(skos::ALT_LABEL, None).len(), 1);
    }

    #[test]
    fn test_property_flat_value() {
        let mut r = Resource::new(None);
        r.add_property(skos::PREF_LABEL, Value::lang_literal("tree", "en"));
        r.add_property(skos::PREF_LABEL, Value::lang_literal("boom", "nl"));
        assert_eq!(
            r.property_flat_value(skos::PREF_LABEL, None).unwrap(),
            "tree, boom"
        );
        assert_eq!(
            r.property_flat_value(skos::PREF_LABEL, Some("nl")).unwrap(),
            "boom"
        );
        assert!(r.property_flat_value(skos::PREF_LABEL, Some("de")).is_none());
    }

    #[test]
    fn test_is_property_empty() {
        let mut r = Resource::new(None);
        assert!(r.is_property_empty(skos::BROADER));
        r.add_property(skos::NOTE, Value::literal("  "));
        assert!(r.is_property_empty(skos::NOTE));
        r.add_property(skos::NOTE, Value::literal("text"));
        assert!(!r.is_property_empty(skos::NOTE));
    }

    #[test]
    fn test_resource_json_shape() {
        let mut r = Resource::typed(Some(uri("http://example.com/c")), skos::CONCEPT);
        r.add_property(skos::PREF_LABEL, Value::lang_literal("tree", "en"));
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["uri"], "http://example.com/c");
        assert_eq!(json["properties"][skos::PREF_LABEL][0]["type"], "literal");
        assert_eq!(
            json["properties"][skos::PREF_LABEL][0]["value"]["language"],
            "en"
        );
        let back: Resource = serde_json::from_value(json).unwrap();
        assert_eq!(back, r);
    }
}
