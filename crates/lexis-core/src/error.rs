//! Error types for lexis.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using lexis's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for lexis operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Resource not found (or stored under a different type)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage backend unavailable or failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Wiring defect: a validator or loader is missing required context
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input (malformed URI, unknown status, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// One or more resources were rejected by validation
    #[error("Invalid resource(s) found: {0}")]
    InvalidResource(ValidationFailure),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Unexpected failure inside lexis itself (e.g. a panicked task)
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl Error {
    /// True for errors raised because a looked-up resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

/// Messages collected for a single rejected resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceReport {
    /// Position of the resource in the validated input.
    pub index: usize,
    /// URI of the resource, `None` for resources not yet persisted.
    pub uri: Option<String>,
    /// Every violation reported by every validator, in validator order.
    pub messages: Vec<String>,
}

/// Terminal validation failure carrying every rejected resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub reports: Vec<ResourceReport>,
}

impl ValidationFailure {
    /// Number of rejected resources.
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Report for the resource at input position `index`, if it was rejected.
    pub fn report_at(&self, index: usize) -> Option<&ResourceReport> {
        self.reports.iter().find(|r| r.index == index)
    }

    /// Report for the resource with the given URI, if it was rejected.
    pub fn report_for(&self, uri: &str) -> Option<&ResourceReport> {
        self.reports
            .iter()
            .find(|r| r.uri.as_deref() == Some(uri))
    }

    /// All messages of all reports, flattened in order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.reports
            .iter()
            .flat_map(|r| r.messages.iter().map(String::as_str))
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self
            .reports
            .iter()
            .map(|r| match r.uri.as_deref() {
                Some(uri) => uri.to_string(),
                None => format!("<new resource #{}>", r.index),
            })
            .collect();
        write!(f, "{} rejected ({})", self.reports.len(), names.join(", "))
    }
}
