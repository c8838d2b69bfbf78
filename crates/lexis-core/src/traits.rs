//! Core traits for lexis storage abstractions.
//!
//! Validators only ever read through [`ResourceLookup`]; writers use
//! [`ResourceRepository`]. Both are implemented by the triple-store client
//! outside this workspace and by `lexis-db`'s in-memory repository.

use async_trait::async_trait;

use crate::error::Result;
use crate::rdf::{Literal, Resource, Uri};

/// Read access to stored resources.
#[async_trait]
pub trait ResourceLookup: Send + Sync {
    /// Fetch a resource by URI.
    ///
    /// Fails with `Error::NotFound` when the resource is absent or is not
    /// of `expected_type`.
    async fn fetch_by_uri(&self, uri: &str, expected_type: &str) -> Result<Resource>;

    /// Whether a resource with this URI and type is stored.
    async fn resource_exists(&self, uri: &str, expected_type: &str) -> Result<bool>;

    /// URIs of stored resources of the same type as `resource` that carry
    /// `predicate` with the URI object `object`.
    async fn fetch_subject_uris_for_uri_object(
        &self,
        resource: &Resource,
        predicate: &str,
        object: &Uri,
    ) -> Result<Vec<String>>;

    /// URIs of stored resources of the same type as `resource` that carry
    /// `predicate` with a literal equal to `object` (content and language).
    async fn fetch_subject_uris_for_literal_object(
        &self,
        resource: &Resource,
        predicate: &str,
        object: &Literal,
    ) -> Result<Vec<String>>;

    /// Stored resources of `rdf_type` carrying `predicate` with the literal
    /// content `value`, regardless of language.
    async fn fetch_by_literal(
        &self,
        rdf_type: &str,
        predicate: &str,
        value: &str,
    ) -> Result<Vec<Resource>>;
}

/// Write access to stored resources.
#[async_trait]
pub trait ResourceRepository: ResourceLookup {
    /// Insert a new resource. Fails when the URI is already taken.
    async fn insert(&self, resource: Resource) -> Result<()>;

    /// Replace a stored resource. Fails with `Error::NotFound` when absent.
    async fn update(&self, resource: Resource) -> Result<()>;

    /// Delete a stored resource.
    async fn delete(&self, uri: &str) -> Result<()>;

    /// Highest purely numeric `skos:notation` among concepts of a tenant.
    async fn fetch_max_numeric_notation(&self, tenant_uri: &str) -> Result<Option<u64>>;
}
