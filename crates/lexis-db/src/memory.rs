//! In-memory implementation of the resource traits.
//!
//! ```rust
//! use lexis_db::MemoryResourceRepository;
//!
//! let repo = MemoryResourceRepository::new();
//! repo.set_unavailable(true); // every call now fails with Error::Storage
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use lexis_core::namespaces::{openskos, skos};
use lexis_core::{
    Error, Literal, Resource, ResourceLookup, ResourceRepository, Result, Uri, Value,
};

/// Resources keyed by URI, kept in insertion order.
///
/// Clones share the same store.
#[derive(Clone, Default)]
pub struct MemoryResourceRepository {
    resources: Arc<RwLock<IndexMap<String, Resource>>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryResourceRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-loaded with resources.
    ///
    /// Resources without a URI are skipped; later duplicates replace
    /// earlier ones.
    pub fn with_resources(resources: impl IntoIterator<Item = Resource>) -> Self {
        let map = resources
            .into_iter()
            .filter_map(|r| Some((r.uri_str()?.to_string(), r)))
            .collect();
        Self {
            resources: Arc::new(RwLock::new(map)),
            unavailable: Arc::default(),
        }
    }

    /// Simulate a backend outage.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored resources.
    pub async fn len(&self) -> usize {
        self.resources.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.resources.read().await.is_empty()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::Storage("resource store unavailable".to_string()));
        }
        Ok(())
    }

    /// Stored resources of the same type as `resource` matching `matches`.
    async fn subjects_where(
        &self,
        resource: &Resource,
        predicate: &str,
        matches: impl Fn(&Value) -> bool,
    ) -> Result<Vec<String>> {
        self.check_available()?;
        let rdf_type = resource.primary_type().map(Uri::as_str);
        let store = self.resources.read().await;

        let uris: Vec<String> = store
            .iter()
            .filter(|(_, stored)| rdf_type.map_or(true, |t| stored.has_type(t)))
            .filter(|(_, stored)| stored.property(predicate).iter().any(&matches))
            .map(|(uri, _)| uri.clone())
            .collect();

        trace!(predicate, match_count = uris.len(), "Subject lookup");
        Ok(uris)
    }
}

#[async_trait]
impl ResourceLookup for MemoryResourceRepository {
    async fn fetch_by_uri(&self, uri: &str, expected_type: &str) -> Result<Resource> {
        self.check_available()?;
        let store = self.resources.read().await;
        match store.get(uri) {
            Some(resource) if resource.has_type(expected_type) => Ok(resource.clone()),
            Some(_) => Err(Error::NotFound(format!(
                "Resource {} is not of type {}",
                uri, expected_type
            ))),
            None => Err(Error::NotFound(format!("Resource {} not found", uri))),
        }
    }

    async fn resource_exists(&self, uri: &str, expected_type: &str) -> Result<bool> {
        self.check_available()?;
        let store = self.resources.read().await;
        Ok(store.get(uri).is_some_and(|r| r.has_type(expected_type)))
    }

    async fn fetch_subject_uris_for_uri_object(
        &self,
        resource: &Resource,
        predicate: &str,
        object: &Uri,
    ) -> Result<Vec<String>> {
        self.subjects_where(resource, predicate, |v| v.as_uri() == Some(object))
            .await
    }

    async fn fetch_subject_uris_for_literal_object(
        &self,
        resource: &Resource,
        predicate: &str,
        object: &Literal,
    ) -> Result<Vec<String>> {
        self.subjects_where(resource, predicate, |v| {
            v.as_literal().is_some_and(|l| {
                l.value == object.value && l.language() == object.language()
            })
        })
        .await
    }

    async fn fetch_by_literal(
        &self,
        rdf_type: &str,
        predicate: &str,
        value: &str,
    ) -> Result<Vec<Resource>> {
        self.check_available()?;
        let store = self.resources.read().await;
        Ok(store
            .values()
            .filter(|r| r.has_type(rdf_type))
            .filter(|r| {
                r.property(predicate)
                    .iter()
                    .any(|v| v.as_literal().is_some_and(|l| l.value == value))
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ResourceRepository for MemoryResourceRepository {
    async fn insert(&self, resource: Resource) -> Result<()> {
        self.check_available()?;
        let uri = resource
            .uri_str()
            .ok_or_else(|| Error::InvalidInput("Cannot store a resource without URI".to_string()))?
            .to_string();

        let mut store = self.resources.write().await;
        if store.contains_key(&uri) {
            return Err(Error::InvalidInput(format!("Resource {} already exists", uri)));
        }
        debug!(resource_uri = %uri, "Inserted resource");
        store.insert(uri, resource);
        Ok(())
    }

    async fn update(&self, resource: Resource) -> Result<()> {
        self.check_available()?;
        let uri = resource
            .uri_str()
            .ok_or_else(|| Error::InvalidInput("Cannot store a resource without URI".to_string()))?
            .to_string();

        let mut store = self.resources.write().await;
        match store.get_mut(&uri) {
            Some(stored) => {
                *stored = resource;
                debug!(resource_uri = %uri, "Updated resource");
                Ok(())
            }
            None => Err(Error::NotFound(format!("Resource {} not found", uri))),
        }
    }

    async fn delete(&self, uri: &str) -> Result<()> {
        self.check_available()?;
        let mut store = self.resources.write().await;
        if store.shift_remove(uri).is_none() {
            return Err(Error::NotFound(format!("Resource {} not found", uri)));
        }
        debug!(resource_uri = uri, "Deleted resource");
        Ok(())
    }

    async fn fetch_max_numeric_notation(&self, tenant_uri: &str) -> Result<Option<u64>> {
        self.check_available()?;
        let store = self.resources.read().await;
        Ok(store
            .values()
            .filter(|r| r.has_type(skos::CONCEPT))
            .filter(|r| {
                r.property(openskos::TENANT)
                    .iter()
                    .any(|t| t.lexical() == tenant_uri)
            })
            .flat_map(|r| r.property(skos::NOTATION))
            .filter_map(|n| n.lexical().trim().parse::<u64>().ok())
            .max())
    }
}
