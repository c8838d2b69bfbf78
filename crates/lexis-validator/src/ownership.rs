//! Tenant and announced-set ownership rules.
//!
//! Sets belong to the tenant named as their `dcterms:publisher`; schemes
//! and collections belong to the tenant of their `openskos:set`.

use tracing::debug;

use lexis_core::namespaces::{dcmi, dcterms, openskos, skos};
use lexis_core::{Resource, Result, Uri};

use crate::outcome::Outcome;
use crate::property::{PropertyChecker, PropertyRule};

impl PropertyChecker {
    /// Exactly one existing set, owned by the current tenant.
    pub async fn check_in_set(&self, resource: &Resource) -> Result<Outcome> {
        let outcome = self
            .check_property(
                resource,
                PropertyRule::new(openskos::SET)
                    .required()
                    .single()
                    .references(dcmi::DATASET),
            )
            .await?;
        if !outcome.is_valid() {
            return Ok(outcome);
        }
        self.set_of_current_tenant(resource).await
    }

    /// Every set `resource` names must be published by the current tenant.
    pub async fn set_of_current_tenant(&self, resource: &Resource) -> Result<Outcome> {
        let tenant_uri = self.context().require_tenant()?;
        let mut outcome = Outcome::valid();

        for set_uri in resource.uris(openskos::SET) {
            let Some(set) = self
                .fetch_owned_reference(set_uri, dcmi::DATASET, &mut outcome)
                .await?
            else {
                continue;
            };
            match set.single_uri(dcterms::PUBLISHER) {
                Some(publisher) if publisher == tenant_uri => {}
                Some(publisher) => outcome.push(format!(
                    "The resource {} attempts to access the set {}, which does not belong to the user's tenant {}, but to the tenant {}.",
                    resource.display_uri(),
                    set_uri,
                    tenant_uri,
                    publisher
                )),
                None => outcome.push(format!(
                    "The set {} referred by the resource {} has no publisher.",
                    set_uri,
                    resource.display_uri()
                )),
            }
        }
        Ok(outcome)
    }

    /// Every set `resource` names must be the set announced by the request.
    ///
    /// Passes when the request announced no set.
    pub async fn set_matches_announced(&self, resource: &Resource) -> Result<Outcome> {
        let Some(announced) = self.context().announced_set() else {
            debug!(resource_uri = resource.display_uri(), "No announced set, check skipped");
            return Ok(Outcome::valid());
        };

        Ok(resource
            .uris(openskos::SET)
            .filter(|set_uri| *set_uri != announced)
            .map(|set_uri| {
                format!(
                    "The resource {} attempts to access the set {}, which does not coincide with the set announced by request parameter {}.",
                    resource.display_uri(),
                    set_uri,
                    announced
                )
            })
            .collect())
    }

    /// Resources referenced under `predicate` must sit in a set of the
    /// current tenant.
    pub async fn refers_to_set_of_current_tenant(
        &self,
        resource: &Resource,
        predicate: &str,
        rdf_type: &str,
    ) -> Result<Outcome> {
        let mut outcome = Outcome::valid();
        for uri in resource.uris(predicate) {
            let Some(referenced) = self.fetch_owned_reference(uri, rdf_type, &mut outcome).await?
            else {
                continue;
            };
            outcome.merge(self.set_of_current_tenant(&referenced).await?);
        }
        Ok(outcome)
    }

    /// Resources referenced under `predicate` must sit in the announced set.
    pub async fn refers_to_announced_set(
        &self,
        resource: &Resource,
        predicate: &str,
        rdf_type: &str,
    ) -> Result<Outcome> {
        let mut outcome = Outcome::valid();
        for uri in resource.uris(predicate) {
            let Some(referenced) = self.fetch_owned_reference(uri, rdf_type, &mut outcome).await?
            else {
                continue;
            };
            outcome.merge(self.set_matches_announced(&referenced).await?);
        }
        Ok(outcome)
    }

    /// Membership references (schemes, collections) must exist and be
    /// reachable for the current request.
    ///
    /// Permissive mode only checks the announced set; strict mode also
    /// requires the referenced resource to belong to the current tenant.
    /// Each reference is fetched once for both comparisons.
    pub async fn check_membership(
        &self,
        resource: &Resource,
        predicate: &'static str,
        rdf_type: &'static str,
        required: bool,
    ) -> Result<Outcome> {
        let mut rule = PropertyRule::new(predicate).references(rdf_type);
        rule.required = required;

        let mut outcome = self.check_property(resource, rule).await?;
        if !outcome.is_valid() {
            return Ok(outcome);
        }

        let strict = !self.context().config().allow_concepts_for_other_tenant_schemes;
        for uri in resource.uris(predicate) {
            let Some(referenced) = self.fetch_owned_reference(uri, rdf_type, &mut outcome).await?
            else {
                continue;
            };
            outcome.merge(self.set_matches_announced(&referenced).await?);
            if strict {
                outcome.merge(self.set_of_current_tenant(&referenced).await?);
            }
        }
        Ok(outcome)
    }

    /// Fetch a reference whose owner is about to be compared.
    ///
    /// A missing reference is recorded in `outcome`, or skipped at DEBUG
    /// when reference checks are switched off.
    async fn fetch_owned_reference(
        &self,
        uri: &Uri,
        rdf_type: &str,
        outcome: &mut Outcome,
    ) -> Result<Option<Resource>> {
        match self.fetch_reference(uri, rdf_type).await? {
            Ok(referenced) => Ok(Some(referenced)),
            Err(_) if !self.context().config().check_references => {
                debug!(
                    referenced_uri = %uri,
                    rdf_type,
                    suppressed = true,
                    "Missing reference skipped in ownership check"
                );
                Ok(None)
            }
            Err(message) => {
                outcome.push(message);
                Ok(None)
            }
        }
    }

    pub async fn check_in_scheme(&self, resource: &Resource) -> Result<Outcome> {
        self.check_membership(resource, skos::IN_SCHEME, skos::CONCEPT_SCHEME, false)
            .await
    }

    pub async fn check_in_skos_collection(&self, resource: &Resource) -> Result<Outcome> {
        self.check_membership(resource, openskos::IN_SKOS_COLLECTION, skos::COLLECTION, false)
            .await
    }
}
