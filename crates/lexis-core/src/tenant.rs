//! Tenants: organisations owning sets of vocabularies.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::namespaces::{dcterms, openskos, org, vcard};
use crate::rdf::{resource_wrapper, Literal, Resource, Uri, Value};
use crate::traits::ResourceLookup;

/// A resource typed `org:FormalOrganization`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Resource", into = "Resource")]
pub struct Tenant(Resource);

resource_wrapper!(Tenant, org::FORMAL_ORGANIZATION);

/// Lenient flag reading: trimmed `true` or `1`.
fn to_bool(value: Option<&Value>) -> bool {
    value.is_some_and(|v| matches!(v.lexical().trim(), "true" | "1"))
}

impl Tenant {
    pub fn new(uri: Option<Uri>) -> Self {
        Self(Resource::typed(uri, org::FORMAL_ORGANIZATION))
    }

    fn text(&self, predicate: &str) -> Option<&str> {
        self.0.single_value(predicate).map(Value::lexical)
    }

    pub fn code(&self) -> Option<&str> {
        self.text(openskos::CODE)
    }

    pub fn name(&self) -> Option<&str> {
        self.text(openskos::NAME)
    }

    pub fn organisation_unit(&self) -> Option<&str> {
        self.text(vcard::ORG_UNIT)
    }

    pub fn email(&self) -> Option<&str> {
        self.text(vcard::EMAIL)
    }

    pub fn street_address(&self) -> Option<&str> {
        self.text(vcard::ADR)
    }

    pub fn locality(&self) -> Option<&str> {
        self.text(vcard::LOCALITY)
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.text(vcard::PCODE)
    }

    pub fn country_name(&self) -> Option<&str> {
        self.text(vcard::COUNTRY)
    }

    pub fn website(&self) -> Option<&str> {
        self.text(openskos::WEBPAGE)
    }

    /// Notation must be unique per tenant rather than per scheme.
    pub fn is_notation_unique_per_tenant(&self) -> bool {
        to_bool(self.0.single_value(openskos::NOTATION_UNIQUE_PER_TENANT))
    }

    /// Notations are generated when a concept is created without one.
    pub fn is_notation_auto_generated(&self) -> bool {
        to_bool(self.0.single_value(openskos::NOTATION_AUTO_GENERATED))
    }

    pub fn is_enable_skos_xl(&self) -> bool {
        to_bool(self.0.single_value(openskos::ENABLE_SKOS_XL))
    }

    pub fn is_enable_statuses_system(&self) -> bool {
        to_bool(self.0.single_value(openskos::ENABLE_STATUSES_SYSTEM))
    }

    /// Tenants publish under their own URI.
    pub fn publisher_uri(&self) -> Option<&Uri> {
        self.0.uri()
    }

    /// Assign URI, uuid and submission date when missing.
    pub fn ensure_metadata(&mut self, base_uri: &str) -> Result<()> {
        self.ensure_metadata_at(base_uri, Utc::now())
    }

    /// [`Tenant::ensure_metadata`] with an explicit clock.
    pub fn ensure_metadata_at(&mut self, base_uri: &str, now: DateTime<Utc>) -> Result<()> {
        let uuid = match self.text(openskos::UUID) {
            Some(existing) => existing.to_string(),
            None => {
                let uuid = Uuid::new_v4().to_string();
                self.0.set_property(openskos::UUID, Literal::new(uuid.clone()));
                uuid
            }
        };

        if self.0.uri().is_none() {
            let uri = Uri::parse(format!("{}/{}", base_uri.trim_end_matches('/'), uuid))?;
            debug!(tenant_uri = %uri, "Assigned tenant URI");
            self.0.set_uri(uri);
        }

        if !self.0.has_property(dcterms::DATE_SUBMITTED) {
            self.0
                .set_property(dcterms::DATE_SUBMITTED, Literal::datetime(now));
        }
        Ok(())
    }

    /// Snapshot of the editable tenant fields.
    pub fn profile(&self) -> TenantProfile {
        let own = |s: Option<&str>| s.map(str::to_string);
        TenantProfile {
            code: own(self.code()),
            name: own(self.name()),
            organisation_unit: own(self.organisation_unit()),
            website: own(self.website()),
            email: own(self.email()),
            street_address: own(self.street_address()),
            locality: own(self.locality()),
            postal_code: own(self.postal_code()),
            country_name: own(self.country_name()),
            enable_statuses_system: Some(self.is_enable_statuses_system()),
            enable_skos_xl: Some(self.is_enable_skos_xl()),
        }
    }

    /// Overwrite the fields present in `profile`.
    pub fn apply_profile(&mut self, profile: &TenantProfile) -> &mut Self {
        let texts = [
            (openskos::CODE, &profile.code),
            (openskos::NAME, &profile.name),
            (vcard::ORG_UNIT, &profile.organisation_unit),
            (vcard::EMAIL, &profile.email),
            (openskos::WEBPAGE, &profile.website),
            (vcard::ADR, &profile.street_address),
            (vcard::LOCALITY, &profile.locality),
            (vcard::PCODE, &profile.postal_code),
            (vcard::COUNTRY, &profile.country_name),
        ];
        for (predicate, value) in texts {
            if let Some(value) = value {
                self.0.set_property(predicate, Literal::new(value.as_str()));
            }
        }

        let flags = [
            (openskos::ENABLE_STATUSES_SYSTEM, profile.enable_statuses_system),
            (openskos::ENABLE_SKOS_XL, profile.enable_skos_xl),
        ];
        for (predicate, flag) in flags {
            if let Some(flag) = flag {
                self.0.set_property(predicate, Literal::boolean(flag));
            }
        }
        self
    }
}

/// Editable tenant fields as exchanged with admin forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organisation_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_statuses_system: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_skos_xl: Option<bool>,
}

/// Resolve a tenant code to `name → URI` for every tenant using it.
///
/// Tenants without a name are keyed by their code. Backend failures
/// propagate unchanged.
pub async fn code_to_uri(lookup: &dyn ResourceLookup, code: &str) -> Result<BTreeMap<String, String>> {
    if code.trim().is_empty() {
        return Err(Error::InvalidInput("Tenant code cannot be empty".to_string()));
    }

    let tenants = lookup
        .fetch_by_literal(org::FORMAL_ORGANIZATION, openskos::CODE, code)
        .await?;

    let mut items = BTreeMap::new();
    for resource in tenants {
        let Some(uri) = resource.uri_str().map(str::to_string) else {
            warn!(tenant_code = code, "Stored tenant without URI skipped");
            continue;
        };
        let name = resource
            .single_value(openskos::NAME)
            .map(Value::lexical)
            .unwrap_or(code)
            .to_string();
        items.insert(name, uri);
    }
    Ok(items)
}
