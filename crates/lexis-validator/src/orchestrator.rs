//! Runs the configured validator list over resources and batches.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, error, info};

use lexis_core::{
    Error, Resource, ResourceLookup, ResourceReport, Result, Tenant, Uri, ValidationFailure,
    ValidatorConfig,
};

use crate::context::{ValidationContext, ValidationMode};
use crate::outcome::Outcome;
use crate::property::PropertyChecker;
use crate::validators::{
    DuplicateRelation, InScheme, RelatedToSelf, ResourceValidator, UniqueNotation,
    UniqueNotationInTenant,
};

/// Validators every run starts with, in execution order.
pub fn default_validators() -> Vec<Arc<dyn ResourceValidator>> {
    vec![
        Arc::new(DuplicateRelation::broader()),
        Arc::new(DuplicateRelation::narrower()),
        Arc::new(DuplicateRelation::related()),
        Arc::new(InScheme),
        Arc::new(RelatedToSelf),
        Arc::new(UniqueNotation),
    ]
}

/// Validation entry point for the API and import layers.
///
/// ```rust,no_run
/// # async fn run(lookup: std::sync::Arc<dyn lexis_core::ResourceLookup>, tenant: lexis_core::Tenant, batch: Vec<lexis_core::Resource>) -> lexis_core::Result<()> {
/// use lexis_validator::{ValidationMode, Validator};
///
/// let validator = Validator::builder()
///     .lookup(lookup)
///     .tenant(tenant)
///     .mode(ValidationMode::Create)
///     .build()?;
/// validator.validate_collection(&batch).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Validator {
    checker: PropertyChecker,
    validators: Arc<[Arc<dyn ResourceValidator>]>,
    max_concurrent: usize,
}

impl Validator {
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::default()
    }

    pub fn checker(&self) -> &PropertyChecker {
        &self.checker
    }

    /// Names of the configured validators, in execution order.
    pub fn validator_names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    /// Run every validator and collect all their messages.
    pub async fn check_resource(&self, resource: &Resource) -> Result<Outcome> {
        let mut outcome = Outcome::valid();
        for validator in self.validators.iter() {
            let result = validator.validate(&self.checker, resource).await?;
            if !result.is_valid() {
                error!(
                    resource_uri = resource.display_uri(),
                    validator = validator.name(),
                    invalid_count = result.len(),
                    messages = ?result.messages(),
                    "Errors found while validating resource"
                );
            }
            outcome.merge(result);
        }
        Ok(outcome)
    }

    /// Fail with [`Error::InvalidResource`] if any validator rejects `resource`.
    pub async fn validate_resource(&self, resource: &Resource) -> Result<()> {
        let outcome = self.check_resource(resource).await?;
        if outcome.is_valid() {
            return Ok(());
        }
        Err(Error::InvalidResource(ValidationFailure {
            reports: vec![report(0, resource, outcome)],
        }))
    }

    /// Validate every resource, then fail once naming all rejected ones.
    pub async fn validate_collection(&self, resources: &[Resource]) -> Result<()> {
        let mut reports = Vec::new();
        for (index, resource) in resources.iter().enumerate() {
            let outcome = self.check_resource(resource).await?;
            if !outcome.is_valid() {
                reports.push(report(index, resource, outcome));
            }
        }
        finish_batch(resources.len(), reports)
    }

    /// [`Validator::validate_collection`] with up to
    /// `max_concurrent_validations` resources in flight.
    ///
    /// Reports keep input order.
    pub async fn validate_collection_concurrent(&self, resources: Vec<Resource>) -> Result<()> {
        let total = resources.len();
        let mut slots: Vec<Option<ResourceReport>> = vec![None; total];
        let mut pending = resources.into_iter().enumerate();
        let mut tasks = JoinSet::new();

        debug!(
            resource_count = total,
            max_concurrent = self.max_concurrent,
            "Starting concurrent batch validation"
        );

        loop {
            while tasks.len() < self.max_concurrent {
                let Some((index, resource)) = pending.next() else {
                    break;
                };
                let validator = self.clone();
                tasks.spawn(async move {
                    let outcome = validator.check_resource(&resource).await;
                    (index, resource, outcome)
                });
            }

            let Some(joined) = tasks.join_next().await else {
                break;
            };
            let (index, resource, outcome) =
                joined.map_err(|e| Error::Internal(format!("Validation task failed: {}", e)))?;
            let outcome = outcome?;
            if !outcome.is_valid() {
                slots[index] = Some(report(index, &resource, outcome));
            }
        }

        finish_batch(total, slots.into_iter().flatten().collect())
    }
}

fn report(index: usize, resource: &Resource, outcome: Outcome) -> ResourceReport {
    ResourceReport {
        index,
        uri: resource.uri_str().map(str::to_string),
        messages: outcome.into_messages(),
    }
}

fn finish_batch(total: usize, reports: Vec<ResourceReport>) -> Result<()> {
    info!(
        resource_count = total,
        invalid_count = reports.len(),
        "Batch validation completed"
    );
    if reports.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidResource(ValidationFailure { reports }))
    }
}

/// Assembles a [`Validator`]; the lookup is mandatory.
#[derive(Default)]
pub struct ValidatorBuilder {
    lookup: Option<Arc<dyn ResourceLookup>>,
    tenant: Option<Tenant>,
    mode: Option<ValidationMode>,
    announced_set: Option<Uri>,
    config: ValidatorConfig,
    extra: Vec<Arc<dyn ResourceValidator>>,
}

impl ValidatorBuilder {
    pub fn lookup(mut self, lookup: Arc<dyn ResourceLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    /// Tenant on whose behalf validation runs; its policy flags select
    /// tenant-specific validators.
    pub fn tenant(mut self, tenant: Tenant) -> Self {
        self.tenant = Some(tenant);
        self
    }

    pub fn mode(mut self, mode: ValidationMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn announced_set(mut self, set_uri: Uri) -> Self {
        self.announced_set = Some(set_uri);
        self
    }

    pub fn config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Append a validator after the defaults.
    pub fn with_validator(mut self, validator: impl ResourceValidator + 'static) -> Self {
        self.extra.push(Arc::new(validator));
        self
    }

    pub fn build(self) -> Result<Validator> {
        let lookup = self.lookup.ok_or_else(|| {
            Error::Config(
                "Validator needs a resource lookup; content validation is not possible without one"
                    .to_string(),
            )
        })?;
        self.config.validate()?;
        let max_concurrent = self.config.max_concurrent_validations;

        let mut validators = default_validators();
        let mut context = ValidationContext::new(self.config);

        if let Some(tenant) = &self.tenant {
            let tenant_uri = tenant
                .uri()
                .cloned()
                .ok_or_else(|| Error::Config("Validation tenant has no URI".to_string()))?;
            if tenant.is_notation_unique_per_tenant() {
                validators.push(Arc::new(UniqueNotationInTenant::new(tenant_uri.clone())));
            }
            context = context.with_tenant(tenant_uri);
        }
        if let Some(mode) = self.mode {
            context = context.with_mode(mode);
        }
        if let Some(set_uri) = self.announced_set {
            context = context.with_announced_set(set_uri);
        }
        validators.extend(self.extra);

        let validator = Validator {
            checker: PropertyChecker::new(lookup, context),
            validators: validators.into(),
            max_concurrent,
        };
        debug!(
            validators = ?validator.validator_names(),
            tenant_uri = validator.checker.context().tenant_uri().map(Uri::as_str),
            "Validator configured"
        );
        Ok(validator)
    }
}
