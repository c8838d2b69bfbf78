//! Per-run validation context.

use lexis_core::{Error, Result, Uri, ValidatorConfig};

/// Whether the resource is being created or updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Create,
    Update,
}

/// Request-scoped inputs shared by every check of one validation run.
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    tenant_uri: Option<Uri>,
    announced_set: Option<Uri>,
    mode: Option<ValidationMode>,
    config: ValidatorConfig,
}

impl ValidationContext {
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Tenant on whose behalf the request runs.
    pub fn with_tenant(mut self, tenant_uri: Uri) -> Self {
        self.tenant_uri = Some(tenant_uri);
        self
    }

    /// Set the request declares it operates on.
    pub fn with_announced_set(mut self, set_uri: Uri) -> Self {
        self.announced_set = Some(set_uri);
        self
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn tenant_uri(&self) -> Option<&Uri> {
        self.tenant_uri.as_ref()
    }

    pub fn announced_set(&self) -> Option<&Uri> {
        self.announced_set.as_ref()
    }

    pub fn mode(&self) -> Option<ValidationMode> {
        self.mode
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Tenant URI, or a configuration error when ownership cannot be checked.
    pub fn require_tenant(&self) -> Result<&Uri> {
        self.tenant_uri.as_ref().ok_or_else(|| {
            Error::Config("Cannot check resource ownership without a current tenant".to_string())
        })
    }

    /// Mode, or a configuration error when uniqueness cannot be decided.
    pub fn require_mode(&self) -> Result<ValidationMode> {
        self.mode.ok_or_else(|| {
            Error::Config(
                "Cannot check uniqueness without knowing whether the resource is created or updated"
                    .to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_fails_on_missing_context() {
        let context = ValidationContext::default();
        assert!(matches!(context.require_tenant(), Err(Error::Config(_))));
        assert!(matches!(context.require_mode(), Err(Error::Config(_))));
    }

    #[test]
    fn test_builder_methods() {
        let tenant = Uri::parse("http://example.com/tenants/a").unwrap();
        let context = ValidationContext::new(ValidatorConfig::for_import())
            .with_tenant(tenant.clone())
            .with_mode(ValidationMode::Update);
        assert_eq!(context.require_tenant().unwrap(), &tenant);
        assert_eq!(context.require_mode().unwrap(), ValidationMode::Update);
        assert!(context.announced_set().is_none());
        assert!(context.config().import.skip_concept_references);
    }
}
