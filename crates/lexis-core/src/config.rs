//! Validation configuration.
//!
//! Loaded from, in order of preference:
//! - a TOML file (default: ~/.config/lexis/validation.toml)
//! - environment variables (`LEXIS_*` prefixed)
//!
//! ```toml
//! [validation]
//! check_references = true
//! allow_concepts_for_other_tenant_schemes = false
//! max_concurrent_validations = 8
//!
//! [validation.import]
//! skip_concept_references = true
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::defaults;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        crate::error::Error::Config(e.to_string())
    }
}

/// Relaxations applied only while bulk-importing existing vocabularies.
///
/// Imported concepts routinely point at concepts that arrive later in the
/// same import, so their existence cannot be checked yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRelaxations {
    /// Skip existence checks on references to `skos:Concept` resources.
    #[serde(default)]
    pub skip_concept_references: bool,
}

/// Switches consulted by the property and ownership checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Verify that referenced resources exist with the expected type.
    #[serde(default = "ValidatorConfig::default_check_references")]
    pub check_references: bool,
    /// Let concepts join schemes owned by another tenant; only the
    /// announced-set check applies then.
    #[serde(default)]
    pub allow_concepts_for_other_tenant_schemes: bool,
    #[serde(default)]
    pub import: ImportRelaxations,
    /// Bound on resources validated concurrently in batch mode.
    #[serde(default = "ValidatorConfig::default_max_concurrent")]
    pub max_concurrent_validations: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            check_references: defaults::CHECK_REFERENCES,
            allow_concepts_for_other_tenant_schemes:
                defaults::ALLOW_CONCEPTS_FOR_OTHER_TENANT_SCHEMES,
            import: ImportRelaxations::default(),
            max_concurrent_validations: defaults::MAX_CONCURRENT_VALIDATIONS,
        }
    }
}

impl ValidatorConfig {
    fn default_check_references() -> bool {
        defaults::CHECK_REFERENCES
    }

    fn default_max_concurrent() -> usize {
        defaults::MAX_CONCURRENT_VALIDATIONS
    }

    /// Configuration for bulk imports: concept references are not checked.
    pub fn for_import() -> Self {
        Self {
            import: ImportRelaxations {
                skip_concept_references: true,
            },
            ..Self::default()
        }
    }

    /// Get the default config file path.
    ///
    /// Returns: ~/.config/lexis/validation.toml
    pub fn default_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        path.push(defaults::CONFIG_DIR_NAME);
        path.push(defaults::CONFIG_FILE_NAME);
        path
    }

    /// Load from the default path, falling back to environment variables.
    pub fn load() -> ConfigResult<Self> {
        let path = Self::default_config_path();

        if path.exists() {
            info!("Loading validation config from: {}", path.display());
            Self::from_file(&path)
        } else {
            debug!(
                "Config file not found at {}, using environment variables",
                path.display()
            );
            let config = Self::from_env();
            config.validate()?;
            Ok(config)
        }
    }

    /// Load configuration from a TOML file with a `[validation]` table.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration text, substituting `${VAR}` placeholders first.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let content = Self::substitute_env_vars(content);

        #[derive(Deserialize)]
        struct TomlRoot {
            #[serde(default)]
            validation: Option<ValidatorConfig>,
        }

        let root: TomlRoot = toml::from_str(&content)?;
        let config = root.validation.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let flag = |name: &str, default: bool| {
            env::var(name)
                .ok()
                .and_then(|s| parse_bool(&s))
                .unwrap_or(default)
        };

        Self {
            check_references: flag("LEXIS_CHECK_REFERENCES", defaults::CHECK_REFERENCES),
            allow_concepts_for_other_tenant_schemes: flag(
                "LEXIS_ALLOW_FOREIGN_SCHEMES",
                defaults::ALLOW_CONCEPTS_FOR_OTHER_TENANT_SCHEMES,
            ),
            import: ImportRelaxations {
                skip_concept_references: flag("LEXIS_SKIP_CONCEPT_REFERENCES", false),
            },
            max_concurrent_validations: env::var("LEXIS_MAX_CONCURRENT_VALIDATIONS")
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults::MAX_CONCURRENT_VALIDATIONS),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_concurrent_validations == 0 {
            return Err(ConfigError::Validation(
                "max_concurrent_validations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Substitute environment variables in the format ${VAR_NAME}.
    fn substitute_env_vars(content: &str) -> String {
        let Ok(re) = regex::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") else {
            return content.to_string();
        };
        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
