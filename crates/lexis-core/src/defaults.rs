//! Centralized default constants for lexis.
//!
//! Crates reference these instead of defining their own literals.

// =============================================================================
// RESOURCES
// =============================================================================

/// Placeholder stored when a required actor or tenant is not known.
pub const UNKNOWN: &str = "unknown";

/// Base under which tenants without a URI are minted.
pub const TENANT_URI_BASE: &str = "http://tenant";

/// First notation handed out when a tenant has no numeric notations yet.
pub const FIRST_NOTATION: u64 = 1;

// =============================================================================
// VALIDATION
// =============================================================================

/// Existence checks on referenced resources are on unless configured off.
pub const CHECK_REFERENCES: bool = true;

/// Concepts may only join schemes of their own tenant by default.
pub const ALLOW_CONCEPTS_FOR_OTHER_TENANT_SCHEMES: bool = false;

/// Upper bound on resources validated at once in batch mode.
pub const MAX_CONCURRENT_VALIDATIONS: usize = 8;

// =============================================================================
// CONFIGURATION FILES
// =============================================================================

/// Directory under the user config dir holding lexis configuration.
pub const CONFIG_DIR_NAME: &str = "lexis";

/// Validation configuration file name.
pub const CONFIG_FILE_NAME: &str = "validation.toml";
