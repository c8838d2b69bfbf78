//! Structured logging field names shared by all lexis crates.
//!
//! `tracing` macros take field names as identifiers, so call sites spell
//! them out; every name they use must be listed here and in [`ALL_FIELDS`].
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | A validator rejected a resource |
//! | WARN  | Recoverable data issue, record skipped |
//! | INFO  | Configuration loaded, batch completed |
//! | DEBUG | Decision points (suppressed checks, chosen mode) |
//! | TRACE | Per-property iteration |

// ─── Identity fields ───────────────────────────────────────────────────────

/// URI of the resource under validation (`<new resource>` when unset).
pub const RESOURCE_URI: &str = "resource_uri";

/// URI of a resource referenced by the one under validation.
pub const REFERENCED_URI: &str = "referenced_uri";

/// Expected `rdf:type` of a referenced resource.
pub const RDF_TYPE: &str = "rdf_type";

/// Name of the resource validator producing the event.
pub const VALIDATOR: &str = "validator";

/// Names of all configured validators, in execution order.
pub const VALIDATORS: &str = "validators";

/// Tenant on whose behalf the request runs.
pub const TENANT_URI: &str = "tenant_uri";

/// Predicate being checked or looked up.
pub const PREDICATE: &str = "predicate";

/// Tenant code used for lookups.
pub const TENANT_CODE: &str = "tenant_code";

// ─── Lifecycle fields ──────────────────────────────────────────────────────

/// Concept status before an update.
pub const STATUS_FROM: &str = "status_from";

/// Concept status after an update.
pub const STATUS_TO: &str = "status_to";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Number of violation messages produced.
pub const INVALID_COUNT: &str = "invalid_count";

/// Number of resources in a batch.
pub const RESOURCE_COUNT: &str = "resource_count";

/// Number of stored subjects matching a lookup.
pub const MATCH_COUNT: &str = "match_count";

/// Concurrency bound of a batch run.
pub const MAX_CONCURRENT: &str = "max_concurrent";

/// Violation messages of a rejected resource.
pub const MESSAGES: &str = "messages";

/// Set when a check was skipped by configuration.
pub const SUPPRESSED: &str = "suppressed";

/// Every structured field name emitted by lexis.
pub const ALL_FIELDS: &[&str] = &[
    RESOURCE_URI,
    REFERENCED_URI,
    RDF_TYPE,
    VALIDATOR,
    VALIDATORS,
    TENANT_URI,
    PREDICATE,
    TENANT_CODE,
    STATUS_FROM,
    STATUS_TO,
    INVALID_COUNT,
    RESOURCE_COUNT,
    MATCH_COUNT,
    MAX_CONCURRENT,
    MESSAGES,
    SUPPRESSED,
];
