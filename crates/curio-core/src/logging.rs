//! Structured logging field name constants for curio.
//!
//! All crates use these constants for consistent structured logging fields
//! so log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-entry iteration, high-volume data (result rows) |

/// Correlation ID propagated across a request. Format: UUIDv7.
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event: "api", "db", "search".
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem: "pool", "items", "activation_results".
pub const COMPONENT: &str = "component";

/// Logical operation name: "insert", "list_versions", "assemble".
pub const OPERATION: &str = "op";

/// Stable item identity (shared across versions).
pub const ITEM_UUID: &str = "item_uuid";

/// Item version number.
pub const ITEM_VERSION: &str = "item_version";

/// Institution (tenant) external identifier.
pub const INSTITUTION_ID: &str = "institution_id";

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a listing or query.
pub const RESULT_COUNT: &str = "result_count";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
