//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

/// How long a request may wait for a pooled connection, in seconds
pub const DATABASE_ACQUIRE_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// EXECUTION SERVICE DEFAULTS
// =============================================================================

/// Default base URL of the execution service
pub const DEFAULT_EXECUTION_SERVICE_URL: &str = "http://localhost:9000";

/// Default per-call timeout for execution service requests, in seconds
pub const DEFAULT_EXECUTION_TIMEOUT_SECS: u64 = 30;

/// Default number of retries for connect-level execution service failures
pub const DEFAULT_EXECUTION_MAX_RETRIES: u32 = 0;

// =============================================================================
// SUPPORTED LANGUAGES
// =============================================================================

/// Language identifiers accepted from submitters and forwarded verbatim
/// to the execution service
pub mod languages {
    pub const CPP: &str = "cpp";
    pub const JAVA: &str = "java";
    pub const PYTHON: &str = "python";

    /// All supported language identifiers
    pub const ALL: &[&str] = &[CPP, JAVA, PYTHON];
}

// =============================================================================
// USER ROLES
// =============================================================================

/// Role identifiers as stamped into gateway headers
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const PARTICIPANT: &str = "participant";
}

// =============================================================================
// IDENTITY HEADERS
// =============================================================================

/// Header carrying the authenticated user id, set by the auth gateway
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the authenticated user role, set by the auth gateway
pub const USER_ROLE_HEADER: &str = "x-user-role";

// =============================================================================
// API VERSIONING
// =============================================================================

/// Current API version
pub const API_VERSION: &str = "v1";

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Rate limiting configuration
pub mod rate_limits {
    /// Evaluation endpoints (each request fans out to the execution
    /// service) - max requests
    pub const EVALUATION_MAX_REQUESTS: i64 = 10;
    /// Evaluation endpoints - window in seconds
    pub const EVALUATION_WINDOW_SECS: i64 = 60;

    /// General API - max requests
    pub const GENERAL_MAX_REQUESTS: i64 = 100;
    /// General API - window in seconds
    pub const GENERAL_WINDOW_SECS: i64 = 60;
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for paginated results
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum page size for paginated results
pub const MAX_PAGE_SIZE: u32 = 100;

// =============================================================================
// REQUEST LIMITS
// =============================================================================

/// Maximum HTTP request body size in bytes (4 MB). Source code and custom
/// input are each capped at 1 MB before JSON escaping.
pub const MAX_REQUEST_BODY_SIZE: usize = 4 * 1024 * 1024;
