// =============================================================================
// Application Identity
// =============================================================================

/// Application name in lowercase (for identifiers and log filters)
pub const APP_NAME_LOWER: &str = "jsonapi_runtime";

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "JSONAPI_CONFIG";

/// Environment variable for server host
pub const ENV_HOST: &str = "JSONAPI_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "JSONAPI_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "JSONAPI_LOG";

/// Environment variable for the database URL
pub const ENV_DATABASE_URL: &str = "JSONAPI_DATABASE_URL";

/// Environment variable for the default page size
pub const ENV_PAGE_SIZE_DEFAULT: &str = "JSONAPI_PAGE_SIZE_DEFAULT";

/// Environment variable for the maximum page size
pub const ENV_PAGE_SIZE_MAX: &str = "JSONAPI_PAGE_SIZE_MAX";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8080;

/// Default database URL
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

/// Maximum request body size for the demo API
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;
