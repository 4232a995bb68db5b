// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable holding the database connection URL
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";

// =============================================================================
// Pagination Defaults
// =============================================================================

/// Default items per page for paginated queries
pub const DEFAULT_PAGE_SIZE: u32 = 10;
