//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit size and lifetime limits.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Connections are recycled after this long so the pool refreshes periodically.
const DEFAULT_MAX_LIFETIME: Duration = Duration::from_secs(3 * 60);

/// Pool sizing and lifetime limits
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Upper bound on open (and therefore idle) connections
    pub max_connections: u32,

    /// Maximum age of a pooled connection
    pub max_lifetime: Duration,

    /// How long an idle connection is kept before being closed
    pub idle_timeout: Duration,

    /// How long to wait for a free connection before failing
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            max_lifetime: DEFAULT_MAX_LIFETIME,
            idle_timeout: DEFAULT_MAX_LIFETIME,
            acquire_timeout: Duration::from_secs(3),
        }
    }
}

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if the initial connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/sisdata", &PoolConfig::default()).await?;
/// ```
pub async fn create_pool(database_url: &str, config: &PoolConfig) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(
        max_connections = config.max_connections,
        max_lifetime = ?config.max_lifetime,
        "creating connection pool"
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .max_lifetime(config.max_lifetime)
        .idle_timeout(config.idle_timeout)
        .acquire_timeout(config.acquire_timeout)
        .connect(database_url)
        .await
}
