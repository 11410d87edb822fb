//! HTTP server command for the sisdata record API
//!
//! Builds the store (PostgreSQL, or in-memory with `--ephemeral`) and runs
//! the server until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use sisdata_server::http::{run_server, ServerConfig};
use sisdata_server::store::{create_pool, PoolConfig};
use sisdata_server::{MemoryRecordStore, PgRecordStore, StoreConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "SISDATA_BIND", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// Path prefix for the record endpoints
    #[arg(long, env = "SISDATA_BASE_PATH", default_value = "/api")]
    pub base_path: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Table holding the records (created if missing)
    #[arg(long, env = "SISDATA_TABLE", default_value = "sisdata")]
    pub table: String,

    /// Maximum open connections in the pool
    #[arg(long, env = "SISDATA_MAX_CONNECTIONS", default_value_t = 10)]
    pub max_connections: u32,

    /// Seconds before a pooled connection is recycled
    #[arg(long, env = "SISDATA_CONN_MAX_LIFETIME_SECS", default_value_t = 180)]
    pub conn_max_lifetime_secs: u64,

    /// Deadline in seconds for each store operation
    #[arg(long, env = "SISDATA_STORE_DEADLINE_SECS", default_value_t = 3)]
    pub store_deadline_secs: u64,

    /// Keep records in memory instead of PostgreSQL (lost on exit)
    #[arg(long)]
    pub ephemeral: bool,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            base_path: self.base_path.clone(),
        }
    }

    fn pool_config(&self) -> PoolConfig {
        let lifetime = Duration::from_secs(self.conn_max_lifetime_secs);
        PoolConfig {
            max_connections: self.max_connections,
            max_lifetime: lifetime,
            idle_timeout: lifetime,
            acquire_timeout: Duration::from_secs(self.store_deadline_secs),
        }
    }

    fn store_config(&self) -> StoreConfig {
        StoreConfig {
            table: self.table.clone(),
            deadline: Duration::from_secs(self.store_deadline_secs),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.server_config();

    if args.ephemeral {
        tracing::warn!("Using ephemeral in-memory store - records are lost on exit");
        run_server(Arc::new(MemoryRecordStore::new()), config)
            .await
            .context("Server error")?;
        return Ok(());
    }

    let database_url = args
        .database_url
        .as_deref()
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env or .env, or pass --ephemeral")?;

    let pool = create_pool(database_url, &args.pool_config())
        .await
        .context("Failed to create database pool")?;

    let store = PgRecordStore::new(pool.clone(), &args.store_config());
    store
        .ensure_schema()
        .await
        .with_context(|| format!("Failed to prepare table '{}'", args.table))?;

    tracing::info!(table = %args.table, "Starting sisdata server on {}", args.bind);

    // Run server (blocks until shutdown)
    run_server(Arc::new(store), config)
        .await
        .context("Server error")?;

    pool.close().await;
    Ok(())
}
