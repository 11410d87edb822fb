//! Record store - persistence for student records
//!
//! # Design Principles
//!
//! - One auto-committed statement per operation, no multi-step transactions
//! - Rely on the primary key for uniqueness, no check-then-insert
//! - Update and delete of unknown ids are no-ops, not errors
//! - SQL quoting stays inside the backend that needs it

pub mod memory;
pub mod pool;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;

use crate::record::Record;

pub use memory::MemoryRecordStore;
pub use pool::{create_pool, PoolConfig};
pub use postgres::{PgRecordStore, StoreConfig};

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store operation timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("record {id} already exists")]
    Conflict { id: i64 },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence operations over the record table.
///
/// Implementations are shared across request tasks, so they must be
/// `Send + Sync` and hold no per-request state.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All rows. Order is backend defined and must not be relied upon.
    async fn list(&self) -> Result<Vec<Record>, StoreError>;

    /// Insert a row with the caller-supplied id, returning the stored id.
    async fn create(&self, record: &Record) -> Result<i64, StoreError>;

    /// Fetch one row; `None` when no row has this id.
    async fn get(&self, id: i64) -> Result<Option<Record>, StoreError>;

    /// Replace every non-id field of the row with `record.id`.
    async fn update(&self, record: &Record) -> Result<(), StoreError>;

    /// Remove the row with this id.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;

    /// Cheap liveness probe for health checks.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
