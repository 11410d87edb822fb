//! sisdata-server: HTTP API over a single table of student records
//!
//! Layers, leaf to root:
//! - [`store`]: persistence behind the [`RecordStore`] trait (PostgreSQL or ephemeral)
//! - [`service`]: outcome normalization over a store
//! - [`http`]: axum endpoints, cross-origin headers, server bootstrap

pub mod http;
pub mod record;
pub mod service;
pub mod store;

pub use record::Record;
pub use service::{RecordService, ServiceError};
pub use store::{MemoryRecordStore, PgRecordStore, RecordStore, StoreConfig, StoreError};
