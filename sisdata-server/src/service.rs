//! Record service - normalizes store results into request outcomes
//!
//! Holds no state of its own beyond the injected store. Each call is a
//! single attempt; store failures are logged here and reduced to a coarse
//! [`ServiceError`] kind for the HTTP layer.

use std::sync::Arc;

use crate::record::Record;
use crate::store::{RecordStore, StoreError};

/// Outcome kinds other than success
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("record {id} not found")]
    NotFound { id: i64 },

    #[error("bad input: {reason}")]
    BadInput { reason: String },

    #[error("internal error")]
    Internal(#[source] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Clone)]
pub struct RecordService {
    store: Arc<dyn RecordStore>,
}

impl RecordService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Record>> {
        self.store.list().await.map_err(|e| internal("list", e))
    }

    pub async fn create(&self, record: Record) -> ServiceResult<i64> {
        match self.store.create(&record).await {
            Ok(id) => {
                tracing::info!(id, "record created");
                Ok(id)
            }
            Err(e @ StoreError::Conflict { .. }) => {
                tracing::warn!(error = %e, "create rejected");
                Err(ServiceError::BadInput {
                    reason: e.to_string(),
                })
            }
            Err(e) => Err(internal("create", e)),
        }
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Record> {
        self.store
            .get(id)
            .await
            .map_err(|e| internal("get", e))?
            .ok_or(ServiceError::NotFound { id })
    }

    /// Full replace; succeeds even when no record has this id.
    pub async fn update(&self, record: Record) -> ServiceResult<()> {
        self.store
            .update(&record)
            .await
            .map_err(|e| internal("update", e))
    }

    /// Succeeds even when no record has this id.
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.store.delete(id).await.map_err(|e| internal("delete", e))
    }

    pub async fn ping(&self) -> ServiceResult<()> {
        self.store.ping().await.map_err(|e| internal("ping", e))
    }
}

fn internal(operation: &'static str, e: StoreError) -> ServiceError {
    tracing::error!(operation, error = %e, "store operation failed");
    ServiceError::Internal(e)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::store::MemoryRecordStore;

    /// Store whose every operation times out
    pub(crate) struct UnavailableStore;

    fn timeout() -> StoreError {
        StoreError::Timeout {
            after: Duration::from_secs(3),
        }
    }

    #[async_trait]
    impl RecordStore for UnavailableStore {
        async fn list(&self) -> Result<Vec<Record>, StoreError> {
            Err(timeout())
        }

        async fn create(&self, _record: &Record) -> Result<i64, StoreError> {
            Err(timeout())
        }

        async fn get(&self, _id: i64) -> Result<Option<Record>, StoreError> {
            Err(timeout())
        }

        async fn update(&self, _record: &Record) -> Result<(), StoreError> {
            Err(timeout())
        }

        async fn delete(&self, _id: i64) -> Result<(), StoreError> {
            Err(timeout())
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Err(timeout())
        }
    }

    fn memory_service() -> RecordService {
        RecordService::new(Arc::new(MemoryRecordStore::new()))
    }

    #[tokio::test]
    async fn get_unknown_is_not_found() {
        let err = memory_service().get(3).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { id: 3 }));
    }

    #[tokio::test]
    async fn duplicate_create_is_bad_input() {
        let service = memory_service();
        service.create(Record::default().with_id(1)).await.unwrap();

        let err = service.create(Record::default().with_id(1)).await.unwrap_err();
        assert!(matches!(err, ServiceError::BadInput { .. }));
    }

    #[tokio::test]
    async fn store_failures_are_internal() {
        let service = RecordService::new(Arc::new(UnavailableStore));

        assert!(matches!(service.list().await, Err(ServiceError::Internal(_))));
        assert!(matches!(
            service.create(Record::default()).await,
            Err(ServiceError::Internal(StoreError::Timeout { .. }))
        ));
        assert!(matches!(service.get(1).await, Err(ServiceError::Internal(_))));
        assert!(matches!(
            service.update(Record::default()).await,
            Err(ServiceError::Internal(_))
        ));
        assert!(matches!(service.delete(1).await, Err(ServiceError::Internal(_))));
    }

    #[tokio::test]
    async fn update_and_delete_of_unknown_id_succeed() {
        let service = memory_service();

        service.update(Record::default().with_id(8)).await.unwrap();
        service.delete(8).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
    }
}
