//! Ephemeral record store
//!
//! Keeps records in process memory. Nothing survives a restart; used for
//! tests and for running the API without a database.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{RecordStore, StoreError};
use crate::record::Record;

#[derive(Default)]
pub struct MemoryRecordStore {
    records: RwLock<BTreeMap<i64, Record>>,
}

impl MemoryRecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store, replacing any record with the same id.
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        let records = records.into_iter().map(|r| (r.id, r)).collect();
        Self {
            records: RwLock::new(records),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn list(&self) -> Result<Vec<Record>, StoreError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn create(&self, record: &Record) -> Result<i64, StoreError> {
        match self.records.write().await.entry(record.id) {
            Entry::Occupied(_) => Err(StoreError::Conflict { id: record.id }),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(record.id)
            }
        }
    }

    async fn get(&self, id: i64) -> Result<Option<Record>, StoreError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn update(&self, record: &Record) -> Result<(), StoreError> {
        if let Some(existing) = self.records.write().await.get_mut(&record.id) {
            *existing = record.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.records.write().await.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, name: &str) -> Record {
        Record {
            id,
            first_name: name.into(),
            last_name: "Li".into(),
            student_number: format!("S{id}"),
            group: "A".into(),
            branch: "CS".into(),
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_equal_record() {
        let store = MemoryRecordStore::new();
        let ana = record(1, "Ana");

        assert_eq!(store.create(&ana).await.unwrap(), 1);
        assert_eq!(store.get(1).await.unwrap(), Some(ana));
    }

    #[tokio::test]
    async fn duplicate_id_is_conflict() {
        let store = MemoryRecordStore::new();
        store.create(&record(1, "Ana")).await.unwrap();

        let err = store.create(&record(1, "Bo")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { id: 1 }));
        assert_eq!(store.get(1).await.unwrap().unwrap().first_name, "Ana");
    }

    #[tokio::test]
    async fn delete_then_get_is_none_whether_or_not_present() {
        let store = MemoryRecordStore::with_records([record(1, "Ana")]);

        store.delete(1).await.unwrap();
        store.delete(99).await.unwrap();
        assert!(store.get(1).await.unwrap().is_none());
        assert!(store.get(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_of_unknown_id_creates_nothing() {
        let store = MemoryRecordStore::new();

        store.update(&record(5, "Ghost")).await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn update_replaces_all_fields() {
        let store = MemoryRecordStore::with_records([record(1, "Ana")]);
        let changed = Record {
            id: 1,
            ..Record::default()
        };

        store.update(&changed).await.unwrap();
        assert_eq!(store.get(1).await.unwrap(), Some(changed));
    }

    #[tokio::test]
    async fn list_returns_every_created_record() {
        let store = MemoryRecordStore::new();
        for id in [3, 1, 2] {
            store.create(&record(id, "N")).await.unwrap();
        }

        assert_eq!(store.list().await.unwrap().len(), 3);
        assert_eq!(store.len().await, 3);
    }
}
