use std::sync::Arc;

use dashmap::DashMap;
use futures::future::BoxFuture;

use crate::store::{
    SESSION_SLOT_KEY, SessionStore,
    models::SessionRecord,
    storage::{StorageError, StorageResult},
};

/// In-memory key/value store.
///
/// Clones share the same underlying map, so two application states built from
/// clones of one `MemoryStore` observe each other's writes — the in-process
/// equivalent of two windows sharing one browser storage area. Snapshots are
/// kept serialized so the backend exercises the same encode/decode path as the
/// file backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<DashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn save_session(&self, record: SessionRecord) -> BoxFuture<'static, StorageResult<()>> {
        let entries = Arc::clone(&self.entries);
        Box::pin(async move {
            let payload = serde_json::to_string(&record).map_err(|err| {
                StorageError::unavailable("failed to encode session snapshot".into(), err)
            })?;
            entries.insert(SESSION_SLOT_KEY.to_string(), payload);
            Ok(())
        })
    }

    fn load_session(&self) -> BoxFuture<'static, StorageResult<Option<SessionRecord>>> {
        let entries = Arc::clone(&self.entries);
        Box::pin(async move {
            let Some(payload) = entries.get(SESSION_SLOT_KEY).map(|entry| entry.value().clone())
            else {
                return Ok(None);
            };
            let record = serde_json::from_str(&payload).map_err(|err| {
                StorageError::corrupted("failed to decode session snapshot".into(), err)
            })?;
            Ok(Some(record))
        })
    }

    fn clear_session(&self) -> BoxFuture<'static, StorageResult<()>> {
        let entries = Arc::clone(&self.entries);
        Box::pin(async move {
            entries.remove(SESSION_SLOT_KEY);
            Ok(())
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_load_clear_cycle() {
        let store = MemoryStore::new();
        assert!(store.load_session().await.unwrap().is_none());

        let record = SessionRecord {
            round_number: Some(3),
            ..SessionRecord::default()
        };
        store.save_session(record.clone()).await.unwrap();
        assert_eq!(store.load_session().await.unwrap(), Some(record));

        store.clear_session().await.unwrap();
        assert!(store.load_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clones_share_the_slot() {
        let store = MemoryStore::new();
        let other = store.clone();

        store
            .save_session(SessionRecord {
                round_number: Some(7),
                ..SessionRecord::default()
            })
            .await
            .unwrap();

        let seen = other.load_session().await.unwrap().unwrap();
        assert_eq!(seen.round_number, Some(7));
    }

    #[tokio::test]
    async fn corrupted_payload_reports_corruption() {
        let store = MemoryStore::new();
        store
            .entries
            .insert(SESSION_SLOT_KEY.to_string(), "{not valid".to_string());

        match store.load_session().await {
            Err(StorageError::Corrupted { .. }) => {}
            other => panic!("expected corrupted error, got {other:?}"),
        }
    }
}
