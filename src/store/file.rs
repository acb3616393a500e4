use std::{io::ErrorKind, path::PathBuf};

use futures::future::BoxFuture;

use crate::store::{
    SessionStore,
    models::SessionRecord,
    storage::{StorageError, StorageResult},
};

/// JSON file backend for the shared session slot.
///
/// Two processes pointed at the same path behave like two browser windows
/// sharing one storage area: the writer replaces the file wholesale, readers
/// pick the change up on their next poll. Writes go through a temporary file
/// and a rename so a concurrent reader never observes a half-written snapshot.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store persisting to the given path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl SessionStore for FileStore {
    fn save_session(&self, record: SessionRecord) -> BoxFuture<'static, StorageResult<()>> {
        let path = self.path.clone();
        let tmp = self.tmp_path();
        Box::pin(async move {
            let payload = serde_json::to_vec(&record).map_err(|err| {
                StorageError::unavailable("failed to encode session snapshot".into(), err)
            })?;

            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                tokio::fs::create_dir_all(parent).await.map_err(|err| {
                    StorageError::unavailable(
                        format!("failed to create store directory `{}`", parent.display()),
                        err,
                    )
                })?;
            }

            tokio::fs::write(&tmp, payload).await.map_err(|err| {
                StorageError::unavailable(
                    format!("failed to write session file `{}`", tmp.display()),
                    err,
                )
            })?;
            tokio::fs::rename(&tmp, &path).await.map_err(|err| {
                StorageError::unavailable(
                    format!("failed to replace session file `{}`", path.display()),
                    err,
                )
            })
        })
    }

    fn load_session(&self) -> BoxFuture<'static, StorageResult<Option<SessionRecord>>> {
        let path = self.path.clone();
        Box::pin(async move {
            let contents = match tokio::fs::read_to_string(&path).await {
                Ok(contents) => contents,
                Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
                Err(err) => {
                    return Err(StorageError::unavailable(
                        format!("failed to read session file `{}`", path.display()),
                        err,
                    ));
                }
            };

            let record = serde_json::from_str(&contents).map_err(|err| {
                StorageError::corrupted(
                    format!("failed to decode session file `{}`", path.display()),
                    err,
                )
            })?;
            Ok(Some(record))
        })
    }

    fn clear_session(&self) -> BoxFuture<'static, StorageResult<()>> {
        let path = self.path.clone();
        Box::pin(async move {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
                Err(err) => Err(StorageError::unavailable(
                    format!("failed to remove session file `{}`", path.display()),
                    err,
                )),
            }
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let path = self.path.clone();
        Box::pin(async move {
            match tokio::fs::metadata(&path).await {
                Ok(_) => Ok(()),
                // A missing file is healthy; the slot just has not been
                // written yet.
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
                Err(err) => Err(StorageError::unavailable(
                    format!("failed to stat session file `{}`", path.display()),
                    err,
                )),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> FileStore {
        let mut path = std::env::temp_dir();
        path.push(format!("pattern-quiz-test-{name}-{}", std::process::id()));
        path.push("session.json");
        FileStore::new(path)
    }

    #[tokio::test]
    async fn save_load_clear_cycle() {
        let store = temp_store("cycle");
        let _ = store.clear_session().await;

        assert!(store.load_session().await.unwrap().is_none());

        let record = SessionRecord {
            round_number: Some(5),
            ..SessionRecord::default()
        };
        store.save_session(record.clone()).await.unwrap();
        assert_eq!(store.load_session().await.unwrap(), Some(record));

        store.clear_session().await.unwrap();
        assert!(store.load_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupted_file_reports_corruption() {
        let store = temp_store("corrupt");
        tokio::fs::create_dir_all(store.path.parent().unwrap())
            .await
            .unwrap();
        tokio::fs::write(&store.path, b"{broken").await.unwrap();

        match store.load_session().await {
            Err(StorageError::Corrupted { .. }) => {}
            other => panic!("expected corrupted error, got {other:?}"),
        }

        store.clear_session().await.unwrap();
    }
}
