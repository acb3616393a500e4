//! Shared session slot: the single origin-scoped key/value surface every
//! window (process) of a game reads and writes.

#[cfg(feature = "file-store")]
/// JSON file backend, shareable between processes.
pub mod file;
/// In-memory key/value backend.
pub mod memory;
/// Wire models persisted in the shared slot.
pub mod models;
/// Storage abstraction error types.
pub mod storage;

use futures::future::BoxFuture;

use crate::store::{models::SessionRecord, storage::StorageResult};

/// Fixed key the session snapshot lives under in key/value backends.
pub const SESSION_SLOT_KEY: &str = "pattern_quiz.session";

/// Abstraction over the shared session slot.
///
/// The slot is write-whole/read-whole: every save replaces the entire
/// snapshot, every load returns the entire snapshot. Backends never merge.
pub trait SessionStore: Send + Sync {
    /// Replace the stored snapshot.
    fn save_session(&self, record: SessionRecord) -> BoxFuture<'static, StorageResult<()>>;
    /// Read the stored snapshot, if any.
    fn load_session(&self) -> BoxFuture<'static, StorageResult<Option<SessionRecord>>>;
    /// Remove the stored snapshot.
    fn clear_session(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Probe whether the backend is usable.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
