/// Session state and its transitions.
pub mod session;
mod sse;
/// Transition wrapper persisting and broadcasting every change.
pub mod transitions;

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock, watch};
use uuid::Uuid;

use crate::{catalog::ExampleCatalog, config::AppConfig, store::SessionStore};

pub use self::session::{GameSession, SessionPhase};
pub use self::sse::SseHub;
use self::sse::SseState;

/// Cheaply clonable handle to the application state.
pub type SharedState = Arc<AppState>;

/// Central application state for one window (process) of the game.
///
/// Holds the local session copy, the shared store handle, the SSE hubs, and
/// the in-process change notifier the hydration listener subscribes to.
pub struct AppState {
    instance_id: Uuid,
    config: AppConfig,
    catalog: ExampleCatalog,
    session: RwLock<GameSession>,
    store: Arc<dyn SessionStore>,
    sse: SseState,
    sync_notify: watch::Sender<u64>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned
    /// cheaply. Every instance gets a fresh id; the sync layer uses it to
    /// recognize (and skip) its own writes in the shared store.
    pub fn new(
        config: AppConfig,
        catalog: ExampleCatalog,
        store: Arc<dyn SessionStore>,
    ) -> SharedState {
        let (sync_tx, _rx) = watch::channel(0);
        Arc::new(Self {
            instance_id: Uuid::new_v4(),
            config,
            catalog,
            session: RwLock::new(GameSession::new()),
            store,
            sse: SseState::new(16, 16),
            sync_notify: sync_tx,
        })
    }

    /// Identifier of this instance, stamped on every snapshot it writes.
    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The example catalogue.
    pub fn catalog(&self) -> &ExampleCatalog {
        &self.catalog
    }

    /// The local session state.
    pub fn session(&self) -> &RwLock<GameSession> {
        &self.session
    }

    /// Run a closure against a read-locked view of the session.
    pub async fn read_session<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&GameSession) -> T,
    {
        let guard = self.session.read().await;
        f(&guard)
    }

    /// Snapshot the current observable phase.
    pub async fn phase(&self) -> SessionPhase {
        self.session.read().await.phase()
    }

    /// Handle to the shared session store.
    pub fn store(&self) -> Arc<dyn SessionStore> {
        Arc::clone(&self.store)
    }

    /// Broadcast hub used for the public (viewer) SSE stream.
    pub fn public_sse(&self) -> &SseHub {
        self.sse.public()
    }

    /// Broadcast hub used for the admin (game master) SSE stream.
    pub fn admin_sse(&self) -> &SseHub {
        self.sse.admin()
    }

    /// Token guard that ensures a single admin SSE subscriber at a time.
    pub fn admin_token(&self) -> &Mutex<Option<String>> {
        self.sse.admin_token()
    }

    /// Subscribe to in-process store-change notifications. The carried value
    /// is the revision of the last write.
    pub fn subscribe_sync(&self) -> watch::Receiver<u64> {
        self.sync_notify.subscribe()
    }

    /// Notify in-process observers that the shared store changed.
    pub(crate) fn notify_sync(&self, revision: u64) {
        let _ = self.sync_notify.send(revision);
    }
}
