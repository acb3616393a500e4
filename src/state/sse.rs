use tokio::sync::{Mutex, broadcast};

use crate::dto::sse::ServerEvent;

/// SSE sub-state carved out from [`super::AppState`]: one hub per stream plus
/// the token coordinating the single admin connection.
pub struct SseState {
    public: SseHub,
    admin: SseHub,
    admin_token: Mutex<Option<String>>,
}

impl SseState {
    /// Build the SSE sub-tree with per-stream channel capacities.
    pub fn new(public_capacity: usize, admin_capacity: usize) -> Self {
        Self {
            public: SseHub::new(public_capacity),
            admin: SseHub::new(admin_capacity),
            admin_token: Mutex::new(None),
        }
    }

    /// Hub fanning events out to viewer windows.
    pub fn public(&self) -> &SseHub {
        &self.public
    }

    /// Hub fanning events out to the game-master window.
    pub fn admin(&self) -> &SseHub {
        &self.admin
    }

    /// Token mutex coordinating the single admin connection.
    pub fn admin_token(&self) -> &Mutex<Option<String>> {
        &self.admin_token
    }
}

/// Simple broadcast hub wrapper used by the SSE services.
pub struct SseHub {
    sender: broadcast::Sender<ServerEvent>,
}

impl SseHub {
    /// Construct a new hub backed by a Tokio broadcast channel with the given
    /// capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Register a new subscriber that will receive subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.sender.subscribe()
    }

    /// Send an event to all current subscribers, ignoring delivery errors.
    pub fn broadcast(&self, event: ServerEvent) {
        let _ = self.sender.send(event);
    }
}
