use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState, store::SessionStore as _};

/// Probe the shared session store and report ok or degraded.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.store().health_check().await {
        Ok(()) => HealthResponse::ok(),
        Err(err) => {
            warn!(error = %err, "session store health check failed");
            HealthResponse::degraded()
        }
    }
}
