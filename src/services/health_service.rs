use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Probe the storage backend and report the number of connected browsers.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let connected = state.gateway().connected_count();
    match state.store().health_check().await {
        Ok(()) => HealthResponse::ok(connected),
        Err(err) => {
            warn!(error = %err, "storage health check failed");
            HealthResponse::degraded(connected)
        }
    }
}
