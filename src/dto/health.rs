use serde::Serialize;
use utoipa::ToSchema;

/// Health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
    /// Browsers currently connected to the push channel.
    pub connected_clients: usize,
}

impl HealthResponse {
    /// The storage backend answered its health check.
    pub fn ok(connected_clients: usize) -> Self {
        Self {
            status: "ok".to_string(),
            connected_clients,
        }
    }

    /// The storage backend is unreachable; writes will fail.
    pub fn degraded(connected_clients: usize) -> Self {
        Self {
            status: "degraded".to_string(),
            connected_clients,
        }
    }
}
