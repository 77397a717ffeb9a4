use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Seconds left on a team countdown.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TimeLeftResponse {
    pub time_left: u64,
}

/// Acknowledgement of a countdown restart.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResetTimerResponse {
    pub status: String,
    pub team: String,
}
