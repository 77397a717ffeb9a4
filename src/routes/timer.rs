use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::timer::{ResetTimerResponse, TimeLeftResponse},
    error::AppError,
    services::timer_service,
    state::SharedState,
};

/// Per-team countdown endpoints. Clients poll; nothing fires on expiry.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/time_left/{team}", get(time_left))
        .route("/api/reset_timer/{team}", post(reset_timer))
}

/// Seconds left for a team; the first query starts its clock.
#[utoipa::path(
    get,
    path = "/api/time_left/{team}",
    tag = "timer",
    params(("team" = String, Path, description = "Team name")),
    responses((status = 200, description = "Seconds left", body = TimeLeftResponse))
)]
pub async fn time_left(
    State(state): State<SharedState>,
    Path(team): Path<String>,
) -> Result<Json<TimeLeftResponse>, AppError> {
    let time_left = timer_service::time_left(&state, &team).await?;
    Ok(Json(TimeLeftResponse { time_left }))
}

/// Restart a team's clock at the full duration.
#[utoipa::path(
    post,
    path = "/api/reset_timer/{team}",
    tag = "timer",
    params(("team" = String, Path, description = "Team name")),
    responses((status = 200, description = "Timer restarted", body = ResetTimerResponse))
)]
pub async fn reset_timer(
    State(state): State<SharedState>,
    Path(team): Path<String>,
) -> Result<Json<ResetTimerResponse>, AppError> {
    timer_service::reset_timer(&state, &team).await?;
    Ok(Json(ResetTimerResponse {
        status: "reset".into(),
        team,
    }))
}
