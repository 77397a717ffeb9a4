use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::game::{GameStatusResponse, RemoveTeamRequest, SpinResponse, StatusResponse, TeamSummary},
    error::AppError,
    services::round_service,
    state::SharedState,
};

/// Wheel endpoints: spins, corrections and round inspection.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/spin", post(spin))
        .route("/api/reset", post(reset))
        .route("/api/remove_team", post(remove_team))
        .route("/api/teams_left", get(teams_left))
        .route("/api/teams", get(list_teams))
        .route("/game-status", get(game_status))
}

/// Draw a team, or begin a new round once every team was drawn.
#[utoipa::path(
    post,
    path = "/api/spin",
    tag = "wheel",
    responses(
        (status = 200, description = "Drawn team or round reset", body = SpinResponse),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn spin(State(state): State<SharedState>) -> Result<Json<SpinResponse>, AppError> {
    let outcome = round_service::spin(&state).await?;
    Ok(Json(outcome.into()))
}

/// Return to an unstarted first round.
#[utoipa::path(
    post,
    path = "/api/reset",
    tag = "wheel",
    responses((status = 200, description = "Round state reset", body = StatusResponse))
)]
pub async fn reset(State(state): State<SharedState>) -> Result<Json<StatusResponse>, AppError> {
    round_service::reset(&state).await?;
    Ok(Json(StatusResponse::new("reset")))
}

/// Remove a team from the current round.
#[utoipa::path(
    post,
    path = "/api/remove_team",
    tag = "wheel",
    request_body = RemoveTeamRequest,
    responses(
        (status = 200, description = "Team removed", body = StatusResponse),
        (status = 400, description = "Missing team")
    )
)]
pub async fn remove_team(
    State(state): State<SharedState>,
    Json(payload): Json<RemoveTeamRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    round_service::remove_team(&state, payload.team).await?;
    Ok(Json(StatusResponse::new("removed")))
}

/// Teams that can still be drawn this round.
#[utoipa::path(
    get,
    path = "/api/teams_left",
    tag = "wheel",
    responses((status = 200, description = "Remaining teams", body = [String]))
)]
pub async fn teams_left(State(state): State<SharedState>) -> Json<Vec<String>> {
    Json(round_service::teams_left(&state).await)
}

/// Every configured team.
#[utoipa::path(
    get,
    path = "/api/teams",
    tag = "wheel",
    responses((status = 200, description = "Configured teams", body = [TeamSummary]))
)]
pub async fn list_teams(
    State(state): State<SharedState>,
) -> Result<Json<Vec<TeamSummary>>, AppError> {
    Ok(Json(round_service::list_teams(&state).await?))
}

/// Whether the game was started, and the current round.
#[utoipa::path(
    get,
    path = "/game-status",
    tag = "wheel",
    responses((status = 200, description = "Game status", body = GameStatusResponse))
)]
pub async fn game_status(State(state): State<SharedState>) -> Json<GameStatusResponse> {
    Json(round_service::game_status(&state).await)
}
