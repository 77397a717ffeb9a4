use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::game::StartGameResponse, error::AppError, services::round_service, state::SharedState,
};

/// Admin endpoints driving the game.
pub fn router() -> Router<SharedState> {
    Router::new().route("/admin/start", post(start_game))
}

/// Start the game with every active team in the pool.
#[utoipa::path(
    post,
    path = "/admin/start",
    tag = "admin",
    responses(
        (status = 200, description = "Game started", body = StartGameResponse),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn start_game(
    State(state): State<SharedState>,
) -> Result<Json<StartGameResponse>, AppError> {
    round_service::start_game(&state).await?;
    Ok(Json(StartGameResponse { success: true }))
}
