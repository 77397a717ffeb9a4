use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use validator::Validate;

use crate::{
    dto::directory::{
        RegisterRequest, RegisterResponse, RoleQuery, RoleResponse, TeamQuestionResponse,
    },
    error::AppError,
    services::directory_service,
    state::SharedState,
};

/// Participant directory and team question endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/register", post(register))
        .route("/api/role", get(get_role))
        .route("/api/team_question/{team}", get(team_question))
}

/// Register a participant into a team, optionally contributing a question.
#[utoipa::path(
    post,
    path = "/api/register",
    tag = "directory",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Participant registered", body = RegisterResponse),
        (status = 400, description = "Missing team, team role, role, or name")
    )
)]
pub async fn register(
    State(state): State<SharedState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    payload.validate()?;
    Ok(Json(directory_service::register(&state, payload).await?))
}

/// Look up the game role of a participant.
#[utoipa::path(
    get,
    path = "/api/role",
    tag = "directory",
    params(RoleQuery),
    responses((status = 200, description = "Participant role", body = RoleResponse))
)]
pub async fn get_role(
    State(state): State<SharedState>,
    Query(query): Query<RoleQuery>,
) -> Result<Json<RoleResponse>, AppError> {
    let role = directory_service::lookup_role(&state, query).await?;
    Ok(Json(RoleResponse { role }))
}

/// Question of a team split into words; opening it starts the team clock.
#[utoipa::path(
    get,
    path = "/api/team_question/{team}",
    tag = "directory",
    params(("team" = String, Path, description = "Team name")),
    responses(
        (status = 200, description = "Team question", body = TeamQuestionResponse),
        (status = 404, description = "No question configured for the team")
    )
)]
pub async fn team_question(
    State(state): State<SharedState>,
    Path(team): Path<String>,
) -> Result<Json<TeamQuestionResponse>, AppError> {
    Ok(Json(directory_service::team_question(&state, &team).await?))
}
