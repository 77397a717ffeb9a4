use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Word Wheel Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::admin::start_game,
        crate::routes::game::spin,
        crate::routes::game::reset,
        crate::routes::game::remove_team,
        crate::routes::game::teams_left,
        crate::routes::game::list_teams,
        crate::routes::game::game_status,
        crate::routes::timer::time_left,
        crate::routes::timer::reset_timer,
        crate::routes::directory::register,
        crate::routes::directory::get_role,
        crate::routes::directory::team_question,
        crate::routes::websocket::ws_handler,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::game::StartGameResponse,
            crate::dto::game::SpinResponse,
            crate::dto::game::StatusResponse,
            crate::dto::game::RemoveTeamRequest,
            crate::dto::game::GameStatusResponse,
            crate::dto::game::TeamSummary,
            crate::dto::timer::TimeLeftResponse,
            crate::dto::timer::ResetTimerResponse,
            crate::dto::directory::RegisterRequest,
            crate::dto::directory::RegisterResponse,
            crate::dto::directory::RoleResponse,
            crate::dto::directory::UserRole,
            crate::dto::directory::TeamQuestionResponse,
            crate::dto::ws::ClientMessage,
            crate::dto::ws::ServerMessage,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "admin", description = "Game start"),
        (name = "wheel", description = "Team draws without replacement"),
        (name = "timer", description = "Per-team countdowns"),
        (name = "directory", description = "Participants and team questions"),
        (name = "push", description = "WebSocket push channel"),
    )
)]
pub struct ApiDoc;
