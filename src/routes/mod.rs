use axum::Router;

use crate::state::SharedState;

pub mod admin;
pub mod directory;
pub mod docs;
pub mod game;
pub mod health;
pub mod timer;
pub mod websocket;

/// Compose all route trees, wiring in shared state and the documentation UI.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(admin::router())
        .merge(game::router())
        .merge(timer::router())
        .merge(directory::router())
        .merge(websocket::router())
        .merge(docs::router());

    api_router.with_state(state)
}
