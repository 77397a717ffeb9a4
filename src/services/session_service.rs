//! Connection lifecycle: once the last browser leaves, the game starts over.

use axum::extract::ws::Message;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::ServiceError,
    services::{round_service, timer_service},
    state::SharedState,
};

/// Register a connection on the gateway.
pub fn connect(state: &SharedState, tx: mpsc::UnboundedSender<Message>) -> Uuid {
    let (id, connected) = state.gateway().connect(tx);
    info!(client = %id, connected, "client connected");
    id
}

/// Drop a connection; the last one out resets the session.
pub async fn disconnect(state: &SharedState, client: Uuid) {
    let connected = state.gateway().disconnect(client);
    info!(client = %client, connected, "client disconnected");

    if connected == 0 {
        match reset_session(state).await {
            Ok(()) => info!("all clients disconnected; game state reset"),
            Err(err) => warn!(error = %err, "failed to reset game state after last disconnect"),
        }
    }
}

/// Fresh game: unstarted first round, no clocks, no word orders.
///
/// Word orders are only dropped once the persisted state was reset.
pub async fn reset_session(state: &SharedState) -> Result<(), ServiceError> {
    round_service::reset(state).await?;
    timer_service::clear_timers(state).await?;
    state.orders().clear();
    Ok(())
}
