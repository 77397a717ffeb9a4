//! Collaborative word ordering inside team rooms.

use tracing::{debug, info};
use uuid::Uuid;

use crate::{services::push_events, state::SharedState};

/// Add `client` to the room of `team` and replay the latest order to it alone.
pub fn join_room(state: &SharedState, team: &str, client: Uuid) {
    state.gateway().join(team, client);

    let order = state.orders().get(team).filter(|order| !order.is_empty());
    let status = state.gateway().room_status(team, order.is_some());
    info!(team = %team, client = %client, ?status, "client joined team room");

    if let Some(order) = order {
        push_events::replay_order(state, client, team, order);
    }
}

/// Store the order of `team` and forward it to the rest of the room.
pub fn update_order(state: &SharedState, team: &str, client: Uuid, order: Vec<String>) {
    state.orders().set(team, order.clone());
    debug!(team = %team, client = %client, ?order, "word order updated");
    push_events::broadcast_order_updated(state, team, order, client);
}

/// Mirror the sentence of `team` to every connected client. Nothing is stored.
pub fn update_sentence(state: &SharedState, team: &str, words: Vec<String>) {
    debug!(team = %team, words = words.len(), "sentence synced");
    push_events::broadcast_sentence(state, team, words);
}

/// Tell every connected client to clear the order of `team`. The stored
/// order is kept, so later joiners still receive it.
pub fn reset_sentence(state: &SharedState, team: &str) {
    info!(team = %team, "sentence reset");
    push_events::broadcast_sentence_reset(state, team);
}
