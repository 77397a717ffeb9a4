use axum::extract::ws::Message;
use tracing::warn;
use uuid::Uuid;

use crate::{
    dto::ws::ServerMessage,
    state::{SharedState, round::SpinOutcome},
};

/// Replay the stored order of `team` to a client that just joined its room.
pub fn replay_order(state: &SharedState, client: Uuid, team: &str, order: Vec<String>) {
    let payload = ServerMessage::OrderUpdated {
        team: team.to_string(),
        order,
    };
    if let Some(frame) = encode(&payload) {
        state.gateway().send_to(client, frame);
    }
}

/// Send a new order to everyone in the room of `team` but its author.
pub fn broadcast_order_updated(state: &SharedState, team: &str, order: Vec<String>, author: Uuid) {
    let payload = ServerMessage::OrderUpdated {
        team: team.to_string(),
        order,
    };
    if let Some(frame) = encode(&payload) {
        state.gateway().broadcast_room(team, &frame, Some(author));
    }
}

/// Send the sentence of `team` to every connected client.
pub fn broadcast_sentence(state: &SharedState, team: &str, words: Vec<String>) {
    send_to_all(
        state,
        &ServerMessage::SyncSentence {
            team: team.to_string(),
            words,
        },
    );
}

/// Tell every connected client that the order of `team` was cleared.
pub fn broadcast_sentence_reset(state: &SharedState, team: &str) {
    send_to_all(
        state,
        &ServerMessage::OrderUpdated {
            team: team.to_string(),
            order: Vec::new(),
        },
    );
}

/// Announce a spin result or a round reset to every connected client.
pub fn broadcast_spin_outcome(state: &SharedState, outcome: SpinOutcome) {
    let payload = match outcome {
        SpinOutcome::Selected { team } => ServerMessage::SpinResult { team },
        SpinOutcome::RoundReset { round } => ServerMessage::RoundReset { round },
    };
    send_to_all(state, &payload);
}

fn send_to_all(state: &SharedState, payload: &ServerMessage) {
    if let Some(frame) = encode(payload) {
        state.gateway().broadcast_all(&frame);
    }
}

fn encode(payload: &ServerMessage) -> Option<Message> {
    match serde_json::to_string(payload) {
        Ok(text) => Some(Message::Text(text.into())),
        Err(err) => {
            warn!(error = %err, ?payload, "failed to serialize push event");
            None
        }
    }
}
