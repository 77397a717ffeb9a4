use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    dto::ws::ClientMessage,
    error::ServiceError,
    services::{order_service, push_events, round_service, session_service},
    state::SharedState,
};

/// Internal error type for push-channel handling.
///
/// The push channel has no response path, so these are only logged.
#[derive(Debug, Error)]
enum PushError {
    /// Frame is not a JSON event envelope.
    #[error("unparsable frame: {0}")]
    Unparsable(#[from] serde_json::Error),
    /// Event lacks a required, non-empty field.
    #[error("`{event}` event is missing `{field}`")]
    Malformed {
        event: &'static str,
        field: &'static str,
    },
    /// Event name is not one we handle.
    #[error("unknown event")]
    UnknownEvent,
    /// Error from persistence or state management operations.
    #[error("service error: {0}")]
    Service(#[from] ServiceError),
}

/// Handle the full lifecycle for an individual browser WebSocket connection.
pub async fn handle_socket(state: SharedState, socket: WebSocket) {
    let (mut sender, mut receiver) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Message>();

    // Dedicated writer task keeps outbound messages flowing even while we await inbound frames.
    let writer_task = tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            if sender.send(message).await.is_err() {
                break;
            }
        }
    });

    let client = session_service::connect(&state, outbound_tx.clone());

    while let Some(message) = receiver.next().await {
        match message {
            Ok(Message::Text(text)) => {
                handle_text(&state, client, text.as_str()).await;
            }
            Ok(Message::Ping(payload)) => {
                let _ = outbound_tx.send(Message::Pong(payload));
            }
            Ok(Message::Close(frame)) => {
                info!(client = %client, "client closed");
                let _ = outbound_tx.send(Message::Close(frame));
                break;
            }
            Ok(Message::Binary(_)) => {}
            Ok(Message::Pong(_)) => {}
            Err(err) => {
                warn!(client = %client, error = %err, "websocket error");
                break;
            }
        }
    }

    session_service::disconnect(&state, client).await;
    finalize(writer_task, outbound_tx).await;
}

/// Parse and dispatch one text frame received from `client`.
///
/// Malformed frames are dropped; nothing is sent back.
pub async fn handle_text(state: &SharedState, client: Uuid, text: &str) {
    let result = match ClientMessage::from_json_str(text) {
        Ok(message) => dispatch(state, client, message).await,
        Err(err) => Err(PushError::from(err)),
    };

    match result {
        Ok(()) => {}
        Err(PushError::Service(err)) => {
            warn!(client = %client, error = %err, "push event failed");
        }
        Err(err) => {
            debug!(client = %client, error = %err, payload = %text, "dropping push event");
        }
    }
}

async fn dispatch(state: &SharedState, client: Uuid, message: ClientMessage) -> Result<(), PushError> {
    match message {
        ClientMessage::JoinTeam { team } => {
            let team = required(team, "join_team", "team")?;
            order_service::join_room(state, &team, client);
        }
        ClientMessage::UpdateOrder { team, order } => {
            let team = required(team, "update_order", "team")?;
            let order = order
                .filter(|order| !order.is_empty())
                .ok_or(PushError::Malformed {
                    event: "update_order",
                    field: "order",
                })?;
            order_service::update_order(state, &team, client, order);
        }
        ClientMessage::UpdateSentence { team, words } => {
            let team = required(team, "update_sentence", "team")?;
            order_service::update_sentence(state, &team, words.unwrap_or_default());
        }
        ClientMessage::ResetSentence { team } => {
            let team = required(team, "reset_sentence", "team")?;
            order_service::reset_sentence(state, &team);
        }
        ClientMessage::StartSpin => {
            let outcome = round_service::spin(state).await?;
            push_events::broadcast_spin_outcome(state, outcome);
        }
        ClientMessage::Unknown => return Err(PushError::UnknownEvent),
    }
    Ok(())
}

fn required(value: Option<String>, event: &'static str, field: &'static str) -> Result<String, PushError> {
    value
        .filter(|value| !value.is_empty())
        .ok_or(PushError::Malformed { event, field })
}

/// Ensure the writer task winds down before we return from the socket handler.
async fn finalize(writer_task: JoinHandle<()>, outbound_tx: mpsc::UnboundedSender<Message>) {
    drop(outbound_tx);
    let _ = writer_task.await;
}
