use std::{
    collections::HashSet,
    sync::atomic::{AtomicUsize, Ordering},
};

use axum::extract::ws::Message;
use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

/// Handle used to push frames to one connected browser.
#[derive(Clone, Debug)]
pub struct ClientConnection {
    pub id: Uuid,
    pub tx: mpsc::UnboundedSender<Message>,
}

/// Lifecycle of a team room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    /// No word order recorded.
    Empty,
    /// An order is recorded and nobody is connected to the room.
    Idle,
    /// An order is recorded and at least one client is connected.
    Active,
}

/// Connected clients, their team rooms and the global connection count.
///
/// Delivery is fire-and-forget: a client whose writer is gone is simply
/// skipped and resynchronises on its next join.
#[derive(Debug, Default)]
pub struct SessionGateway {
    clients: DashMap<Uuid, ClientConnection>,
    rooms: DashMap<String, HashSet<Uuid>>,
    connected: AtomicUsize,
}

impl SessionGateway {
    /// Register a new connection. Returns its id and the connected count.
    pub fn connect(&self, tx: mpsc::UnboundedSender<Message>) -> (Uuid, usize) {
        let id = Uuid::new_v4();
        self.clients.insert(id, ClientConnection { id, tx });
        let count = self.connected.fetch_add(1, Ordering::SeqCst) + 1;
        (id, count)
    }

    /// Forget a connection and its room memberships. Returns the remaining count.
    pub fn disconnect(&self, id: Uuid) -> usize {
        if self.clients.remove(&id).is_none() {
            return self.connected_count();
        }
        self.rooms.retain(|_, members| {
            members.remove(&id);
            !members.is_empty()
        });

        let previous = self
            .connected
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| {
                Some(count.saturating_sub(1))
            })
            .unwrap_or_default();
        previous.saturating_sub(1)
    }

    /// Number of open connections.
    pub fn connected_count(&self) -> usize {
        self.connected.load(Ordering::SeqCst)
    }

    /// Add `id` to the room of `team`.
    pub fn join(&self, team: &str, id: Uuid) {
        self.rooms.entry(team.to_string()).or_default().insert(id);
    }

    /// Clients currently in the room of `team`.
    pub fn room_members(&self, team: &str) -> Vec<Uuid> {
        self.rooms
            .get(team)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Classify a room given whether an order is recorded for it.
    pub fn room_status(&self, team: &str, has_order: bool) -> RoomStatus {
        match (has_order, self.room_members(team).is_empty()) {
            (false, _) => RoomStatus::Empty,
            (true, true) => RoomStatus::Idle,
            (true, false) => RoomStatus::Active,
        }
    }

    /// Push a frame to a single client.
    pub fn send_to(&self, id: Uuid, message: Message) {
        let Some(tx) = self.clients.get(&id).map(|conn| conn.tx.clone()) else {
            debug!(client = %id, "dropping frame for unknown client");
            return;
        };
        deliver(&tx, id, message);
    }

    /// Push a frame to every member of the room of `team`, except `skip`.
    pub fn broadcast_room(&self, team: &str, message: &Message, skip: Option<Uuid>) {
        for member in self.room_members(team) {
            if Some(member) == skip {
                continue;
            }
            self.send_to(member, message.clone());
        }
    }

    /// Push a frame to every connected client.
    pub fn broadcast_all(&self, message: &Message) {
        let targets: Vec<ClientConnection> =
            self.clients.iter().map(|entry| entry.value().clone()).collect();
        for conn in targets {
            deliver(&conn.tx, conn.id, message.clone());
        }
    }
}

fn deliver(tx: &mpsc::UnboundedSender<Message>, id: Uuid, message: Message) {
    if tx.send(message).is_err() {
        debug!(client = %id, "writer closed; frame dropped");
    }
}
