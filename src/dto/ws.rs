use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, ToSchema)]
/// Events accepted from browsers on the push channel.
///
/// Payload fields are optional on the wire; events missing a required field
/// are dropped by the dispatcher.
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    JoinTeam {
        #[serde(default)]
        team: Option<String>,
    },
    UpdateOrder {
        #[serde(default)]
        team: Option<String>,
        #[serde(default)]
        order: Option<Vec<String>>,
    },
    UpdateSentence {
        #[serde(default)]
        team: Option<String>,
        #[serde(default)]
        words: Option<Vec<String>>,
    },
    ResetSentence {
        #[serde(default)]
        team: Option<String>,
    },
    StartSpin,
    #[serde(other)]
    Unknown,
}

/// Raw `{event, data}` frame before the payload is interpreted.
#[derive(Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: Value,
}

impl ClientMessage {
    /// Parse a text frame.
    ///
    /// Payload-free events ignore whatever `data` carries, and a missing
    /// `data` on other events reads as an empty payload.
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        let Envelope { event, data } = serde_json::from_str(text)?;
        match event.as_str() {
            "start_spin" => Ok(Self::StartSpin),
            "join_team" | "update_order" | "update_sentence" | "reset_sentence" => {
                let data = match data {
                    Value::Null => Value::Object(Map::new()),
                    data => data,
                };
                let mut frame = Map::new();
                frame.insert("event".into(), Value::String(event));
                frame.insert("data".into(), data);
                serde_json::from_value(Value::Object(frame))
            }
            _ => Ok(Self::Unknown),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, ToSchema)]
/// Events pushed by the server.
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Current word order of a team.
    OrderUpdated { team: String, order: Vec<String> },
    /// Coarse sentence sync, sent to every connected client.
    SyncSentence { team: String, words: Vec<String> },
    /// A new round began; nobody was drawn.
    RoundReset { round: u32 },
    /// A team was drawn by the wheel.
    SpinResult { team: String },
}
