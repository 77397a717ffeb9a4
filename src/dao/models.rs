use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Entry of the static team list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamEntity {
    /// Unique, case-sensitive team name.
    pub team_name: String,
}

/// Question configured for a team; its words are what the team reorders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionEntity {
    /// Name of the team the question belongs to.
    pub team: String,
    /// Full question sentence.
    pub question: String,
}

/// Registered participant, keyed by `(team, role)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParticipantEntity {
    /// Team the participant belongs to.
    pub team: String,
    /// Role inside the team (e.g. "Leader").
    pub role: String,
    /// Display name.
    pub name: String,
    /// Game role (`admin` or `participant`).
    pub user_role: String,
}

/// Persisted progress of the team wheel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundStateEntity {
    /// Current round number, starting at 1.
    pub round: u32,
    /// Teams that can still be drawn this round.
    pub remaining_teams: IndexSet<String>,
    /// Teams already drawn this round, in draw order.
    pub spun_teams: Vec<String>,
    /// Whether an admin started the game.
    pub started: bool,
}

/// Persisted anchor of a team countdown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimerEntity {
    /// Instant the countdown was anchored.
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
}

/// Timer table keyed by team name.
pub type TimerTable = IndexMap<String, TimerEntity>;
