//! DTOs of the wheel endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::{round::SpinOutcome, teams::Team};

/// Acknowledgement returned when the admin starts the game.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StartGameResponse {
    pub success: bool,
}

/// Result of a pull spin: either a drawn team or a round reset.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SpinResponse {
    /// Drawn team, absent on a round reset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    pub round_reset: bool,
    /// Number of the round that just began, present on a round reset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<u32>,
}

impl From<SpinOutcome> for SpinResponse {
    fn from(outcome: SpinOutcome) -> Self {
        match outcome {
            SpinOutcome::Selected { team } => Self {
                team: Some(team),
                round_reset: false,
                round: None,
            },
            SpinOutcome::RoundReset { round } => Self {
                team: None,
                round_reset: true,
                round: Some(round),
            },
        }
    }
}

/// Generic status acknowledgement (`reset`, `removed`).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}

/// Manual correction removing a team from the current round.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RemoveTeamRequest {
    #[serde(default)]
    pub team: Option<String>,
}

/// Whether the game was started and which round is running.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GameStatusResponse {
    pub started: bool,
    pub round: u32,
}

/// One entry of the configured team list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TeamSummary {
    pub team_name: String,
    /// Feedback-only entries are listed but never drawn.
    pub excluded: bool,
}

impl From<&Team> for TeamSummary {
    fn from(team: &Team) -> Self {
        Self {
            team_name: team.name.clone(),
            excluded: team.excluded,
        }
    }
}
