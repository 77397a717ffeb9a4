//! DTOs of the participant directory and team question lookup.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Game role of a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Participant,
}

impl UserRole {
    /// Parse a stored role; anything but `admin` is a participant.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::Participant
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Participant => "participant",
        }
    }
}

/// Registration of a participant into a team.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "team name is required"))]
    pub team_name: String,
    /// Role inside the team, e.g. "Leader".
    #[serde(default)]
    #[validate(length(min = 1, message = "team role is required"))]
    pub team_role: String,
    /// Game role, `admin` or `participant`.
    #[serde(default)]
    #[validate(length(min = 1, message = "role is required"))]
    pub role: String,
    /// Optional question contributed for the team.
    #[serde(default)]
    pub question: Option<String>,
}

/// Outcome of a registration and the page the browser should open next.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub status: String,
    pub role: UserRole,
    pub next: String,
}

/// Identifiers used to look up a participant's game role.
#[derive(Debug, Deserialize, IntoParams)]
pub struct RoleQuery {
    pub name: Option<String>,
    pub team: Option<String>,
    pub team_role: Option<String>,
}

/// Game role of the looked-up participant.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoleResponse {
    pub role: UserRole,
}

/// Question a team has to reorder, with its members.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TeamQuestionResponse {
    pub team: String,
    pub question: String,
    /// Question words in their original order.
    pub words_pool: Vec<String>,
    /// Display names of the registered team members.
    pub members: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_fail_validation() {
        let request: RegisterRequest =
            serde_json::from_str(r#"{"name":"Ada","team_name":"","role":"admin"}"#).unwrap();
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("team_name"));
        assert!(fields.contains_key("team_role"));
        assert!(!fields.contains_key("name"));
    }

    #[test]
    fn roles_default_to_participant() {
        assert_eq!(UserRole::parse("ADMIN"), UserRole::Admin);
        assert_eq!(UserRole::parse("student"), UserRole::Participant);
    }
}
