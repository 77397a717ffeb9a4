use crate::{config::AppConfig, dao::models::TeamEntity};

/// A team loaded from the static team list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    /// Unique, case-sensitive name.
    pub name: String,
    /// Feedback-only entries are listed but never drawn.
    pub excluded: bool,
}

/// Immutable view over the configured teams.
#[derive(Debug, Clone, Default)]
pub struct TeamRoster {
    teams: Vec<Team>,
}

impl TeamRoster {
    /// Build the roster, flagging excluded entries and dropping duplicate names.
    pub fn from_entities(entities: Vec<TeamEntity>, config: &AppConfig) -> Self {
        let mut teams: Vec<Team> = Vec::with_capacity(entities.len());
        for entity in entities {
            if teams.iter().any(|team| team.name == entity.team_name) {
                continue;
            }
            teams.push(Team {
                excluded: config.is_excluded_team(&entity.team_name),
                name: entity.team_name,
            });
        }
        Self { teams }
    }

    /// Every configured team, excluded ones included.
    pub fn all(&self) -> &[Team] {
        &self.teams
    }

    /// Names of the teams eligible for drawing, in configuration order.
    pub fn active_names(&self) -> Vec<String> {
        self.teams
            .iter()
            .filter(|team| !team.excluded)
            .map(|team| team.name.clone())
            .collect()
    }
}
