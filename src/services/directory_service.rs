//! Participant registration, role lookup and per-team questions. The wheel,
//! clocks and rooms never consult this directory.

use tracing::{info, warn};

use crate::{
    dao::models::{ParticipantEntity, QuestionEntity},
    dto::directory::{
        RegisterRequest, RegisterResponse, RoleQuery, TeamQuestionResponse, UserRole,
    },
    error::ServiceError,
    services::timer_service,
    state::SharedState,
};

/// Upsert the participant keyed by `(team, team role)` and record the
/// question it contributed, if any. `request` must already be validated.
///
/// Both tables are loaded before anything is written; a failed question
/// write restores the previous participant table.
pub async fn register(
    state: &SharedState,
    request: RegisterRequest,
) -> Result<RegisterResponse, ServiceError> {
    let _guard = state.lock_directory().await;
    let store = state.store();
    let role = UserRole::parse(&request.role);

    let previous = store.load_participants().await?;
    let question = request
        .question
        .as_deref()
        .map(str::trim)
        .filter(|question| !question.is_empty())
        .map(str::to_string);
    let questions = match question {
        Some(question) => {
            let mut questions = store.load_questions().await?;
            questions.push(QuestionEntity {
                team: request.team_name.clone(),
                question,
            });
            Some(questions)
        }
        None => None,
    };

    let mut participants = previous.clone();
    match participants
        .iter_mut()
        .find(|p| p.team == request.team_name && p.role == request.team_role)
    {
        Some(existing) => {
            existing.name = request.name.clone();
            existing.user_role = role.as_str().to_string();
        }
        None => participants.push(ParticipantEntity {
            team: request.team_name.clone(),
            role: request.team_role.clone(),
            name: request.name.clone(),
            user_role: role.as_str().to_string(),
        }),
    }
    store.save_participants(participants).await?;

    if let Some(questions) = questions {
        if let Err(err) = store.save_questions(questions).await {
            if let Err(restore) = store.save_participants(previous).await {
                warn!(error = %restore, "failed to restore participants after question write failed");
            }
            return Err(err.into());
        }
    }

    info!(
        team = %request.team_name,
        team_role = %request.team_role,
        role = role.as_str(),
        "participant registered"
    );

    let next = match role {
        UserRole::Admin => "/admin",
        UserRole::Participant => "/waiting-room",
    };
    Ok(RegisterResponse {
        status: "registered".into(),
        role,
        next: next.into(),
    })
}

/// Game role of a participant; unknown or incomplete identities are participants.
pub async fn lookup_role(state: &SharedState, query: RoleQuery) -> Result<UserRole, ServiceError> {
    let (Some(name), Some(team), Some(team_role)) = (query.name, query.team, query.team_role)
    else {
        return Ok(UserRole::Participant);
    };

    let participants = state.store().load_participants().await?;
    Ok(participants
        .iter()
        .find(|p| p.name == name && p.team == team && p.role == team_role)
        .map(|p| UserRole::parse(&p.user_role))
        .unwrap_or(UserRole::Participant))
}

/// Question of `team` split into words, with the team's members.
///
/// Opening the question starts the team clock if it is not running yet.
pub async fn team_question(
    state: &SharedState,
    team: &str,
) -> Result<TeamQuestionResponse, ServiceError> {
    timer_service::ensure_started(state, team).await?;

    let questions = state.store().load_questions().await?;
    let question = questions
        .into_iter()
        .find(|q| q.team == team)
        .ok_or_else(|| ServiceError::NotFound(format!("No question found for {team}")))?;

    let members = state
        .store()
        .load_participants()
        .await?
        .into_iter()
        .filter(|p| p.team == team)
        .map(|p| p.name)
        .collect();

    Ok(TeamQuestionResponse {
        team: team.to_string(),
        words_pool: question
            .question
            .split_whitespace()
            .map(str::to_string)
            .collect(),
        question: question.question,
        members,
    })
}
