//! The team wheel. Both the REST endpoints and the push channel drive the
//! wheel through these functions.

use tracing::info;

use crate::{
    dto::game::{GameStatusResponse, TeamSummary},
    error::ServiceError,
    state::{SharedState, round::SpinOutcome},
};

/// Start the game: round 1, every active team in the pool.
pub async fn start_game(state: &SharedState) -> Result<(), ServiceError> {
    let active = state.roster().await?.active_names();
    let teams = active.len();
    state.update_round(|round| round.start(active)).await?;
    info!(teams, "game started");
    Ok(())
}

/// Draw one team, or begin a new round when the pool is empty.
pub async fn spin(state: &SharedState) -> Result<SpinOutcome, ServiceError> {
    let active = state.roster().await?.active_names();
    let outcome = state
        .update_round(|round| round.spin(active, &mut rand::rng()))
        .await?;

    match &outcome {
        SpinOutcome::Selected { team } => info!(team = %team, "team drawn"),
        SpinOutcome::RoundReset { round } => info!(round, "pool exhausted; new round"),
    }
    Ok(outcome)
}

/// Back to an unstarted first round.
pub async fn reset(state: &SharedState) -> Result<(), ServiceError> {
    let active = state.roster().await?.active_names();
    state.update_round(|round| round.reset(active)).await?;
    info!("round state reset");
    Ok(())
}

/// Remove `team` from the pool and the spun list. Unknown teams are a no-op.
pub async fn remove_team(state: &SharedState, team: Option<String>) -> Result<(), ServiceError> {
    let team = team
        .filter(|team| !team.is_empty())
        .ok_or_else(|| ServiceError::InvalidInput("Missing team".into()))?;

    let removed = state
        .update_round(|round| round.remove_team(&team))
        .await?;
    info!(team = %team, removed, "team removed from round");
    Ok(())
}

/// Teams still in the pool.
pub async fn teams_left(state: &SharedState) -> Vec<String> {
    state
        .read_round(|round| round.remaining().iter().cloned().collect())
        .await
}

/// Whether the game was started and the current round.
pub async fn game_status(state: &SharedState) -> GameStatusResponse {
    state
        .read_round(|round| GameStatusResponse {
            started: round.started(),
            round: round.round(),
        })
        .await
}

/// Every configured team, excluded ones included.
pub async fn list_teams(state: &SharedState) -> Result<Vec<TeamSummary>, ServiceError> {
    let roster = state.roster().await?;
    Ok(roster.all().iter().map(TeamSummary::from).collect())
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, sync::Arc};

    use super::*;
    use crate::{config::AppConfig, dao::game_store::MemoryStore, state::AppState};

    async fn state_with(teams: &[&str]) -> SharedState {
        let store = MemoryStore::with_teams(teams.iter().copied());
        AppState::bootstrap(AppConfig::default(), Arc::new(store))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn full_round_then_reset() {
        let state = state_with(&["A", "B", "C", "Feedback"]).await;
        start_game(&state).await.unwrap();
        assert_eq!(teams_left(&state).await.len(), 3);

        let mut drawn = HashSet::new();
        for _ in 0..3 {
            match spin(&state).await.unwrap() {
                SpinOutcome::Selected { team } => assert!(drawn.insert(team)),
                other => panic!("unexpected {other:?}"),
            }
        }
        assert!(!drawn.contains("Feedback"));
        assert!(teams_left(&state).await.is_empty());

        assert_eq!(
            spin(&state).await.unwrap(),
            SpinOutcome::RoundReset { round: 2 }
        );
        assert_eq!(teams_left(&state).await, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn concurrent_spins_never_draw_twice() {
        let state = state_with(&["A", "B", "C", "D", "E"]).await;
        start_game(&state).await.unwrap();

        let handles: Vec<_> = (0..5)
            .map(|_| {
                let state = state.clone();
                tokio::spawn(async move { spin(&state).await })
            })
            .collect();

        let mut drawn = HashSet::new();
        for handle in handles {
            match handle.await.unwrap().unwrap() {
                SpinOutcome::Selected { team } => assert!(drawn.insert(team)),
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(drawn.len(), 5);
    }

    #[tokio::test]
    async fn remove_team_requires_a_name() {
        let state = state_with(&["A", "B", "C"]).await;
        let err = remove_team(&state, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
        let err = remove_team(&state, Some(String::new())).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));

        remove_team(&state, Some("B".into())).await.unwrap();
        assert_eq!(teams_left(&state).await, vec!["A", "C"]);
        remove_team(&state, Some("Nobody".into())).await.unwrap();
    }

    #[tokio::test]
    async fn start_and_reset_toggle_status() {
        let state = state_with(&["A"]).await;
        assert!(!game_status(&state).await.started);

        start_game(&state).await.unwrap();
        assert!(game_status(&state).await.started);

        spin(&state).await.unwrap();
        spin(&state).await.unwrap();
        assert_eq!(game_status(&state).await.round, 2);

        reset(&state).await.unwrap();
        let status = game_status(&state).await;
        assert!(!status.started);
        assert_eq!(status.round, 1);
    }

    #[tokio::test]
    async fn wheel_is_persisted_after_each_spin() {
        let store = MemoryStore::with_teams(["A", "B"]);
        let state = AppState::bootstrap(AppConfig::default(), Arc::new(store.clone()))
            .await
            .unwrap();
        start_game(&state).await.unwrap();
        spin(&state).await.unwrap();

        let restored = AppState::bootstrap(AppConfig::default(), Arc::new(store))
            .await
            .unwrap();
        assert_eq!(teams_left(&restored).await.len(), 1);
        assert!(game_status(&restored).await.started);
    }
}
