use time::OffsetDateTime;
use tracing::info;

use crate::{error::ServiceError, state::SharedState};

/// Seconds left for `team`; the first query for a team anchors its clock.
pub async fn time_left(state: &SharedState, team: &str) -> Result<u64, ServiceError> {
    let duration = state.config().round_duration();
    let left = state
        .update_timers(|timers| timers.time_left(team, OffsetDateTime::now_utc(), duration))
        .await?;

    if left.started_now {
        info!(team = %team, "team timer started");
    }
    Ok(left.seconds)
}

/// Anchor the clock of `team` unless it already runs.
pub async fn ensure_started(state: &SharedState, team: &str) -> Result<(), ServiceError> {
    let started = state
        .update_timers(|timers| timers.ensure_started(team, OffsetDateTime::now_utc()))
        .await?;
    if started {
        info!(team = %team, "team timer started");
    }
    Ok(())
}

/// Restart the clock of `team` at the full duration.
pub async fn reset_timer(state: &SharedState, team: &str) -> Result<(), ServiceError> {
    state
        .update_timers(|timers| timers.reset(team, OffsetDateTime::now_utc()))
        .await?;
    info!(team = %team, "team timer reset");
    Ok(())
}

/// Forget every clock.
pub async fn clear_timers(state: &SharedState) -> Result<(), ServiceError> {
    state.update_timers(|timers| timers.clear()).await
}
