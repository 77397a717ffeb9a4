pub mod orders;
pub mod round;
pub mod session;
pub mod teams;
pub mod timer;

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    dao::{game_store::GameStore, models::RoundStateEntity},
    error::ServiceError,
};

use self::{
    orders::WordOrders, round::RoundState, session::SessionGateway, teams::TeamRoster,
    timer::TeamTimers,
};

pub type SharedState = Arc<AppState>;

/// The single game session: wheel progress, team clocks, word orders and the
/// connected browsers.
///
/// Wheel and clock mutations go through [`AppState::update_round`] and
/// [`AppState::update_timers`], which hold one lock across
/// read-modify-persist so concurrent requests are serialised.
pub struct AppState {
    config: Arc<AppConfig>,
    store: Arc<dyn GameStore>,
    round: Mutex<RoundState>,
    timers: Mutex<TeamTimers>,
    orders: WordOrders,
    gateway: SessionGateway,
    directory: Mutex<()>,
}

impl AppState {
    /// Build the session, reloading the last persisted wheel and clocks.
    ///
    /// Unreadable persisted state is logged and replaced by a fresh session.
    pub async fn bootstrap(
        config: AppConfig,
        store: Arc<dyn GameStore>,
    ) -> Result<SharedState, ServiceError> {
        let roster = TeamRoster::from_entities(store.load_teams().await?, &config);

        let round = match store.load_round_state().await {
            Ok(Some(entity)) => {
                let round = RoundState::from(entity);
                info!(
                    round = round.round(),
                    remaining = round.remaining().len(),
                    "restored round state"
                );
                round
            }
            Ok(None) => RoundState::new(roster.active_names()),
            Err(err) => {
                warn!(error = %err, "stored round state unreadable; starting fresh");
                RoundState::new(roster.active_names())
            }
        };

        let timers = match store.load_timers().await {
            Ok(table) => TeamTimers::from(table),
            Err(err) => {
                warn!(error = %err, "stored timers unreadable; starting without clocks");
                TeamTimers::default()
            }
        };

        info!(
            teams = roster.all().len(),
            active = roster.active_names().len(),
            "session state ready"
        );

        Ok(Arc::new(Self {
            config: Arc::new(config),
            store,
            round: Mutex::new(round),
            timers: Mutex::new(timers),
            orders: WordOrders::default(),
            gateway: SessionGateway::default(),
            directory: Mutex::new(()),
        }))
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Persistence backend.
    pub fn store(&self) -> &Arc<dyn GameStore> {
        &self.store
    }

    /// Latest word order per team.
    pub fn orders(&self) -> &WordOrders {
        &self.orders
    }

    /// Connected clients and rooms.
    pub fn gateway(&self) -> &SessionGateway {
        &self.gateway
    }

    /// Serialise read-modify-write cycles on the participant and question tables.
    pub async fn lock_directory(&self) -> MutexGuard<'_, ()> {
        self.directory.lock().await
    }

    /// Reload the static team list.
    pub async fn roster(&self) -> Result<TeamRoster, ServiceError> {
        let entities = self.store.load_teams().await?;
        Ok(TeamRoster::from_entities(entities, &self.config))
    }

    /// Read the wheel without mutating it.
    pub async fn read_round<T>(&self, read: impl FnOnce(&RoundState) -> T) -> T {
        let guard = self.round.lock().await;
        read(&guard)
    }

    /// Apply `mutate` to a copy of the wheel, persist the copy, then commit it.
    ///
    /// On a failed write the in-memory wheel is left as it was.
    pub async fn update_round<T>(
        &self,
        mutate: impl FnOnce(&mut RoundState) -> T,
    ) -> Result<T, ServiceError> {
        let mut guard = self.round.lock().await;
        let mut draft = guard.clone();
        let value = mutate(&mut draft);

        self.store
            .save_round_state(RoundStateEntity::from(&draft))
            .await?;
        *guard = draft;
        Ok(value)
    }

    /// Same protocol as [`AppState::update_round`] for the team clocks; the
    /// write is skipped when nothing changed.
    pub async fn update_timers<T>(
        &self,
        mutate: impl FnOnce(&mut TeamTimers) -> T,
    ) -> Result<T, ServiceError> {
        let mut guard = self.timers.lock().await;
        let mut draft = guard.clone();
        let value = mutate(&mut draft);

        if draft != *guard {
            self.store.save_timers(draft.to_table()).await?;
            *guard = draft;
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dao::game_store::{GameStore, MemoryStore, flaky::FlakyStore},
        services::{round_service, timer_service},
    };

    async fn flaky_state(teams: &[&str]) -> (FlakyStore, SharedState) {
        let store = FlakyStore::new(MemoryStore::with_teams(teams.iter().copied()));
        let state = AppState::bootstrap(AppConfig::default(), Arc::new(store.clone()))
            .await
            .unwrap();
        (store, state)
    }

    #[tokio::test]
    async fn failed_round_write_leaves_wheel_untouched() {
        let (store, state) = flaky_state(&["A", "B", "C"]).await;
        round_service::start_game(&state).await.unwrap();
        round_service::spin(&state).await.unwrap();
        let left = round_service::teams_left(&state).await;
        let status = round_service::game_status(&state).await;

        store.fail_round_state(true);
        let err = round_service::spin(&state).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable(_)));
        assert!(round_service::reset(&state).await.is_err());

        assert_eq!(round_service::teams_left(&state).await, left);
        let after = round_service::game_status(&state).await;
        assert_eq!((after.started, after.round), (status.started, status.round));
        let stored = store.load_round_state().await.unwrap().unwrap();
        assert_eq!(stored.remaining_teams.len(), left.len());
    }

    #[tokio::test]
    async fn failed_timer_write_does_not_anchor_clock() {
        let (store, state) = flaky_state(&["A"]).await;

        store.fail_timers(true);
        let err = timer_service::time_left(&state, "A").await.unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable(_)));
        assert!(store.load_timers().await.unwrap().is_empty());

        store.fail_timers(false);
        let started_now = state
            .update_timers(|timers| {
                timers.ensure_started("A", time::OffsetDateTime::now_utc())
            })
            .await
            .unwrap();
        assert!(started_now);
    }
}
