use std::sync::Arc;

use futures::{FutureExt, future::BoxFuture};
use tokio::sync::RwLock;

use crate::dao::{
    game_store::GameStore,
    models::{ParticipantEntity, QuestionEntity, RoundStateEntity, TeamEntity, TimerTable},
    storage::StorageResult,
};

#[derive(Debug, Default)]
struct Tables {
    teams: Vec<TeamEntity>,
    questions: Vec<QuestionEntity>,
    participants: Vec<ParticipantEntity>,
    round_state: Option<RoundStateEntity>,
    timers: TimerTable,
}

/// Process-resident store; state lives as long as the process does.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Build a store seeded with the static team list.
    pub fn with_teams<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let teams = names
            .into_iter()
            .map(|name| TeamEntity {
                team_name: name.into(),
            })
            .collect();
        Self {
            tables: Arc::new(RwLock::new(Tables {
                teams,
                ..Tables::default()
            })),
        }
    }

    /// Seed the question table.
    pub async fn set_questions(&self, questions: Vec<QuestionEntity>) {
        self.tables.write().await.questions = questions;
    }

    fn read<T, F>(&self, pick: F) -> BoxFuture<'static, StorageResult<T>>
    where
        T: Send + 'static,
        F: FnOnce(&Tables) -> T + Send + 'static,
    {
        let tables = self.tables.clone();
        async move { Ok(pick(&*tables.read().await)) }.boxed()
    }

    fn write<F>(&self, apply: F) -> BoxFuture<'static, StorageResult<()>>
    where
        F: FnOnce(&mut Tables) + Send + 'static,
    {
        let tables = self.tables.clone();
        async move {
            apply(&mut *tables.write().await);
            Ok(())
        }
        .boxed()
    }
}

impl GameStore for MemoryStore {
    fn load_teams(&self) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        self.read(|tables| tables.teams.clone())
    }

    fn load_questions(&self) -> BoxFuture<'static, StorageResult<Vec<QuestionEntity>>> {
        self.read(|tables| tables.questions.clone())
    }

    fn save_questions(&self, questions: Vec<QuestionEntity>) -> BoxFuture<'static, StorageResult<()>> {
        self.write(move |tables| tables.questions = questions)
    }

    fn load_participants(&self) -> BoxFuture<'static, StorageResult<Vec<ParticipantEntity>>> {
        self.read(|tables| tables.participants.clone())
    }

    fn save_participants(
        &self,
        participants: Vec<ParticipantEntity>,
    ) -> BoxFuture<'static, StorageResult<()>> {
        self.write(move |tables| tables.participants = participants)
    }

    fn load_round_state(&self) -> BoxFuture<'static, StorageResult<Option<RoundStateEntity>>> {
        self.read(|tables| tables.round_state.clone())
    }

    fn save_round_state(&self, state: RoundStateEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.write(move |tables| tables.round_state = Some(state))
    }

    fn load_timers(&self) -> BoxFuture<'static, StorageResult<TimerTable>> {
        self.read(|tables| tables.timers.clone())
    }

    fn save_timers(&self, timers: TimerTable) -> BoxFuture<'static, StorageResult<()>> {
        self.write(move |tables| tables.timers = timers)
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        async { Ok(()) }.boxed()
    }
}
