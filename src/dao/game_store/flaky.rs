//! Test double wrapping [`MemoryStore`] whose writes can be switched to fail
//! per table.

use std::{
    io,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use futures::{FutureExt, future::BoxFuture};

use crate::dao::{
    game_store::{GameStore, MemoryStore},
    models::{ParticipantEntity, QuestionEntity, RoundStateEntity, TeamEntity, TimerTable},
    storage::{StorageError, StorageResult},
};

#[derive(Default)]
struct Switches {
    questions: AtomicBool,
    round_state: AtomicBool,
    timers: AtomicBool,
}

#[derive(Clone)]
pub(crate) struct FlakyStore {
    inner: MemoryStore,
    failing: Arc<Switches>,
}

impl FlakyStore {
    pub(crate) fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            failing: Arc::default(),
        }
    }

    pub(crate) fn fail_questions(&self, fail: bool) {
        self.failing.questions.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_round_state(&self, fail: bool) {
        self.failing.round_state.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_timers(&self, fail: bool) {
        self.failing.timers.store(fail, Ordering::SeqCst);
    }
}

fn rejected(table: &str) -> BoxFuture<'static, StorageResult<()>> {
    let err = StorageError::unavailable(
        format!("{table} write rejected"),
        io::Error::other("disk full"),
    );
    async move { Err(err) }.boxed()
}

impl GameStore for FlakyStore {
    fn load_teams(&self) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        self.inner.load_teams()
    }

    fn load_questions(&self) -> BoxFuture<'static, StorageResult<Vec<QuestionEntity>>> {
        self.inner.load_questions()
    }

    fn save_questions(&self, questions: Vec<QuestionEntity>) -> BoxFuture<'static, StorageResult<()>> {
        if self.failing.questions.load(Ordering::SeqCst) {
            return rejected("questions");
        }
        self.inner.save_questions(questions)
    }

    fn load_participants(&self) -> BoxFuture<'static, StorageResult<Vec<ParticipantEntity>>> {
        self.inner.load_participants()
    }

    fn save_participants(
        &self,
        participants: Vec<ParticipantEntity>,
    ) -> BoxFuture<'static, StorageResult<()>> {
        self.inner.save_participants(participants)
    }

    fn load_round_state(&self) -> BoxFuture<'static, StorageResult<Option<RoundStateEntity>>> {
        self.inner.load_round_state()
    }

    fn save_round_state(&self, state: RoundStateEntity) -> BoxFuture<'static, StorageResult<()>> {
        if self.failing.round_state.load(Ordering::SeqCst) {
            return rejected("round_state");
        }
        self.inner.save_round_state(state)
    }

    fn load_timers(&self) -> BoxFuture<'static, StorageResult<TimerTable>> {
        self.inner.load_timers()
    }

    fn save_timers(&self, timers: TimerTable) -> BoxFuture<'static, StorageResult<()>> {
        if self.failing.timers.load(Ordering::SeqCst) {
            return rejected("timers");
        }
        self.inner.save_timers(timers)
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        self.inner.health_check()
    }
}
