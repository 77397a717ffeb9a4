pub mod file;
#[cfg(test)]
pub(crate) mod flaky;
pub mod memory;

use crate::dao::models::{
    ParticipantEntity, QuestionEntity, RoundStateEntity, TeamEntity, TimerTable,
};
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;

pub use self::file::FileStore;
pub use self::memory::MemoryStore;

/// Abstraction over the persistence layer: one logical table per entity,
/// each read and written as a whole record.
pub trait GameStore: Send + Sync {
    fn load_teams(&self) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>>;
    fn load_questions(&self) -> BoxFuture<'static, StorageResult<Vec<QuestionEntity>>>;
    fn save_questions(&self, questions: Vec<QuestionEntity>) -> BoxFuture<'static, StorageResult<()>>;
    fn load_participants(&self) -> BoxFuture<'static, StorageResult<Vec<ParticipantEntity>>>;
    fn save_participants(
        &self,
        participants: Vec<ParticipantEntity>,
    ) -> BoxFuture<'static, StorageResult<()>>;
    fn load_round_state(&self) -> BoxFuture<'static, StorageResult<Option<RoundStateEntity>>>;
    fn save_round_state(&self, state: RoundStateEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn load_timers(&self) -> BoxFuture<'static, StorageResult<TimerTable>>;
    fn save_timers(&self, timers: TimerTable) -> BoxFuture<'static, StorageResult<()>>;
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
