//! JSON-file backed store. Every table lives in its own file under the data
//! directory and is replaced atomically on write.

use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
    sync::Arc,
};

use futures::{FutureExt, future::BoxFuture};
use serde::{Serialize, de::DeserializeOwned};
use tokio::fs;

use crate::dao::{
    game_store::GameStore,
    models::{ParticipantEntity, QuestionEntity, RoundStateEntity, TeamEntity, TimerTable},
    storage::{StorageError, StorageResult},
};

const TEAMS_FILE: &str = "teams.json";
const QUESTIONS_FILE: &str = "questions.json";
const PARTICIPANTS_FILE: &str = "participants.json";
const ROUND_STATE_FILE: &str = "game_state.json";
const TIMERS_FILE: &str = "timers.json";

#[derive(Clone)]
pub struct FileStore {
    root: Arc<Path>,
}

impl FileStore {
    /// Open the store rooted at `root`, creating the directory when needed.
    pub async fn open(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root: PathBuf = root.into();
        fs::create_dir_all(&root)
            .await
            .map_err(|source| StorageError::Io {
                path: root.clone(),
                source,
            })?;
        Ok(Self {
            root: Arc::from(root),
        })
    }

    fn path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    fn load<T>(&self, file: &str) -> BoxFuture<'static, StorageResult<Option<T>>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        read_record(self.path(file)).boxed()
    }

    fn save<T: Serialize>(
        &self,
        table: &'static str,
        file: &str,
        value: T,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let path = self.path(file);
        let payload =
            serde_json::to_vec_pretty(&value).map_err(|source| StorageError::Encode { table, source });
        async move { write_record(path, payload?).await }.boxed()
    }
}

impl GameStore for FileStore {
    fn load_teams(&self) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        self.load::<Vec<TeamEntity>>(TEAMS_FILE)
            .map(|res| res.map(Option::unwrap_or_default))
            .boxed()
    }

    fn load_questions(&self) -> BoxFuture<'static, StorageResult<Vec<QuestionEntity>>> {
        self.load::<Vec<QuestionEntity>>(QUESTIONS_FILE)
            .map(|res| res.map(Option::unwrap_or_default))
            .boxed()
    }

    fn save_questions(&self, questions: Vec<QuestionEntity>) -> BoxFuture<'static, StorageResult<()>> {
        self.save("questions", QUESTIONS_FILE, questions)
    }

    fn load_participants(&self) -> BoxFuture<'static, StorageResult<Vec<ParticipantEntity>>> {
        self.load::<Vec<ParticipantEntity>>(PARTICIPANTS_FILE)
            .map(|res| res.map(Option::unwrap_or_default))
            .boxed()
    }

    fn save_participants(
        &self,
        participants: Vec<ParticipantEntity>,
    ) -> BoxFuture<'static, StorageResult<()>> {
        self.save("participants", PARTICIPANTS_FILE, participants)
    }

    fn load_round_state(&self) -> BoxFuture<'static, StorageResult<Option<RoundStateEntity>>> {
        self.load(ROUND_STATE_FILE)
    }

    fn save_round_state(&self, state: RoundStateEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.save("round_state", ROUND_STATE_FILE, state)
    }

    fn load_timers(&self) -> BoxFuture<'static, StorageResult<TimerTable>> {
        self.load::<TimerTable>(TIMERS_FILE)
            .map(|res| res.map(Option::unwrap_or_default))
            .boxed()
    }

    fn save_timers(&self, timers: TimerTable) -> BoxFuture<'static, StorageResult<()>> {
        self.save("timers", TIMERS_FILE, timers)
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let root = self.root.to_path_buf();
        async move {
            let metadata = fs::metadata(&root)
                .await
                .map_err(|source| StorageError::Io {
                    path: root.clone(),
                    source,
                })?;
            if metadata.is_dir() {
                Ok(())
            } else {
                Err(StorageError::unavailable(
                    format!("`{}` is not a directory", root.display()),
                    io::Error::from(ErrorKind::NotADirectory),
                ))
            }
        }
        .boxed()
    }
}

/// Read and decode a whole record; a missing file reads as `None`.
async fn read_record<T: DeserializeOwned>(path: PathBuf) -> StorageResult<Option<T>> {
    match fs::read(&path).await {
        Ok(bytes) => serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| StorageError::Decode { path, source }),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StorageError::Io { path, source }),
    }
}

/// Write an encoded record into a sibling temporary file, then rename it over
/// the previous version so readers never observe a partial write.
async fn write_record(path: PathBuf, payload: Vec<u8>) -> StorageResult<()> {
    let staging = path.with_extension("json.tmp");

    fs::write(&staging, payload)
        .await
        .map_err(|source| StorageError::Io {
            path: staging.clone(),
            source,
        })?;
    fs::rename(&staging, &path)
        .await
        .map_err(|source| StorageError::Io { path, source })
}
