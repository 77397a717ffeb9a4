/// Keyed table storage for teams, questions, participants, round state and timers.
pub mod game_store;
/// Persisted record definitions.
pub mod models;
/// Storage abstraction layer errors.
pub mod storage;
