pub mod directory;
pub mod game;
pub mod health;
pub mod timer;
pub mod ws;
