//! Weather prediction game for SkyGuess.
//!
//! Turns forecast guesses into scores, achievements, streaks and levels.
//! [`GamificationEngine`] holds the rules; [`GameService`] is the shared,
//! persisted handle the app injects into its screens.

pub mod achievements;
pub mod clock;
pub mod engine;
pub mod leaderboard;
pub mod quiz;
pub mod scoring;
pub mod service;
pub mod state;
pub mod store;
pub mod streak;
pub mod types;

pub use achievements::{Achievement, AchievementCategory, AchievementId};
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::GamificationEngine;
pub use service::GameService;
pub use state::GameState;
pub use store::{GameStore, JsonFileStore, MemoryStore};
pub use types::*;
