//! Serializable engine state exchanged with the persistence layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::achievements::AchievementBook;
use crate::types::{Prediction, Streak, StreakKind, UserStats};

/// Current on-disk format
pub const STATE_VERSION: u32 = 1;

/// Everything the engine owns: stats, achievement progress, predictions, streaks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub stats: UserStats,
    #[serde(default)]
    pub achievements: AchievementBook,
    #[serde(default)]
    pub predictions: Vec<Prediction>,
    #[serde(default)]
    pub streaks: BTreeMap<StreakKind, Streak>,
}

fn default_version() -> u32 {
    STATE_VERSION
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            stats: UserStats::default(),
            achievements: AchievementBook::default(),
            predictions: Vec::new(),
            streaks: BTreeMap::new(),
        }
    }
}
