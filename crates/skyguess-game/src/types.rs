use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::achievements::CATALOG;

/// Experience needed per level
pub const XP_PER_LEVEL: u64 = 100;

/// A forecast triple: what the user guessed, or what actually happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionGuess {
    pub temperature: f64,
    /// Primary condition label ("Clear", "Rain", ...)
    pub condition: String,
    pub precipitation: bool,
}

impl PredictionGuess {
    pub fn new(temperature: f64, condition: impl Into<String>, precipitation: bool) -> Self {
        Self {
            temperature,
            condition: condition.into(),
            precipitation,
        }
    }
}

/// A user's forecast for a location, scored once the real weather is known
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub location: String,
    pub guess: PredictionGuess,
    /// Observed triple, present once resolved
    pub actual: Option<PredictionGuess>,
    /// 0-100, unrounded
    pub accuracy: f64,
    pub points: u32,
    pub completed: bool,
    #[serde(default)]
    pub shared: bool,
}

/// Kinds of tracked streaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakKind {
    DailyPrediction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub kind: StreakKind,
    pub current: u32,
    /// Running maximum of `current`
    pub best: u32,
    pub last_activity_date: Option<NaiveDate>,
    pub active: bool,
}

impl Streak {
    pub fn new(kind: StreakKind) -> Self {
        Self {
            kind,
            current: 0,
            best: 0,
            last_activity_date: None,
            active: false,
        }
    }
}

/// Aggregate player statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_points: u64,
    pub level: u32,
    pub experience: u64,
    pub experience_to_next_level: u64,
    pub predictions_made: u32,
    /// Resolved predictions scoring at least 80
    pub correct_predictions: u32,
    /// Percentage of predictions made that were correct
    pub accuracy: f64,
    pub achievements_unlocked: u32,
    pub total_achievements: u32,
    pub current_streaks: Vec<Streak>,
    pub best_streaks: Vec<Streak>,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            total_points: 0,
            level: 1,
            experience: 0,
            experience_to_next_level: XP_PER_LEVEL,
            predictions_made: 0,
            correct_predictions: 0,
            accuracy: 0.0,
            achievements_unlocked: 0,
            total_achievements: CATALOG.len() as u32,
            current_streaks: Vec::new(),
            best_streaks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizDifficulty {
    Easy,
    Medium,
    Hard,
}

/// A multiple-choice weather question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
    pub difficulty: QuizDifficulty,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub correct: bool,
    pub points_awarded: u32,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: String,
    pub points: u64,
    pub level: u32,
    pub badge: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats_start_at_level_one() {
        let stats = UserStats::default();
        assert_eq!(stats.level, 1);
        assert_eq!(stats.experience, 0);
        assert_eq!(stats.experience_to_next_level, XP_PER_LEVEL);
        assert_eq!(stats.total_achievements, 10);
    }

    #[test]
    fn test_new_streak_is_inactive() {
        let streak = Streak::new(StreakKind::DailyPrediction);
        assert_eq!(streak.current, 0);
        assert_eq!(streak.best, 0);
        assert!(!streak.active);
        assert!(streak.last_activity_date.is_none());
    }
}
