//! Achievement catalog and per-player progress.
//!
//! The catalog is immutable and fixed at compile time. Mutable state lives in
//! [`AchievementBook`], a progress map keyed by [`AchievementId`]; the two are
//! joined into [`Achievement`] views only when a caller asks for a snapshot.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Achievement category for grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Prediction,
    Streak,
    Learning,
    Weather,
    Social,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstPrediction,
    AccuratePredictor,
    WeatherMaster,
    WeekWarrior,
    MonthMaster,
    QuizEnthusiast,
    WeatherScholar,
    TemperatureExpert,
    ConditionMaster,
    SocialForecaster,
}

impl AchievementId {
    /// All ids, in catalog order
    pub const ALL: [AchievementId; 10] = [
        AchievementId::FirstPrediction,
        AchievementId::AccuratePredictor,
        AchievementId::WeatherMaster,
        AchievementId::WeekWarrior,
        AchievementId::MonthMaster,
        AchievementId::QuizEnthusiast,
        AchievementId::WeatherScholar,
        AchievementId::TemperatureExpert,
        AchievementId::ConditionMaster,
        AchievementId::SocialForecaster,
    ];

    pub fn definition(self) -> &'static AchievementDef {
        // CATALOG is declared in the same order as the enum variants.
        &CATALOG[self as usize]
    }
}

/// Static description of an achievement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: AchievementCategory,
    pub points_reward: u32,
    pub max_progress: u32,
}

pub const CATALOG: &[AchievementDef] = &[
    AchievementDef {
        id: AchievementId::FirstPrediction,
        title: "First Forecast",
        description: "Make your first weather prediction",
        icon: "sparkle",
        category: AchievementCategory::Prediction,
        points_reward: 10,
        max_progress: 1,
    },
    AchievementDef {
        id: AchievementId::AccuratePredictor,
        title: "Accurate Predictor",
        description: "Score 80% or better on 10 predictions",
        icon: "target",
        category: AchievementCategory::Prediction,
        points_reward: 50,
        max_progress: 10,
    },
    AchievementDef {
        id: AchievementId::WeatherMaster,
        title: "Weather Master",
        description: "Score 90% or better on 5 predictions",
        icon: "crown",
        category: AchievementCategory::Prediction,
        points_reward: 100,
        max_progress: 5,
    },
    AchievementDef {
        id: AchievementId::WeekWarrior,
        title: "Week Warrior",
        description: "Predict the weather 7 days in a row",
        icon: "flame",
        category: AchievementCategory::Streak,
        points_reward: 75,
        max_progress: 1,
    },
    AchievementDef {
        id: AchievementId::MonthMaster,
        title: "Month Master",
        description: "Predict the weather 30 days in a row",
        icon: "calendar_check",
        category: AchievementCategory::Streak,
        points_reward: 300,
        max_progress: 1,
    },
    AchievementDef {
        id: AchievementId::QuizEnthusiast,
        title: "Quiz Enthusiast",
        description: "Answer 5 weather quiz questions correctly",
        icon: "lightbulb",
        category: AchievementCategory::Learning,
        points_reward: 25,
        max_progress: 5,
    },
    AchievementDef {
        id: AchievementId::WeatherScholar,
        title: "Weather Scholar",
        description: "Answer 20 weather quiz questions correctly",
        icon: "graduation_cap",
        category: AchievementCategory::Learning,
        points_reward: 100,
        max_progress: 20,
    },
    AchievementDef {
        id: AchievementId::TemperatureExpert,
        title: "Temperature Expert",
        description: "Guess the temperature within 2 degrees 5 times",
        icon: "thermometer",
        category: AchievementCategory::Weather,
        points_reward: 50,
        max_progress: 5,
    },
    AchievementDef {
        id: AchievementId::ConditionMaster,
        title: "Condition Master",
        description: "Guess the sky condition correctly 10 times",
        icon: "cloud_sun",
        category: AchievementCategory::Weather,
        points_reward: 50,
        max_progress: 10,
    },
    AchievementDef {
        id: AchievementId::SocialForecaster,
        title: "Social Forecaster",
        description: "Share a prediction with a friend",
        icon: "share",
        category: AchievementCategory::Social,
        points_reward: 15,
        max_progress: 1,
    },
];

/// Mutable progress towards one achievement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementProgress {
    pub progress: u32,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

/// Catalog entry joined with the player's progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: AchievementCategory,
    pub points_reward: u32,
    pub max_progress: u32,
    pub progress: u32,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Achievement {
    fn new(def: &AchievementDef, state: &AchievementProgress) -> Self {
        Self {
            id: def.id,
            title: def.title,
            description: def.description,
            icon: def.icon,
            category: def.category,
            points_reward: def.points_reward,
            max_progress: def.max_progress,
            progress: state.progress,
            unlocked: state.unlocked,
            unlocked_at: state.unlocked_at,
        }
    }
}

/// Progress map for the whole catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AchievementBook {
    progress: BTreeMap<AchievementId, AchievementProgress>,
}

impl Default for AchievementBook {
    fn default() -> Self {
        Self {
            progress: AchievementId::ALL
                .iter()
                .map(|id| (*id, AchievementProgress::default()))
                .collect(),
        }
    }
}

impl AchievementBook {
    /// Add `by` to an achievement's progress, clamped at its maximum.
    ///
    /// Returns true when this call unlocked the achievement.
    pub fn advance(&mut self, id: AchievementId, by: u32, now: DateTime<Utc>) -> bool {
        let def = id.definition();
        let entry = self.progress.entry(id).or_default();
        if entry.unlocked || by == 0 {
            return false;
        }

        entry.progress = entry.progress.saturating_add(by).min(def.max_progress);
        if entry.progress < def.max_progress {
            return false;
        }

        entry.unlocked = true;
        entry.unlocked_at = Some(now);
        tracing::info!("Achievement unlocked: {}", def.title);
        true
    }

    pub fn get(&self, id: AchievementId) -> AchievementProgress {
        self.progress.get(&id).cloned().unwrap_or_default()
    }

    pub fn unlocked_count(&self) -> u32 {
        self.progress.values().filter(|p| p.unlocked).count() as u32
    }

    pub fn snapshot(&self) -> Vec<Achievement> {
        CATALOG
            .iter()
            .map(|def| Achievement::new(def, &self.get(def.id)))
            .collect()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Repair progress loaded from storage: add missing catalog entries and
    /// re-establish the progress/unlock invariants.
    pub fn normalize(&mut self, now: DateTime<Utc>) {
        for id in AchievementId::ALL {
            let max = id.definition().max_progress;
            let entry = self.progress.entry(id).or_default();
            entry.progress = entry.progress.min(max);
            if entry.progress == max && !entry.unlocked {
                entry.unlocked = true;
            }
            if entry.unlocked {
                entry.progress = max;
                entry.unlocked_at.get_or_insert(now);
            } else {
                entry.unlocked_at = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_order_matches_ids() {
        assert_eq!(CATALOG.len(), AchievementId::ALL.len());
        for (def, id) in CATALOG.iter().zip(AchievementId::ALL) {
            assert_eq!(def.id, id);
            assert_eq!(id.definition().id, id);
        }
    }

    #[test]
    fn test_catalog_spans_all_categories() {
        let categories: HashSet<_> = CATALOG.iter().map(|d| d.category).collect();
        assert_eq!(categories.len(), 5);
        assert!(CATALOG.iter().all(|d| d.max_progress > 0));
    }

    #[test]
    fn test_advance_unlocks_once_at_max() {
        let mut book = AchievementBook::default();
        let now = Utc::now();

        assert!(!book.advance(AchievementId::WeatherMaster, 4, now));
        assert!(book.advance(AchievementId::WeatherMaster, 1, now));
        assert!(!book.advance(AchievementId::WeatherMaster, 1, now));

        let state = book.get(AchievementId::WeatherMaster);
        assert_eq!(state.progress, 5);
        assert!(state.unlocked);
        assert_eq!(state.unlocked_at, Some(now));
        assert_eq!(book.unlocked_count(), 1);
    }

    #[test]
    fn test_advance_clamps_progress() {
        let mut book = AchievementBook::default();
        assert!(book.advance(AchievementId::QuizEnthusiast, 50, Utc::now()));
        assert_eq!(book.get(AchievementId::QuizEnthusiast).progress, 5);
    }

    #[test]
    fn test_advance_by_zero_is_noop() {
        let mut book = AchievementBook::default();
        assert!(!book.advance(AchievementId::FirstPrediction, 0, Utc::now()));
        assert_eq!(book.get(AchievementId::FirstPrediction), AchievementProgress::default());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut book = AchievementBook::default();
        book.advance(AchievementId::FirstPrediction, 1, Utc::now());
        book.advance(AchievementId::ConditionMaster, 3, Utc::now());

        book.reset();

        assert_eq!(book.unlocked_count(), 0);
        assert!(book.snapshot().iter().all(|a| a.progress == 0 && a.unlocked_at.is_none()));
    }

    #[test]
    fn test_normalize_repairs_loaded_progress() {
        let now = Utc::now();
        let mut book: AchievementBook = serde_json::from_str(
            r#"{
                "accurate_predictor": {"progress": 99, "unlocked": false, "unlocked_at": null},
                "weather_master": {"progress": 2, "unlocked": false, "unlocked_at": "2026-01-01T00:00:00Z"}
            }"#,
        )
        .unwrap();

        book.normalize(now);

        let accurate = book.get(AchievementId::AccuratePredictor);
        assert_eq!(accurate.progress, 10);
        assert!(accurate.unlocked);
        assert_eq!(accurate.unlocked_at, Some(now));

        let master = book.get(AchievementId::WeatherMaster);
        assert!(!master.unlocked);
        assert!(master.unlocked_at.is_none());

        assert_eq!(book.snapshot().len(), CATALOG.len());
    }
}
