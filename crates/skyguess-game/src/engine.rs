//! The gamification engine.
//!
//! Owns the player's stats, achievement progress, predictions and streaks,
//! and applies every scoring rule. All operations are synchronous in-memory
//! transforms: they either apply fully or return an error without mutating
//! anything. Hosts that share one engine across threads go through
//! [`crate::GameService`], which serializes access.

use std::collections::BTreeMap;
use std::sync::Arc;

use skyguess_core::GameError;
use skyguess_weather::WeatherObservation;
use uuid::Uuid;

use crate::achievements::{Achievement, AchievementBook, AchievementId};
use crate::clock::Clock;
use crate::leaderboard;
use crate::quiz::{self, QUIZ_POINTS};
use crate::scoring::{self, Score};
use crate::state::{GameState, STATE_VERSION};
use crate::streak::{self, MONTH_STREAK, WEEK_STREAK};
use crate::types::{
    LeaderboardEntry, Prediction, PredictionGuess, Quiz, QuizResult, Streak, StreakKind,
    UserStats, XP_PER_LEVEL,
};

pub struct GamificationEngine {
    stats: UserStats,
    achievements: AchievementBook,
    predictions: Vec<Prediction>,
    streaks: BTreeMap<StreakKind, Streak>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for GamificationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GamificationEngine")
            .field("stats", &self.stats)
            .field("predictions", &self.predictions.len())
            .field("streaks", &self.streaks)
            .finish_non_exhaustive()
    }
}

impl GamificationEngine {
    /// Create an engine with fresh state
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::from_state(GameState::default(), clock)
    }

    /// Rebuild an engine from previously saved state
    pub fn from_state(state: GameState, clock: Arc<dyn Clock>) -> Self {
        let GameState {
            stats,
            mut achievements,
            predictions,
            streaks,
            ..
        } = state;
        achievements.normalize(clock.now());

        let mut engine = Self {
            stats,
            achievements,
            predictions,
            streaks,
            clock,
        };
        engine.stats.achievements_unlocked = engine.achievements.unlocked_count();
        engine.stats.total_achievements = crate::achievements::CATALOG.len() as u32;
        engine.stats.level = engine.stats.level.max(1);
        for streak in engine.streaks.values_mut() {
            streak.best = streak.best.max(streak.current);
        }
        engine.refresh_streak_stats();
        engine
    }

    /// Snapshot of the full state for persistence
    pub fn state(&self) -> GameState {
        GameState {
            version: STATE_VERSION,
            stats: self.stats.clone(),
            achievements: self.achievements.clone(),
            predictions: self.predictions.clone(),
            streaks: self.streaks.clone(),
        }
    }

    /// Record a new forecast.
    ///
    /// # Errors
    /// `InvalidInput` when the temperature is not a finite number or the
    /// condition label is blank.
    pub fn create_prediction(
        &mut self,
        location: &str,
        guess: PredictionGuess,
    ) -> Result<Prediction, GameError> {
        if !guess.temperature.is_finite() {
            return Err(GameError::invalid_input("temperature must be a finite number"));
        }
        if guess.condition.trim().is_empty() {
            return Err(GameError::invalid_input("condition must not be empty"));
        }

        let now = self.clock.now();
        let prediction = Prediction {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            location: location.to_string(),
            guess,
            actual: None,
            accuracy: 0.0,
            points: 0,
            completed: false,
            shared: false,
        };
        self.predictions.push(prediction.clone());

        self.stats.predictions_made += 1;
        self.recompute_accuracy();
        self.advance(AchievementId::FirstPrediction, true);

        tracing::info!(
            "Prediction {} created for {}",
            prediction.id,
            prediction.location
        );
        Ok(prediction)
    }

    /// Score a prediction against the observed weather.
    ///
    /// # Errors
    /// `InvalidInput` when the observed temperature is not a finite number,
    /// `NotFound` for an unknown id, `AlreadyCompleted` if the prediction was
    /// resolved before. None of them mutate any state.
    pub fn resolve_prediction(
        &mut self,
        id: &str,
        observation: &WeatherObservation,
    ) -> Result<Prediction, GameError> {
        // Saved state cannot hold non-finite floats
        if !observation.temp.is_finite() {
            return Err(GameError::invalid_input(
                "observed temperature must be a finite number",
            ));
        }
        let index = self
            .predictions
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| GameError::not_found(id))?;
        if self.predictions[index].completed {
            return Err(GameError::already_completed(id));
        }

        let actual = scoring::actual_from_observation(observation);
        let score = scoring::score(&self.predictions[index].guess, &actual);

        let prediction = &mut self.predictions[index];
        prediction.completed = true;
        prediction.actual = Some(actual);
        prediction.accuracy = score.overall;
        prediction.points = score.points;
        let resolved = prediction.clone();

        if score.is_correct() {
            self.stats.correct_predictions += 1;
        }
        self.recompute_accuracy();
        self.award_achievements_for(&score);

        let update = streak::update_daily(&mut self.streaks, &self.predictions, self.clock.as_ref());
        self.advance(AchievementId::WeekWarrior, update.crossed(WEEK_STREAK));
        self.advance(AchievementId::MonthMaster, update.crossed(MONTH_STREAK));
        self.refresh_streak_stats();

        self.gain_experience(u64::from(score.points));

        tracing::info!(
            "Prediction {} resolved: accuracy {:.1}, {} points",
            resolved.id,
            resolved.accuracy,
            resolved.points
        );
        Ok(resolved)
    }

    /// Mark a prediction as shared.
    ///
    /// Sharing the same prediction again changes nothing.
    ///
    /// # Errors
    /// `NotFound` for an unknown id.
    pub fn share_prediction(&mut self, id: &str) -> Result<Prediction, GameError> {
        let prediction = self
            .predictions
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| GameError::not_found(id))?;
        if prediction.shared {
            return Ok(prediction.clone());
        }

        prediction.shared = true;
        let shared = prediction.clone();
        self.advance(AchievementId::SocialForecaster, true);
        Ok(shared)
    }

    /// Draw a random quiz
    pub fn generate_quiz(&self) -> Quiz {
        quiz::random().to_quiz()
    }

    /// Check an answer for the quiz with the given id.
    ///
    /// # Errors
    /// `NotFound` for an unknown quiz id, `InvalidInput` when `answer_index`
    /// is not one of the quiz's options.
    pub fn submit_quiz_answer(
        &mut self,
        quiz_id: &str,
        answer_index: usize,
    ) -> Result<QuizResult, GameError> {
        let quiz = quiz::find(quiz_id).ok_or_else(|| GameError::not_found(quiz_id))?;
        if answer_index >= quiz.options.len() {
            return Err(GameError::invalid_input(format!(
                "answer {} out of range for quiz {}",
                answer_index, quiz_id
            )));
        }

        let correct = answer_index == quiz.correct_index;
        let points_awarded = if correct { QUIZ_POINTS } else { 0 };
        if correct {
            self.advance(AchievementId::QuizEnthusiast, true);
            self.advance(AchievementId::WeatherScholar, true);
            self.gain_experience(u64::from(QUIZ_POINTS));
        }
        tracing::debug!("Quiz {} answered, correct: {}", quiz_id, correct);

        Ok(QuizResult {
            correct,
            points_awarded,
            explanation: quiz.explanation.to_string(),
        })
    }

    pub fn get_user_stats(&self) -> UserStats {
        self.stats.clone()
    }

    pub fn get_achievements(&self) -> Vec<Achievement> {
        self.achievements.snapshot()
    }

    pub fn get_predictions(&self) -> Vec<Prediction> {
        self.predictions.clone()
    }

    pub fn get_prediction(&self, id: &str) -> Option<Prediction> {
        self.predictions.iter().find(|p| p.id == id).cloned()
    }

    /// Predictions still waiting for an observation
    pub fn pending_predictions(&self) -> Vec<Prediction> {
        self.predictions
            .iter()
            .filter(|p| !p.completed)
            .cloned()
            .collect()
    }

    pub fn get_streaks(&self) -> Vec<Streak> {
        self.streaks.values().cloned().collect()
    }

    pub fn get_leaderboard(&self) -> Vec<LeaderboardEntry> {
        leaderboard::entries()
    }

    /// Wipe all progress
    pub fn reset_user_data(&mut self) {
        self.stats = UserStats::default();
        self.achievements.reset();
        self.predictions.clear();
        self.streaks.clear();
        tracing::info!("User data reset");
    }

    fn award_achievements_for(&mut self, score: &Score) {
        self.advance(AchievementId::AccuratePredictor, score.is_correct());
        self.advance(AchievementId::WeatherMaster, score.is_master());
        self.advance(AchievementId::TemperatureExpert, score.is_temperature_expert());
        self.advance(AchievementId::ConditionMaster, score.condition_matched);
    }

    fn advance(&mut self, id: AchievementId, when: bool) {
        if when && self.achievements.advance(id, 1, self.clock.now()) {
            self.stats.achievements_unlocked = self.achievements.unlocked_count();
        }
    }

    fn recompute_accuracy(&mut self) {
        self.stats.accuracy = if self.stats.predictions_made == 0 {
            0.0
        } else {
            f64::from(self.stats.correct_predictions) / f64::from(self.stats.predictions_made)
                * 100.0
        };
    }

    fn gain_experience(&mut self, amount: u64) {
        self.stats.total_points += amount;
        self.stats.experience += amount;

        let new_level = (self.stats.experience / XP_PER_LEVEL + 1) as u32;
        if new_level > self.stats.level {
            tracing::info!("Level up: {} -> {}", self.stats.level, new_level);
            self.stats.level = new_level;
        }
        self.stats.experience_to_next_level =
            (u64::from(self.stats.level) * XP_PER_LEVEL).saturating_sub(self.stats.experience);
    }

    fn refresh_streak_stats(&mut self) {
        self.stats.current_streaks = self.streaks.values().filter(|s| s.active).cloned().collect();
        self.stats.best_streaks = self.streaks.values().cloned().collect();
    }
}
