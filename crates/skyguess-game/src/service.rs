//! Thread-safe handle to the engine.
//!
//! `GameService` puts the engine and its store behind one mutex, so every
//! public operation (including the save that follows a mutation) runs to
//! completion before another caller can observe the state. Construct it once
//! in the host and clone the handle into whatever needs it.

use std::sync::Arc;

use parking_lot::Mutex;
use skyguess_core::{Config, GameError, StorageError};
use skyguess_weather::WeatherObservation;

use crate::achievements::Achievement;
use crate::clock::Clock;
use crate::engine::GamificationEngine;
use crate::store::{GameStore, JsonFileStore};
use crate::types::{
    LeaderboardEntry, Prediction, PredictionGuess, Quiz, QuizResult, Streak, UserStats,
};

struct Inner {
    engine: GamificationEngine,
    store: Option<Box<dyn GameStore>>,
    autosave: bool,
}

impl Inner {
    fn persist(&self) {
        if !self.autosave {
            return;
        }
        if let Some(store) = &self.store {
            if let Err(e) = store.save(&self.engine.state()) {
                tracing::warn!("Failed to save game state: {}", e);
            }
        }
    }
}

#[derive(Clone)]
pub struct GameService {
    inner: Arc<Mutex<Inner>>,
}

impl std::fmt::Debug for GameService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameService").finish_non_exhaustive()
    }
}

impl GameService {
    /// Wrap an engine without persistence
    pub fn new(engine: GamificationEngine) -> Self {
        Self::from_parts(engine, None, false)
    }

    /// Load state from `store` (or start fresh) and save back to it after
    /// each mutation when `autosave` is set.
    ///
    /// # Errors
    /// Returns `StorageError` if saved state exists but cannot be loaded.
    pub fn with_store(
        store: Box<dyn GameStore>,
        clock: Arc<dyn Clock>,
        autosave: bool,
    ) -> Result<Self, StorageError> {
        let engine = match store.load()? {
            Some(state) => GamificationEngine::from_state(state, clock),
            None => {
                tracing::info!("Starting with fresh game state");
                GamificationEngine::new(clock)
            }
        };
        Ok(Self::from_parts(engine, Some(store), autosave))
    }

    /// Open the JSON state file configured in `config`.
    ///
    /// # Errors
    /// Returns `StorageError` if the state file exists but cannot be loaded.
    pub fn open(config: &Config, clock: Arc<dyn Clock>) -> Result<Self, StorageError> {
        let store = JsonFileStore::new(config.state_path());
        Self::with_store(Box::new(store), clock, config.gamification.autosave)
    }

    fn from_parts(
        engine: GamificationEngine,
        store: Option<Box<dyn GameStore>>,
        autosave: bool,
    ) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                engine,
                store,
                autosave,
            })),
        }
    }

    /// Run a mutating engine call and save on success
    fn mutate<T>(
        &self,
        op: impl FnOnce(&mut GamificationEngine) -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        let mut inner = self.inner.lock();
        let result = op(&mut inner.engine)?;
        inner.persist();
        Ok(result)
    }

    /// # Errors
    /// See [`GamificationEngine::create_prediction`].
    pub fn create_prediction(
        &self,
        location: &str,
        guess: PredictionGuess,
    ) -> Result<Prediction, GameError> {
        self.mutate(|engine| engine.create_prediction(location, guess))
    }

    /// # Errors
    /// See [`GamificationEngine::resolve_prediction`].
    pub fn resolve_prediction(
        &self,
        id: &str,
        observation: &WeatherObservation,
    ) -> Result<Prediction, GameError> {
        self.mutate(|engine| engine.resolve_prediction(id, observation))
    }

    /// # Errors
    /// See [`GamificationEngine::share_prediction`].
    pub fn share_prediction(&self, id: &str) -> Result<Prediction, GameError> {
        self.mutate(|engine| engine.share_prediction(id))
    }

    pub fn generate_quiz(&self) -> Quiz {
        self.inner.lock().engine.generate_quiz()
    }

    /// # Errors
    /// See [`GamificationEngine::submit_quiz_answer`].
    pub fn submit_quiz_answer(
        &self,
        quiz_id: &str,
        answer_index: usize,
    ) -> Result<QuizResult, GameError> {
        self.mutate(|engine| engine.submit_quiz_answer(quiz_id, answer_index))
    }

    pub fn get_user_stats(&self) -> UserStats {
        self.inner.lock().engine.get_user_stats()
    }

    pub fn get_achievements(&self) -> Vec<Achievement> {
        self.inner.lock().engine.get_achievements()
    }

    pub fn get_predictions(&self) -> Vec<Prediction> {
        self.inner.lock().engine.get_predictions()
    }

    pub fn pending_predictions(&self) -> Vec<Prediction> {
        self.inner.lock().engine.pending_predictions()
    }

    pub fn get_streaks(&self) -> Vec<Streak> {
        self.inner.lock().engine.get_streaks()
    }

    pub fn get_leaderboard(&self) -> Vec<LeaderboardEntry> {
        self.inner.lock().engine.get_leaderboard()
    }

    pub fn reset_user_data(&self) {
        let mut inner = self.inner.lock();
        inner.engine.reset_user_data();
        inner.persist();
    }

    /// Save immediately, regardless of the autosave setting.
    ///
    /// # Errors
    /// Returns `StorageError` if the store rejects the snapshot.
    pub fn save_now(&self) -> Result<(), StorageError> {
        let inner = self.inner.lock();
        match &inner.store {
            Some(store) => store.save(&inner.engine.state()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use crate::clock::ManualClock;
    use crate::store::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn clock() -> Arc<dyn Clock> {
        Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2026, 2, 14, 8, 0, 0).unwrap()))
    }

    #[test]
    fn test_autosave_after_each_mutation() {
        let store = Arc::new(MemoryStore::new());
        let service = GameService::with_store(Box::new(store.clone()), clock(), true).unwrap();

        let p = service
            .create_prediction("Paris", PredictionGuess::new(11.0, "Clouds", false))
            .unwrap();
        service
            .resolve_prediction(&p.id, &WeatherObservation::new(12.0, "Clouds"))
            .unwrap();

        assert_eq!(store.save_count(), 2);
        let saved = store.saved().unwrap();
        assert_eq!(saved.stats, service.get_user_stats());
    }

    #[test]
    fn test_failed_operation_does_not_save() {
        let store = Arc::new(MemoryStore::new());
        let service = GameService::with_store(Box::new(store.clone()), clock(), true).unwrap();

        assert!(service
            .resolve_prediction("missing", &WeatherObservation::new(1.0, "Clear"))
            .is_err());

        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_autosave_disabled_waits_for_save_now() {
        let store = Arc::new(MemoryStore::new());
        let service = GameService::with_store(Box::new(store.clone()), clock(), false).unwrap();

        service
            .create_prediction("Paris", PredictionGuess::new(11.0, "Clouds", false))
            .unwrap();
        assert_eq!(store.save_count(), 0);

        service.save_now().unwrap();
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_loads_existing_state() {
        let first = Arc::new(MemoryStore::new());
        let service = GameService::with_store(Box::new(first.clone()), clock(), true).unwrap();
        service
            .create_prediction("Paris", PredictionGuess::new(11.0, "Clouds", false))
            .unwrap();

        drop(service);

        let reopened = GameService::with_store(Box::new(first), clock(), true).unwrap();

        assert_eq!(reopened.get_user_stats().predictions_made, 1);
        assert_eq!(reopened.pending_predictions().len(), 1);
    }

    #[test]
    fn test_concurrent_resolutions_keep_invariants() {
        let service = GameService::new(GamificationEngine::new(clock()));
        let ids: Vec<String> = (0..16)
            .map(|i| {
                service
                    .create_prediction(&format!("City {i}"), PredictionGuess::new(20.0, "Clear", false))
                    .unwrap()
                    .id
            })
            .collect();

        std::thread::scope(|scope| {
            for id in &ids {
                let service = service.clone();
                scope.spawn(move || {
                    service
                        .resolve_prediction(id, &WeatherObservation::new(20.0, "Clear"))
                        .unwrap();
                });
            }
        });

        let stats = service.get_user_stats();
        assert_eq!(stats.correct_predictions, 16);
        assert_eq!(stats.total_points, 1600);
        for streak in service.get_streaks() {
            assert!(streak.best >= streak.current);
        }
    }
}
