//! Persistence boundary for engine state.
//!
//! The engine only needs its state loaded once at startup and saved after
//! mutations; `GameStore` is that boundary. `JsonFileStore` keeps the state
//! next to the app config, `MemoryStore` is for tests and throwaway sessions.

use std::path::PathBuf;

use parking_lot::Mutex;
use skyguess_core::StorageError;

use crate::state::{GameState, STATE_VERSION};

pub trait GameStore: Send {
    /// Load saved state, or `None` if nothing has been saved yet.
    ///
    /// # Errors
    /// Returns `StorageError` if the state exists but cannot be read or parsed.
    fn load(&self) -> Result<Option<GameState>, StorageError>;

    /// Persist a full state snapshot.
    ///
    /// # Errors
    /// Returns `StorageError` if the snapshot cannot be written.
    fn save(&self, state: &GameState) -> Result<(), StorageError>;
}

/// Pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl GameStore for JsonFileStore {
    fn load(&self) -> Result<Option<GameState>, StorageError> {
        if !self.path.exists() {
            tracing::debug!("No saved state at {}", self.path.display());
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let state: GameState = serde_json::from_str(&contents)?;
        if state.version > STATE_VERSION {
            return Err(StorageError::Corrupt(format!(
                "state version {} is newer than supported version {}",
                state.version, STATE_VERSION
            )));
        }

        tracing::info!(
            "Loaded game state from {} ({} predictions)",
            self.path.display(),
            state.predictions.len()
        );
        Ok(Some(state))
    }

    fn save(&self, state: &GameState) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(state)?;

        // Write then rename over the old file
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, contents)?;
        std::fs::rename(&tmp_path, &self.path)?;

        tracing::debug!("Saved game state to {}", self.path.display());
        Ok(())
    }
}

/// Keeps the last saved snapshot in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<Option<GameState>>,
    saves: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last saved snapshot
    pub fn saved(&self) -> Option<GameState> {
        self.state.lock().clone()
    }

    /// Number of `save` calls so far
    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }
}

impl GameStore for MemoryStore {
    fn load(&self) -> Result<Option<GameState>, StorageError> {
        Ok(self.state.lock().clone())
    }

    fn save(&self, state: &GameState) -> Result<(), StorageError> {
        *self.state.lock() = Some(state.clone());
        *self.saves.lock() += 1;
        Ok(())
    }
}

impl<S: GameStore + Sync> GameStore for std::sync::Arc<S> {
    fn load(&self) -> Result<Option<GameState>, StorageError> {
        (**self).load()
    }

    fn save(&self, state: &GameState) -> Result<(), StorageError> {
        (**self).save(state)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_none() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("gamification.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("gamification.json");
        let store = JsonFileStore::new(&path);

        let mut state = GameState::default();
        state.stats.total_points = 42;
        store.save(&state).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gamification.json");
        std::fs::write(&path, "{ \"stats\": ").unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gamification.json");
        std::fs::write(&path, format!("{{\"version\": {}}}", STATE_VERSION + 1)).unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gamification.json");
        std::fs::write(&path, "{\"predictions\": []}").unwrap();

        let state = JsonFileStore::new(&path).load().unwrap().unwrap();
        assert_eq!(state, GameState::default());
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(&GameState::default()).unwrap();
        store.save(&GameState::default()).unwrap();

        assert_eq!(store.save_count(), 2);
        assert!(store.saved().is_some());
    }
}
