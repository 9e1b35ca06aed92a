//! Centralized error types for the SkyGuess application.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for UI display
//! - Preserves full error context for debugging/logging

use thiserror::Error;

/// Top-level application error type.
///
/// All errors in the SkyGuess application should be convertible to this type.
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    ///
    /// These messages are designed to be actionable and non-technical.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Game(e) => e.user_message(),
            AppError::Storage(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Gamification engine errors.
///
/// None of these leave the engine half-updated: an operation that returns
/// one of them has not mutated anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Prediction already resolved: {0}")]
    AlreadyCompleted(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl GameError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    pub fn already_completed(id: impl Into<String>) -> Self {
        Self::AlreadyCompleted(id.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            GameError::NotFound(_) => "That item no longer exists.",
            GameError::AlreadyCompleted(_) => "This prediction has already been scored.",
            GameError::InvalidInput(_) => "Some of the values entered are not valid.",
        }
    }
}

/// Errors raised while loading or saving engine state.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("State file IO failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("State serialization failed: {0}")]
    Serialization(String),

    #[error("Saved state is corrupted: {0}")]
    Corrupt(String),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::Io(_) => "Unable to access saved progress. Try restarting the app.",
            StorageError::Serialization(_) => "Failed to save progress. Please try again.",
            StorageError::Corrupt(_) => {
                "Saved progress may be corrupted. Consider resetting your stats."
            }
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            StorageError::Corrupt(err.to_string())
        } else {
            StorageError::Serialization(err.to_string())
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Configuration file IO failed: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration not found. Using defaults.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::Io(_) => "Unable to read or write the configuration file.",
        }
    }
}
