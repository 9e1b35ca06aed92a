pub mod config;
pub mod error;

pub use config::{Config, GamificationConfig, LoggingConfig, ValidationResult};
pub use error::{AppError, ConfigError, GameError, StorageError};

use anyhow::Result;

/// Initialize logging for the application.
///
/// `default_filter` is used when `RUST_LOG` is not set.
pub fn init(default_filter: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!("SkyGuess core initialized");
    Ok(())
}
