use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

const APP_DIR_NAME: &str = "skyguess";
const CONFIG_FILE_NAME: &str = "config.toml";

const KNOWN_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Prediction game settings
    #[serde(default)]
    pub gamification: GamificationConfig,

    /// Log filter settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamificationConfig {
    /// Save engine state after every mutating call
    #[serde(default = "default_autosave")]
    pub autosave: bool,

    /// State file name, relative to the config directory unless absolute
    #[serde(default = "default_state_file")]
    pub state_file: String,
}

fn default_autosave() -> bool {
    true
}

fn default_state_file() -> String {
    "gamification.json".to_string()
}

impl Default for GamificationConfig {
    fn default() -> Self {
        Self {
            autosave: default_autosave(),
            state_file: default_state_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter; `RUST_LOG` takes precedence
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME);

        Self {
            config_dir,
            gamification: GamificationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the platform config directory, creating a
    /// default file if it doesn't exist
    ///
    /// # Errors
    /// `NotFound` when the platform has no config directory, otherwise see
    /// [`Config::load_from`].
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, creating it with defaults
    /// when missing
    ///
    /// # Errors
    /// `Io` if the file cannot be read or created, `ParseError` if it is not
    /// valid TOML for this schema.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let mut config = Self::default();
            if let Some(parent) = path.parent() {
                config.config_dir = parent.to_path_buf();
            }
            config.save_to(path)?;
            tracing::debug!("Created default config at {}", path.display());
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path)?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))
    }

    /// Validate and log any warnings.
    ///
    /// Call after logging is initialized so warnings are not lost.
    ///
    /// # Errors
    /// `Invalid` with a summary of every validation error.
    pub fn check(&self) -> Result<ValidationResult, ConfigError> {
        let validation = self.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(validation)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        let state_file = self.gamification.state_file.trim();
        if state_file.is_empty() {
            result.add_error("gamification.state_file", "State file name must not be empty");
        } else {
            let state_path = Path::new(state_file);
            if state_path.is_absolute() && !state_path.starts_with(&self.config_dir) {
                result.add_warning(
                    "gamification.state_file",
                    format!(
                        "State file is outside the config directory: {}",
                        state_path.display()
                    ),
                );
            }
        }

        if !self.gamification.autosave {
            result.add_warning(
                "gamification.autosave",
                "Autosave disabled - progress is only kept in memory",
            );
        }

        let level = self.logging.level.to_ascii_lowercase();
        if !KNOWN_LOG_LEVELS.contains(&level.as_str()) && !level.contains('=') {
            result.add_warning(
                "logging.level",
                format!("Unrecognized log level: {}", self.logging.level),
            );
        }

        result
    }

    /// Full path of the gamification state file
    pub fn state_path(&self) -> PathBuf {
        let state_file = Path::new(&self.gamification.state_file);
        if state_file.is_absolute() {
            state_file.to_path_buf()
        } else {
            self.config_dir.join(state_file)
        }
    }

    /// Save configuration to an explicit path
    ///
    /// # Errors
    /// `Io` if the file or its directory cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        std::fs::write(path, contents)?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::NotFound("platform config directory".to_string()))?
            .join(APP_DIR_NAME);

        Ok(config_dir.join(CONFIG_FILE_NAME))
    }
}
