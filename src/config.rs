use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::initiative::InitiativeDice;

/// Top-level tracker configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub initiative: InitiativeConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
}

/// Monster initiative re-roll settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InitiativeConfig {
    /// Lowest face of the initiative die.
    pub die_min: i32,
    /// Highest face of the initiative die.
    pub die_max: i32,
    /// Add each monster's initiative modifier to its roll.
    pub apply_modifiers: bool,
}

/// Data directory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of off, error, warn, info, debug, trace.
    pub level: String,
}

impl Default for InitiativeConfig {
    fn default() -> Self {
        let dice = InitiativeDice::default();
        Self {
            die_min: dice.min,
            die_max: dice.max,
            apply_modifiers: dice.apply_modifiers,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl TrackerConfig {
    /// Load configuration from `~/.config/initiative-tracker/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &std::path::Path) -> Self {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e}, using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}, using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// The die used for monster initiative re-rolls.
    pub fn dice(&self) -> InitiativeDice {
        InitiativeDice {
            min: self.initiative.die_min,
            max: self.initiative.die_max,
            apply_modifiers: self.initiative.apply_modifiers,
        }
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("initiative-tracker"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    /// Where the current encounter is kept between invocations.
    pub fn encounter_path(&self) -> PathBuf {
        self.data_dir().join("encounter.json")
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("initiative-tracker").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
