//! Configuration management module
//!
//! Handles loading, saving, and validation of the greeting card's texts,
//! evasion tunables, and audio settings.

use crate::evade::EvadeSettings;
use crate::{Result, SmittenError, APP_NAME, CONFIG_FILE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Background music settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Path to the music track; `None` disables audio entirely
    pub track: Option<PathBuf>,
    /// Configured volume, 0.0 to 1.0
    pub volume: f32,
    /// Loop the track while the card is open
    pub looped: bool,
    /// Attempt autoplay at startup
    pub autoplay: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            track: None,
            volume: 0.3,
            looped: true,
            autoplay: true,
        }
    }
}

/// Full greeting card configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreetingConfig {
    /// The question shown on the choice screen
    pub question: String,
    /// Accept button label
    pub accept_label: String,
    /// Decline button label
    pub decline_label: String,
    /// Small plea line under the buttons
    pub plea: String,
    /// Headline of the celebration screen
    pub accepted_title: String,
    /// Message box title
    pub message_title: String,
    /// Message box body
    pub message_body: String,
    /// Auto-close the message box after this many seconds; off by default
    pub auto_close_secs: Option<f32>,
    /// Evasion tunables
    pub evade: EvadeSettings,
    /// Music settings
    pub audio: AudioSettings,
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            question: "will you be my valentine?".to_string(),
            accept_label: "Yes".to_string(),
            decline_label: "No".to_string(),
            plea: "\"Pleaseee\"".to_string(),
            accepted_title: "Thank you so much!!!".to_string(),
            message_title: "A Message for You".to_string(),
            message_body: "You just made my whole year. See you on the 14th!".to_string(),
            auto_close_secs: None,
            evade: EvadeSettings::default(),
            audio: AudioSettings::default(),
        }
    }
}

impl GreetingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        let e = &self.evade;
        if e.detection_radius <= 0.0 {
            return Err(SmittenError::ConfigError(
                "Detection radius must be greater than 0".to_string(),
            ));
        }
        if e.escape_min <= 0.0 || e.escape_min > e.escape_max {
            return Err(SmittenError::ConfigError(
                "Escape distance range must be positive and non-inverted".to_string(),
            ));
        }
        if e.jitter < 0.0 || e.padding < 0.0 {
            return Err(SmittenError::ConfigError(
                "Jitter and padding cannot be negative".to_string(),
            ));
        }
        if e.scale_step <= 0.0 {
            return Err(SmittenError::ConfigError(
                "Scale step must be greater than 0".to_string(),
            ));
        }
        if e.scale_max < 1.0 {
            return Err(SmittenError::ConfigError(
                "Scale maximum must be at least 1.0".to_string(),
            ));
        }
        if e.idle_min_secs <= 0.0 || e.idle_min_secs > e.idle_max_secs {
            return Err(SmittenError::ConfigError(
                "Idle interval range must be positive and non-inverted".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(SmittenError::ConfigError(
                "Volume must be between 0.0 and 1.0".to_string(),
            ));
        }
        if let Some(secs) = self.auto_close_secs {
            if secs <= 0.0 {
                return Err(SmittenError::ConfigError(
                    "Auto-close seconds must be greater than 0".to_string(),
                ));
            }
        }
        if self.question.is_empty() {
            return Err(SmittenError::ConfigError(
                "Question text cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from the standard config file location.
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| {
            SmittenError::ConfigError(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            SmittenError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_path = Self::config_file_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SmittenError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            SmittenError::ConfigError(format!("Failed to serialize configuration: {}", e))
        })?;

        fs::write(&config_path, content).map_err(|e| {
            SmittenError::ConfigError(format!(
                "Failed to write config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            SmittenError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(GreetingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_volume_rejected() {
        let mut config = GreetingConfig::default();
        config.audio.volume = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_escape_range_rejected() {
        let mut config = GreetingConfig::default();
        config.evade.escape_min = 300.0;
        config.evade.escape_max = 150.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_idle_range_rejected() {
        let mut config = GreetingConfig::default();
        config.evade.idle_min_secs = 5.0;
        config.evade.idle_max_secs = 2.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_auto_close_rejected() {
        let mut config = GreetingConfig::default();
        config.auto_close_secs = Some(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = GreetingConfig::default();
        config.question = "dinner on friday?".to_string();
        config.evade.detection_radius = 180.0;
        config.audio.track = Some(PathBuf::from("/music/song.ogg"));

        let toml_str = toml::to_string(&config).expect("Failed to serialize to TOML");
        let parsed: GreetingConfig =
            toml::from_str(&toml_str).expect("Failed to deserialize from TOML");

        assert_eq!(parsed.question, config.question);
        assert_eq!(parsed.evade.detection_radius, 180.0);
        assert_eq!(parsed.audio.track, config.audio.track);
        assert_eq!(parsed.auto_close_secs, None);
    }

    #[test]
    fn test_config_file_path() {
        let path = GreetingConfig::config_file_path();
        assert!(path.is_ok());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("smitten"));
        assert!(path.to_string_lossy().contains("smitten.toml"));
    }
}
