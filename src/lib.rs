//! SMITTEN - an interactive terminal greeting card
//!
//! Presents a question with two buttons: the accept button grows every time
//! the pointer gets close to the decline button, which dodges out of reach
//! inside a bounded zone. Accepting switches to a celebration view with
//! confetti, a message box, and background music.

use std::fmt;

// Public re-exports
pub mod app;
pub mod audio;
pub mod config;
pub mod evade;
pub mod fx;

// Common error types
#[derive(Debug)]
pub enum SmittenError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// TUI rendering or interaction error
    TuiError(String),
    /// Audio device, decode, or playback error
    AudioError(String),
}

impl fmt::Display for SmittenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmittenError::IoError(err) => write!(f, "I/O error: {}", err),
            SmittenError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            SmittenError::TuiError(msg) => write!(f, "TUI error: {}", msg),
            SmittenError::AudioError(msg) => write!(f, "Audio error: {}", msg),
        }
    }
}

impl std::error::Error for SmittenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SmittenError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SmittenError {
    fn from(err: std::io::Error) -> Self {
        SmittenError::IoError(err)
    }
}

impl From<toml::de::Error> for SmittenError {
    fn from(err: toml::de::Error) -> Self {
        SmittenError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for SmittenError {
    fn from(err: toml::ser::Error) -> Self {
        SmittenError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for smitten operations
pub type Result<T> = std::result::Result<T, SmittenError>;

/// Error handling utilities
pub mod error {
    use super::SmittenError;

    /// Convert error to user-friendly message with suggestions
    pub fn user_friendly_message(error: &SmittenError) -> String {
        match error {
            SmittenError::ConfigError(msg) => {
                format!("Configuration error: {}. Check your settings file.", msg)
            }
            SmittenError::AudioError(_) => {
                "Audio is unavailable. The card still works, just silently.".to_string()
            }
            SmittenError::TuiError(_) => {
                "Terminal setup failed. Run inside an interactive terminal.".to_string()
            }
            _ => error.to_string(),
        }
    }
}

// Common types and constants
pub const APP_NAME: &str = "smitten";
pub const CONFIG_FILE: &str = "smitten.toml";
pub const LOG_FILE: &str = "smitten.log";
/// Maximum number of decorative hearts retained at once
pub const MAX_HEARTS: usize = 24;
