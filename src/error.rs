//! Error types for stepgauge
//!
//! The widget itself never fails; errors only come from loading
//! configuration and fonts, and from bringing up the host window.

use thiserror::Error;

/// Top-level error type
#[derive(Error, Debug)]
pub enum GaugeError {
    /// Error from configuration loading
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Font file could not be parsed
    #[error("Failed to load font: {0}")]
    FontLoad(String),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Event loop creation or run failure
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// Window creation failure
    #[error("Window error: {0}")]
    Window(#[from] winit::error::OsError),

    /// Pixel surface failure
    #[error("Surface error: {0}")]
    Pixels(#[from] pixels::Error),
}

/// Errors from configuration files
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file missing or unreadable
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// TOML syntax error
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result alias using [`GaugeError`]
pub type Result<T> = std::result::Result<T, GaugeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_wraps_into_gauge_error() {
        let err: GaugeError = ConfigError::FileNotFound("gauge.toml".into()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Configuration file not found: gauge.toml"
        );
    }

    #[test]
    fn test_font_error_message() {
        let err = GaugeError::FontLoad("missing.ttf".into());
        assert!(err.to_string().contains("missing.ttf"));
    }
}
