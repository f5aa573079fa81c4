//! Error types and handling for the Skycast service

use thiserror::Error;

/// Fallback shown when the provider gives no usable error text.
pub const GENERIC_FETCH_MESSAGE: &str =
    "Could not fetch weather for that location. Try a city name or ZIP/postal code.";

/// Main error type for the Skycast service
#[derive(Error, Debug)]
pub enum SkycastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Forecast retrieval failed. `message` is already user-facing.
    #[error("Fetch error: {message}")]
    Fetch { message: String },

    /// Template rendering errors
    #[error("Render error: {message}")]
    Render { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl SkycastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new fetch error
    pub fn fetch<S: Into<String>>(message: S) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Fetch error carrying the generic fallback text
    #[must_use]
    pub fn fetch_generic() -> Self {
        Self::fetch(GENERIC_FETCH_MESSAGE)
    }

    /// Create a new render error
    pub fn render<S: Into<String>>(message: S) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SkycastError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            SkycastError::Fetch { message } => message.clone(),
            SkycastError::Render { .. } => {
                "Something went wrong while rendering the forecast.".to_string()
            }
            SkycastError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<tera::Error> for SkycastError {
    fn from(err: tera::Error) -> Self {
        Self::render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = SkycastError::config("missing API key");
        assert!(matches!(config_err, SkycastError::Config { .. }));

        let fetch_err = SkycastError::fetch("No matching location found.");
        assert!(matches!(fetch_err, SkycastError::Fetch { .. }));

        let render_err = SkycastError::render("template missing");
        assert!(matches!(render_err, SkycastError::Render { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = SkycastError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let fetch_err = SkycastError::fetch("No matching location found.");
        assert_eq!(fetch_err.user_message(), "No matching location found.");

        assert_eq!(
            SkycastError::fetch_generic().user_message(),
            GENERIC_FETCH_MESSAGE
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SkycastError = io_err.into();
        assert!(matches!(err, SkycastError::Io { .. }));
    }
}
