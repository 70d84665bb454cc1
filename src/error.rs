//! Error types and handling for `fairday`

use std::time::Duration;

use thiserror::Error;

/// Main error type for the `fairday` library
#[derive(Error, Debug)]
pub enum FairdayError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The forecast provider could not deliver a document for a city
    #[error("Forecast source unavailable for {city:?}: {message}")]
    SourceUnavailable { city: String, message: String },

    /// The provider answered but the document has no `forecasts` list
    #[error("The key \"forecasts\" does not exist for the city {city:?}")]
    MissingForecasts { city: String },

    /// The per-call fetch deadline elapsed
    #[error("Fetching the forecast for {city:?} timed out after {timeout:?}")]
    Timeout { city: String, timeout: Duration },

    /// A day entry carries a date that is not an ISO-8601 calendar date
    #[error("Malformed date {date:?}: {reason}")]
    MalformedDate { date: String, reason: String },

    /// Aggregation of a city's forecast failed unexpectedly
    #[error("Aggregation error: {message}")]
    Aggregation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Serialization of the result artifact failed
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

impl FairdayError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new source error for `city`
    pub fn unavailable<C: Into<String>, S: Into<String>>(city: C, message: S) -> Self {
        Self::SourceUnavailable {
            city: city.into(),
            message: message.into(),
        }
    }

    /// Create a new aggregation error
    pub fn aggregation<S: Into<String>>(message: S) -> Self {
        Self::Aggregation {
            message: message.into(),
        }
    }

    /// Whether the error was raised while obtaining a forecast
    #[must_use]
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::SourceUnavailable { .. } | Self::MissingForecasts { .. } | Self::Timeout { .. }
        )
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            FairdayError::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            FairdayError::SourceUnavailable { city, .. }
            | FairdayError::MissingForecasts { city }
            | FairdayError::Timeout { city, .. } => {
                format!("Cannot request data for the city {city:?}.")
            }
            FairdayError::MalformedDate { date, .. } => {
                format!("The forecast contains an invalid date: {date}")
            }
            FairdayError::Aggregation { message } => message.clone(),
            FairdayError::Io { .. } => {
                "File operation failed. Please check the output path and permissions.".to_string()
            }
            FairdayError::Serialization { .. } => {
                "Unable to serialize the analysis results.".to_string()
            }
        }
    }
}
