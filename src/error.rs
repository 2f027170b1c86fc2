//! Error handling for METAR parsing operations.
//!
//! Mandatory-group failures carry the offending token together with a
//! description of the grammar that was expected. Optional groups never
//! produce errors; see [`GroupOutcome`](crate::app::services::metar_parser::GroupOutcome).

use thiserror::Error;

/// Placeholder reported when a mandatory group is missing because the
/// token stream ran out.
pub const END_OF_REPORT: &str = "<end of report>";

#[derive(Error, Debug)]
pub enum MetarError {
    #[error("Malformed location '{token}': expected {expected}")]
    MalformedLocation {
        token: String,
        expected: &'static str,
    },

    #[error("Malformed date/time '{token}': expected {expected}")]
    MalformedDateTime {
        token: String,
        expected: &'static str,
    },

    #[error("Malformed temperature/dew point '{token}': expected {expected}")]
    MalformedTemperatureDewPoint {
        token: String,
        expected: &'static str,
    },

    #[error("Unknown sky condition type '{suffix}' in '{token}': expected {expected}")]
    UnknownSkyConditionType {
        token: String,
        suffix: String,
        expected: &'static str,
    },

    #[error("Unexpected trailing tokens: {}", tokens.join(" "))]
    UnexpectedTrailingTokens { tokens: Vec<String> },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl MetarError {
    /// Create a malformed location error
    pub fn malformed_location(token: impl Into<String>) -> Self {
        Self::MalformedLocation {
            token: token.into(),
            expected: "an ICAO identifier (one letter followed by three letters or digits)",
        }
    }

    /// Create a malformed date/time error
    pub fn malformed_date_time(token: impl Into<String>) -> Self {
        Self::MalformedDateTime {
            token: token.into(),
            expected: "a day-hour-minute group of the form DDHHMMZ",
        }
    }

    /// Create a malformed temperature/dew point error
    pub fn malformed_temperature_dew_point(token: impl Into<String>) -> Self {
        Self::MalformedTemperatureDewPoint {
            token: token.into(),
            expected: "T/D where each side is an optionally M-prefixed number, XX or //",
        }
    }

    /// Create an unknown sky condition type error
    pub fn unknown_sky_condition_type(token: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self::UnknownSkyConditionType {
            token: token.into(),
            suffix: suffix.into(),
            expected: "CB, TCU, /// or no cloud type",
        }
    }

    /// Create an unexpected trailing tokens error
    pub fn unexpected_trailing_tokens(tokens: Vec<String>) -> Self {
        Self::UnexpectedTrailingTokens { tokens }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, MetarError>;
