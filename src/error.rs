//! Error types and handling for the `ParkTrips` planner
//!
//! Two layers live here: [`PlannerError`] for failures that abort a run, and
//! [`LookupFailure`] for per-park lookup problems that are recorded in the
//! caches as markers while the run carries on.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal error type for the planner
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Missing credentials or invalid settings
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Provider communication errors that cannot be recorded as a marker
    #[error("API error: {message}")]
    Api { message: String },

    /// The home address could not be geocoded
    #[error("Could not geocode home address: {address}")]
    HomeNotFound { address: String },

    /// The static site template is missing
    #[error("Template file not found: {}", path.display())]
    TemplateMissing { path: PathBuf },

    /// Cache file read/write errors
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl PlannerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    pub fn home_not_found<S: Into<String>>(address: S) -> Self {
        Self::HomeNotFound {
            address: address.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PlannerError::Config { message } => {
                format!("{message}. Please check your config file, .env and API keys.")
            }
            PlannerError::Api { .. } => {
                "Unable to reach the maps API. Please check your internet connection.".to_string()
            }
            PlannerError::HomeNotFound { address } => {
                format!("Could not geocode home address '{address}'. Please check home.address.")
            }
            PlannerError::TemplateMissing { path } => {
                format!("Site template {} is missing.", path.display())
            }
            PlannerError::Cache { .. } => {
                "Cache file could not be read or written. You may need to fix or delete it."
                    .to_string()
            }
            PlannerError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

/// A lookup that did not produce data, stored as the `error` marker of a cache entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    /// Geocoding returned no result
    NotFound,
    /// The distance lookup returned a non-OK element status
    RouteUnavailable,
    /// Any other failure while talking to the provider
    Provider(String),
}

impl LookupFailure {
    /// Text written to the `error` field of the cache entry
    #[must_use]
    pub fn marker(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupFailure::NotFound => f.write_str("Not found"),
            LookupFailure::RouteUnavailable => f.write_str("Route not found"),
            LookupFailure::Provider(message) => f.write_str(message),
        }
    }
}

impl From<anyhow::Error> for LookupFailure {
    fn from(err: anyhow::Error) -> Self {
        LookupFailure::Provider(err.to_string())
    }
}
