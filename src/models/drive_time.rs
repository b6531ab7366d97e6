//! Drive time entries as stored in `drive_times.json`

use serde::{Deserialize, Serialize};

use crate::error::LookupFailure;

/// Driving route from home to a park, as reported by the distance provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveRoute {
    pub duration_seconds: u64,
    pub duration_text: String,
    pub distance_meters: u64,
    pub distance_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DriveTime {
    Route(DriveRoute),
    Failed { error: String },
}

impl DriveTime {
    #[must_use]
    pub fn failed(failure: &LookupFailure) -> Self {
        DriveTime::Failed {
            error: failure.marker(),
        }
    }

    #[must_use]
    pub fn route(&self) -> Option<&DriveRoute> {
        match self {
            DriveTime::Route(route) => Some(route),
            DriveTime::Failed { .. } => None,
        }
    }

    #[must_use]
    pub fn duration_seconds(&self) -> Option<u64> {
        self.route().map(|route| route.duration_seconds)
    }

    #[must_use]
    pub fn duration_text(&self) -> Option<&str> {
        self.route().map(|route| route.duration_text.as_str())
    }

    #[must_use]
    pub fn distance_text(&self) -> Option<&str> {
        self.route().map(|route| route.distance_text.as_str())
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            DriveTime::Failed { error } => Some(error),
            DriveTime::Route(_) => None,
        }
    }
}
