//! Geographic coordinate model

use serde::{Deserialize, Serialize};

/// A resolved point on the map, in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Longitude in decimal degrees
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format coordinates for logs and popups
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// `lat,lng` form accepted by the Distance Matrix origins/destinations parameters
    #[must_use]
    pub fn as_waypoint(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}
