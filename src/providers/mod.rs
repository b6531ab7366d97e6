//! Capabilities the planner needs from a mapping service
//!
//! The planner only talks to these traits, so tests can swap in fakes and
//! the Google Maps client stays a thin adapter.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Coordinates, DriveRoute};

pub mod google;

pub use google::GoogleMapsClient;

#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    /// Best match for a free-text place query; `Ok(None)` when nothing matched
    async fn geocode(&self, query: &str) -> Result<Option<Coordinates>>;
}

#[async_trait]
pub trait DistanceProvider: Send + Sync {
    /// Driving route between two points; `Ok(None)` when no route exists
    async fn driving_route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Option<DriveRoute>>;
}

/// Courtesy pause after each provider request
pub(crate) async fn pause(delay: std::time::Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
