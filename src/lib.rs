//! `ParkTrips` - Road trip planning for California state parks
//!
//! This library geocodes parks, looks up drive times from home, groups
//! nearby parks into multi-day trips and renders a map, a text report and
//! a static site.

pub mod cache;
pub mod clustering;
pub mod config;
pub mod error;
pub mod geo;
pub mod location_resolver;
pub mod logging;
pub mod map;
pub mod models;
pub mod planner;
pub mod providers;
pub mod report;
pub mod routing;
pub mod site;
pub mod trip;
pub mod web;

// Re-export core types for public API
pub use cache::{DriveTimeCache, ParkCache};
pub use clustering::{Cluster, cluster_parks};
pub use config::PlannerConfig;
pub use error::{LookupFailure, PlannerError};
pub use geo::haversine_miles;
pub use models::{Coordinates, DriveTime, DriveTimes, ParkCatalog, ParkRecord};
pub use planner::{PlanOutcome, TripPlanner};
pub use providers::{DistanceProvider, GeocodeProvider, GoogleMapsClient};
pub use trip::{TripCategory, categorize};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
