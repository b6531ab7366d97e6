//! Data models for the ParkTrips planner
//!
//! - Location: geographic coordinates
//! - Park: entries of the park file (pending, located, failed)
//! - DriveTime: cached routes from home to each park
//! - Records: the name-keyed, order-preserving collection both files use

pub mod drive_time;
pub mod location;
pub mod park;
pub mod records;

pub use drive_time::{DriveRoute, DriveTime};
pub use location::Coordinates;
pub use park::{GeocodeFailure, PENDING_MARKER, ParkRecord};
pub use records::NamedRecords;

/// Contents of `parks.json`
pub type ParkCatalog = NamedRecords<ParkRecord>;

/// Contents of `drive_times.json`
pub type DriveTimes = NamedRecords<DriveTime>;
