//! Drive times from home to every located park
//!
//! Results are cached by park name in `drive_times.json`. A park that already
//! has an entry, success or failure, is never queried again.

use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::error::LookupFailure;
use crate::models::{Coordinates, DriveRoute, DriveTime, DriveTimes, ParkCatalog};
use crate::providers::{DistanceProvider, pause};

/// Fill in missing drive times.
///
/// Parks without coordinates are skipped and get no entry. Returns how many
/// entries were added.
#[instrument(skip_all, fields(home = %home.format_coordinates()))]
pub async fn collect_drive_times<D: DistanceProvider + ?Sized>(
    provider: &D,
    home: Coordinates,
    parks: &ParkCatalog,
    drive_times: &mut DriveTimes,
    delay: Duration,
) -> usize {
    let mut added = 0;

    for (name, record) in parks.iter() {
        if drive_times.contains(name) {
            continue;
        }
        let Some(destination) = record.coordinates() else {
            debug!("Skipping {} without coordinates", name);
            continue;
        };

        let entry = match get_drive_time(provider, home, destination).await {
            Ok(route) => {
                info!("{}: {} ({})", name, route.duration_text, route.distance_text);
                DriveTime::Route(route)
            }
            Err(failure) => {
                warn!("No drive time for {}: {}", name, failure);
                DriveTime::failed(&failure)
            }
        };
        drive_times.insert(name, entry);
        added += 1;
        pause(delay).await;
    }

    if added == 0 {
        debug!("All drive times already cached");
    }
    added
}

async fn get_drive_time<D: DistanceProvider + ?Sized>(
    provider: &D,
    origin: Coordinates,
    destination: Coordinates,
) -> Result<DriveRoute, LookupFailure> {
    provider
        .driving_route(origin, destination)
        .await?
        .ok_or(LookupFailure::RouteUnavailable)
}
