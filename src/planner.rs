//! The `plan` pipeline: geocode, route, cluster, render.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::cache::{DriveTimeCache, ParkCache};
use crate::clustering::{Cluster, cluster_catalog};
use crate::config::PlannerConfig;
use crate::location_resolver::LocationResolver;
use crate::map::{map_markers, render_map};
use crate::models::{Coordinates, DriveTimes, ParkCatalog};
use crate::providers::{DistanceProvider, GeocodeProvider};
use crate::report::{ReportContext, render_report};
use crate::routing::collect_drive_times;

/// What a planning run produced
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub home: Coordinates,
    pub parks: ParkCatalog,
    pub drive_times: DriveTimes,
    pub clusters: Vec<Cluster>,
    pub report: String,
}

/// Runs the five planning steps against a pair of providers
pub struct TripPlanner<'a, G: ?Sized, D: ?Sized> {
    config: &'a PlannerConfig,
    geocoder: &'a G,
    router: &'a D,
}

impl<'a, G, D> TripPlanner<'a, G, D>
where
    G: GeocodeProvider + ?Sized,
    D: DistanceProvider + ?Sized,
{
    pub fn new(config: &'a PlannerConfig, geocoder: &'a G, router: &'a D) -> Self {
        Self {
            config,
            geocoder,
            router,
        }
    }

    pub async fn run(&self) -> Result<PlanOutcome> {
        let paths = &self.config.paths;
        let delay = self.config.google.request_delay();
        let resolver =
            LocationResolver::new(self.geocoder, &self.config.google.geocode_suffix, delay);

        info!("[1/5] Loading and geocoding parks...");
        let park_cache = ParkCache::new(&paths.parks_file);
        let mut parks = park_cache
            .load()
            .with_context(|| format!("Park file {} is required", paths.parks_file.display()))?;
        if resolver.resolve_parks(&mut parks).await > 0 {
            park_cache.store(&parks)?;
        }

        info!("[2/5] Geocoding home address...");
        let home = resolver.resolve_home(&self.config.home.address).await?;

        info!("[3/5] Calculating drive times...");
        let drive_time_cache = DriveTimeCache::new(&paths.drive_times_file);
        let mut drive_times = drive_time_cache.load_or_default()?;
        if collect_drive_times(self.router, home, &parks, &mut drive_times, delay).await > 0 {
            drive_time_cache.store(&drive_times)?;
        }

        info!("[4/5] Clustering parks for multi-day trips...");
        let clusters = cluster_catalog(&parks, self.config.clustering.threshold_miles);
        info!("  Found {} clusters", clusters.len());

        info!("[5/5] Generating map and report...");
        fs::create_dir_all(&paths.output_dir)
            .with_context(|| format!("Failed to create {}", paths.output_dir.display()))?;

        let markers = map_markers(home, &self.config.home.address, &parks, &drive_times);
        write_output(&paths.map_file, &render_map(&markers)?)?;
        info!("Map saved to: {}", paths.map_file.display());

        let context = ReportContext {
            home_address: self.config.home.address.clone(),
            threshold_miles: self.config.clustering.threshold_miles,
            map_location: paths.map_file.display().to_string(),
        };
        let report = render_report(&parks, &drive_times, &clusters, &context);
        write_output(&paths.report_file, &report)?;
        info!("Report saved to: {}", paths.report_file.display());

        Ok(PlanOutcome {
            home,
            parks,
            drive_times,
            clusters,
            report,
        })
    }
}

/// Write an output file, creating its directory when it lives outside `output_dir`
fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}
