//! JSON file caches for park coordinates and drive times
//!
//! Each cache is read once when a stage starts and rewritten as a whole when
//! the stage changed anything. Entries never expire.

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;

use crate::PlannerError;
use crate::models::{DriveTimes, ParkCatalog};

const INDENT: &[u8] = b"    ";

/// A JSON document on disk holding one `T`
#[derive(Debug, Clone)]
pub struct JsonCache<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned + Default> JsonCache<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cache; a missing file is an error
    pub fn load(&self) -> Result<T> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let value = serde_json::from_str(&content).map_err(|e| {
            PlannerError::cache(format!("{} is not valid: {e}", self.path.display()))
        })?;
        tracing::debug!("Loaded cache {}", self.path.display());
        Ok(value)
    }

    /// Read the cache, starting empty when the file does not exist yet
    pub fn load_or_default(&self) -> Result<T> {
        if self.path.exists() {
            self.load()
        } else {
            tracing::debug!("No cache at {}, starting empty", self.path.display());
            Ok(T::default())
        }
    }

    /// Overwrite the whole file with pretty-printed JSON (4-space indent)
    pub fn store(&self, value: &T) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let mut buffer = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
        value
            .serialize(&mut serializer)
            .map_err(|e| PlannerError::cache(format!("Failed to serialize cache: {e}")))?;

        fs::write(&self.path, buffer)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        tracing::debug!("Wrote cache {}", self.path.display());
        Ok(())
    }
}

/// `parks.json`: park name to coordinates, failure marker or pending marker
pub type ParkCache = JsonCache<ParkCatalog>;

/// `drive_times.json`: park name to route or failure marker
pub type DriveTimeCache = JsonCache<DriveTimes>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupFailure;
    use crate::models::{Coordinates, DriveRoute, DriveTime, ParkRecord};
    use tempfile::TempDir;

    fn sample_parks() -> ParkCatalog {
        [
            ("Big Basin Redwoods SP", ParkRecord::Located(Coordinates::new(37.1726, -122.2222))),
            ("Lost Coast SB", ParkRecord::failed(&LookupFailure::NotFound)),
            ("Angel Island SP", ParkRecord::pending()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_park_cache_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let cache = ParkCache::new(temp_dir.path().join("res").join("parks.json"));

        let parks = sample_parks();
        cache.store(&parks).unwrap();
        let loaded = cache.load().unwrap();

        assert_eq!(loaded, parks);
        let names: Vec<&str> = loaded.names().collect();
        assert_eq!(
            names,
            vec!["Big Basin Redwoods SP", "Lost Coast SB", "Angel Island SP"]
        );
    }

    #[test]
    fn test_drive_time_cache_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let cache = DriveTimeCache::new(temp_dir.path().join("drive_times.json"));

        let drive_times: DriveTimes = [
            (
                "Big Basin Redwoods SP",
                DriveTime::Route(DriveRoute {
                    duration_seconds: 2460,
                    duration_text: "41 mins".to_string(),
                    distance_meters: 38_000,
                    distance_text: "23.6 mi".to_string(),
                }),
            ),
            ("Lost Coast SB", DriveTime::failed(&LookupFailure::RouteUnavailable)),
        ]
        .into_iter()
        .collect();

        cache.store(&drive_times).unwrap();
        assert_eq!(cache.load().unwrap(), drive_times);
    }

    #[test]
    fn test_writes_four_space_indent() {
        let temp_dir = TempDir::new().unwrap();
        let cache = ParkCache::new(temp_dir.path().join("parks.json"));
        let parks: ParkCatalog = [("A SP", ParkRecord::Located(Coordinates::new(1.5, 2.5)))]
            .into_iter()
            .collect();

        cache.store(&parks).unwrap();
        let written = fs::read_to_string(cache.path()).unwrap();
        assert_eq!(
            written,
            "{\n    \"A SP\": {\n        \"lat\": 1.5,\n        \"lng\": 2.5\n    }\n}"
        );
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let cache = DriveTimeCache::new(temp_dir.path().join("absent.json"));

        assert!(cache.load().is_err());
        assert!(cache.load_or_default().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_is_cache_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("parks.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ParkCache::new(&path).load().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PlannerError>(),
            Some(PlannerError::Cache { .. })
        ));
    }
}
