//! Location Resolution Module
//!
//! Turns park names and the home address into coordinates through a
//! [`GeocodeProvider`]. Park lookups never abort the run: failures are kept
//! as markers in the park file. The home address has no fallback.

use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::PlannerError;
use crate::error::LookupFailure;
use crate::models::{Coordinates, ParkCatalog, ParkRecord};
use crate::providers::{GeocodeProvider, pause};

/// Service for resolving park and home locations
pub struct LocationResolver<'a, G: ?Sized> {
    provider: &'a G,
    /// Appended to park names, e.g. ", California"
    query_suffix: String,
    delay: Duration,
}

impl<'a, G: GeocodeProvider + ?Sized> LocationResolver<'a, G> {
    pub fn new(provider: &'a G, query_suffix: impl Into<String>, delay: Duration) -> Self {
        Self {
            provider,
            query_suffix: query_suffix.into(),
            delay,
        }
    }

    /// Geocode every park still marked as pending.
    ///
    /// Returns how many entries changed; the caller persists the catalog when
    /// that is non-zero.
    pub async fn resolve_parks(&self, parks: &mut ParkCatalog) -> usize {
        let pending: Vec<String> = parks
            .iter()
            .filter(|(_, record)| record.needs_geocoding())
            .map(|(name, _)| name.to_string())
            .collect();

        if pending.is_empty() {
            debug!("All {} parks already geocoded", parks.len());
            return 0;
        }

        info!("Geocoding {} of {} parks", pending.len(), parks.len());
        for name in &pending {
            let record = match self.resolve_park(name).await {
                Ok(coords) => {
                    info!("Found {}: {}", name, coords.format_coordinates());
                    ParkRecord::Located(coords)
                }
                Err(failure) => {
                    warn!("Could not geocode {}: {}", name, failure);
                    ParkRecord::failed(&failure)
                }
            };
            parks.insert(name.as_str(), record);
            pause(self.delay).await;
        }

        pending.len()
    }

    async fn resolve_park(&self, name: &str) -> Result<Coordinates, LookupFailure> {
        let query = format!("{name}{}", self.query_suffix);
        debug!("Geocoding park query: {}", query);

        self.provider
            .geocode(&query)
            .await?
            .ok_or(LookupFailure::NotFound)
    }

    /// Geocode the home address. Any failure is fatal.
    pub async fn resolve_home(&self, address: &str) -> Result<Coordinates> {
        info!("Geocoding home address: {}", address);

        let result = self.provider.geocode(address).await;
        pause(self.delay).await;

        match result? {
            Some(coords) => {
                info!("Home found at {}", coords.format_coordinates());
                Ok(coords)
            }
            None => Err(PlannerError::home_not_found(address).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Answers from a fixed table and remembers every query
    struct TableGeocoder {
        answers: HashMap<String, Result<Option<Coordinates>, String>>,
        queries: Mutex<Vec<String>>,
    }

    impl TableGeocoder {
        fn new(answers: Vec<(&str, Result<Option<Coordinates>, String>)>) -> Self {
            Self {
                answers: answers
                    .into_iter()
                    .map(|(query, answer)| (query.to_string(), answer))
                    .collect(),
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GeocodeProvider for TableGeocoder {
        async fn geocode(&self, query: &str) -> Result<Option<Coordinates>> {
            self.queries.lock().unwrap().push(query.to_string());
            match self.answers.get(query) {
                Some(Ok(answer)) => Ok(*answer),
                Some(Err(message)) => Err(anyhow!(message.clone())),
                None => Ok(None),
            }
        }
    }

    #[tokio::test]
    async fn test_resolves_only_pending_parks() {
        let big_basin = Coordinates::new(37.1726, -122.2222);
        let geocoder = TableGeocoder::new(vec![
            ("Big Basin Redwoods SP, California", Ok(Some(big_basin))),
            ("Atlantis SB, California", Ok(None)),
            ("Flaky SRA, California", Err("OVER_QUERY_LIMIT".to_string())),
        ]);

        let mut parks: ParkCatalog = [
            ("Big Basin Redwoods SP", ParkRecord::pending()),
            ("Known SP", ParkRecord::Located(Coordinates::new(36.0, -121.0))),
            ("Atlantis SB", ParkRecord::pending()),
            ("Flaky SRA", ParkRecord::pending()),
            ("Skipped SP", ParkRecord::Marker("N".to_string())),
        ]
        .into_iter()
        .collect();

        let resolver = LocationResolver::new(&geocoder, ", California", Duration::ZERO);
        let changed = resolver.resolve_parks(&mut parks).await;

        assert_eq!(changed, 3);
        assert_eq!(
            parks.get("Big Basin Redwoods SP").unwrap().coordinates(),
            Some(big_basin)
        );
        assert_eq!(parks.get("Atlantis SB").unwrap().error(), Some("Not found"));
        assert_eq!(
            parks.get("Flaky SRA").unwrap().error(),
            Some("OVER_QUERY_LIMIT")
        );
        assert_eq!(
            parks.get("Skipped SP"),
            Some(&ParkRecord::Marker("N".to_string()))
        );
        // file order is untouched
        let names: Vec<&str> = parks.names().collect();
        assert_eq!(
            names,
            vec!["Big Basin Redwoods SP", "Known SP", "Atlantis SB", "Flaky SRA", "Skipped SP"]
        );
        assert_eq!(geocoder.queries.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_nothing_pending_makes_no_calls() {
        let geocoder = TableGeocoder::new(vec![]);
        let mut parks: ParkCatalog = [("Known SP", ParkRecord::Located(Coordinates::new(36.0, -121.0)))]
            .into_iter()
            .collect();

        let resolver = LocationResolver::new(&geocoder, ", California", Duration::ZERO);
        assert_eq!(resolver.resolve_parks(&mut parks).await, 0);
        assert!(geocoder.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_home_is_not_suffixed() {
        let home = Coordinates::new(36.9741, -122.0308);
        let geocoder = TableGeocoder::new(vec![("Santa Cruz, CA", Ok(Some(home)))]);

        let resolver = LocationResolver::new(&geocoder, ", California", Duration::ZERO);
        assert_eq!(resolver.resolve_home("Santa Cruz, CA").await.unwrap(), home);
    }

    #[tokio::test]
    async fn test_home_not_found_is_fatal() {
        let geocoder = TableGeocoder::new(vec![]);
        let resolver = LocationResolver::new(&geocoder, ", California", Duration::ZERO);

        let err = resolver.resolve_home("Nowhere").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PlannerError>(),
            Some(PlannerError::HomeNotFound { .. })
        ));
    }
}
