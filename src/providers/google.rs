//! Google Maps web service client
//!
//! Geocoding API for park and home lookups, Distance Matrix API for driving
//! routes. Requests are plain HTTPS GETs with JSON responses; no retries are
//! attempted, a failure is reported once and the caller records it.

use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::{DistanceProvider, GeocodeProvider};
use crate::PlannerError;
use crate::config::GoogleConfig;
use crate::models::{Coordinates, DriveRoute};

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Google Maps API client
pub struct GoogleMapsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GoogleMapsClient {
    /// Create a client; fails when no API key is configured
    pub fn new(config: &GoogleConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| PlannerError::config("Google Maps API key is required"))?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("ParkTrips/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET an endpoint and decode the JSON body
    async fn get_json<T: for<'de> Deserialize<'de>>(&self, endpoint: &str, query: &str) -> Result<T> {
        let url = format!(
            "{}/{endpoint}/json?{query}&key={}",
            self.base_url, self.api_key
        );
        debug!("Google Maps request: {}/{endpoint}/json?{query}", self.base_url);

        let start_time = Instant::now();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request to {endpoint} failed: {}", e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlannerError::api(format!("{endpoint} returned HTTP {status}")).into());
        }

        let body = response
            .json::<T>()
            .await
            .map_err(|e| anyhow!("Invalid {endpoint} response: {}", e.without_url()))?;

        let elapsed = start_time.elapsed();
        debug!("{} answered in {:.3}s", endpoint, elapsed.as_secs_f64());
        if elapsed.as_secs() > 5 {
            warn!("Slow {} response: {:.3}s", endpoint, elapsed.as_secs_f64());
        }

        Ok(body)
    }
}

#[async_trait]
impl GeocodeProvider for GoogleMapsClient {
    #[instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<Option<Coordinates>> {
        let response: GeocodeResponse = self
            .get_json("geocode", &format!("address={}", urlencoding::encode(query)))
            .await?;
        let coords = response.best_match()?;

        match coords {
            Some(coords) => info!("Found {} at {}", query, coords.format_coordinates()),
            None => warn!("No geocoding results for '{}'", query),
        }
        Ok(coords)
    }
}

#[async_trait]
impl DistanceProvider for GoogleMapsClient {
    #[instrument(skip(self), fields(origin = %origin.format_coordinates(), destination = %destination.format_coordinates()))]
    async fn driving_route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Option<DriveRoute>> {
        let query = format!(
            "origins={}&destinations={}&mode=driving",
            urlencoding::encode(&origin.as_waypoint()),
            urlencoding::encode(&destination.as_waypoint())
        );
        let response: DistanceMatrixResponse = self.get_json("distancematrix", &query).await?;
        response.first_route()
    }
}

/// Map a non-OK top-level status to an error
fn check_status(status: &str, error_message: Option<&str>) -> Result<()> {
    match status {
        STATUS_OK | STATUS_ZERO_RESULTS => Ok(()),
        other => match error_message {
            Some(message) => Err(anyhow!("{other}: {message}")),
            None => Err(anyhow!("{other}")),
        },
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Coordinates,
}

impl GeocodeResponse {
    fn best_match(self) -> Result<Option<Coordinates>> {
        check_status(&self.status, self.error_message.as_deref())?;
        Ok(self
            .results
            .into_iter()
            .next()
            .map(|result| result.geometry.location))
    }
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixResponse {
    status: String,
    #[serde(default)]
    rows: Vec<MatrixRow>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct MatrixElement {
    status: String,
    duration: Option<TextValue>,
    distance: Option<TextValue>,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    value: u64,
    text: String,
}

impl DistanceMatrixResponse {
    fn first_route(self) -> Result<Option<DriveRoute>> {
        check_status(&self.status, self.error_message.as_deref())?;

        let element = self
            .rows
            .into_iter()
            .next()
            .and_then(|row| row.elements.into_iter().next())
            .ok_or_else(|| anyhow!("Distance matrix response has no elements"))?;

        if element.status != STATUS_OK {
            debug!("Route element status {}", element.status);
            return Ok(None);
        }

        match (element.duration, element.distance) {
            (Some(duration), Some(distance)) => Ok(Some(DriveRoute {
                duration_seconds: duration.value,
                duration_text: duration.text,
                distance_meters: distance.value,
                distance_text: distance.text,
            })),
            _ => Err(anyhow!("Route element is missing duration or distance")),
        }
    }
}
