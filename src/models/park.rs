//! Park entries as stored in `parks.json`

use serde::{Deserialize, Serialize};

use super::Coordinates;
use crate::error::LookupFailure;

/// Value written by hand into `parks.json` for parks that still need geocoding
pub const PENDING_MARKER: &str = "Y";

/// Geocoding outcome that produced no coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeFailure {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub error: String,
}

/// One park value in the park file.
///
/// The file mixes three shapes: `{"lat": .., "lng": ..}` once resolved,
/// `{"lat": null, "lng": null, "error": ..}` after a failed lookup, and a bare
/// string (`"Y"`) for parks waiting to be geocoded. Anything else a person
/// typed in (`null`, `false`, `0`, ..) is kept as is and never geocoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParkRecord {
    Located(Coordinates),
    Failed(GeocodeFailure),
    Marker(String),
    Other(serde_json::Value),
}

impl ParkRecord {
    #[must_use]
    pub fn pending() -> Self {
        ParkRecord::Marker(PENDING_MARKER.to_string())
    }

    #[must_use]
    pub fn failed(failure: &LookupFailure) -> Self {
        ParkRecord::Failed(GeocodeFailure {
            lat: None,
            lng: None,
            error: failure.marker(),
        })
    }

    /// Resolved coordinates, if any
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            ParkRecord::Located(coords) => Some(*coords),
            _ => None,
        }
    }

    #[must_use]
    pub fn needs_geocoding(&self) -> bool {
        matches!(self, ParkRecord::Marker(marker) if marker == PENDING_MARKER)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            ParkRecord::Failed(failure) => Some(&failure.error),
            _ => None,
        }
    }
}
