//! Seed-based grouping of nearby parks into trip clusters
//!
//! Clusters are star-shaped: every member lies within the threshold of the
//! park that opened the cluster, not necessarily of each other, and a park
//! that would fit better around a later seed stays where it was first taken.
//! The result therefore depends on input order, which is the park file order.

use serde::Serialize;
use tracing::debug;

use crate::geo::haversine_miles;
use crate::models::{Coordinates, ParkCatalog};

/// Default grouping radius around a seed park, in miles
pub const DEFAULT_THRESHOLD_MILES: f64 = 30.0;

/// Parks that can be visited on one trip. The first member is the seed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    pub members: Vec<String>,
}

impl Cluster {
    #[must_use]
    pub fn seed(&self) -> Option<&str> {
        self.members.first().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Parks with resolved coordinates, in file order
#[must_use]
pub fn located_parks(catalog: &ParkCatalog) -> Vec<(&str, Coordinates)> {
    catalog
        .iter()
        .filter_map(|(name, record)| record.coordinates().map(|coords| (name, coords)))
        .collect()
}

/// Greedy single pass: each unassigned park seeds a cluster and claims every
/// other unassigned park within `threshold_miles` (inclusive) of the seed.
#[must_use]
pub fn cluster_parks(parks: &[(&str, Coordinates)], threshold_miles: f64) -> Vec<Cluster> {
    let mut assigned = vec![false; parks.len()];
    let mut clusters = Vec::new();

    for (seed_idx, (seed_name, seed_coords)) in parks.iter().enumerate() {
        if assigned[seed_idx] {
            continue;
        }
        assigned[seed_idx] = true;
        let mut members = vec![seed_name.to_string()];

        for (other_idx, (other_name, other_coords)) in parks.iter().enumerate() {
            if assigned[other_idx] {
                continue;
            }
            if haversine_miles(seed_coords, other_coords) <= threshold_miles {
                assigned[other_idx] = true;
                members.push(other_name.to_string());
            }
        }

        debug!("Cluster seeded by {} has {} parks", seed_name, members.len());
        clusters.push(Cluster { members });
    }

    clusters
}

/// Cluster every located park of the catalog
#[must_use]
pub fn cluster_catalog(catalog: &ParkCatalog, threshold_miles: f64) -> Vec<Cluster> {
    cluster_parks(&located_parks(catalog), threshold_miles)
}
