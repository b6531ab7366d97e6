//! Plain-text trip planning report
//!
//! The report is a pure function of the park file, the drive time cache and
//! the cluster list, so identical inputs always render identical bytes.

use std::collections::HashMap;

use crate::clustering::Cluster;
use crate::models::{DriveTime, DriveTimes, ParkCatalog};
use crate::trip::{TripCategory, categorize};

const RULE_WIDTH: usize = 60;
const NOT_AVAILABLE: &str = "N/A";

/// Values the report shows that do not come from the park data
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub home_address: String,
    pub threshold_miles: f64,
    /// Where the map was written, shown in the footer
    pub map_location: String,
}

/// A park with the drive time the report may use for it
#[derive(Debug, Clone, Copy)]
pub struct ParkEntry<'a> {
    pub name: &'a str,
    pub drive: Option<&'a DriveTime>,
}

impl ParkEntry<'_> {
    fn duration_seconds(&self) -> Option<u64> {
        self.drive.and_then(DriveTime::duration_seconds)
    }

    #[must_use]
    pub fn category(&self) -> TripCategory {
        categorize(self.duration_seconds())
    }

    fn duration_text(&self) -> &str {
        self.drive
            .and_then(DriveTime::duration_text)
            .unwrap_or(NOT_AVAILABLE)
    }

    fn distance_text(&self) -> &str {
        self.drive
            .and_then(DriveTime::distance_text)
            .unwrap_or(NOT_AVAILABLE)
    }
}

/// All parks sorted by drive time, shortest first, parks without one last.
///
/// Parks without coordinates never get a drive time here, even if the cache
/// still holds one for them.
#[must_use]
pub fn sorted_by_drive_time<'a>(
    parks: &'a ParkCatalog,
    drive_times: &'a DriveTimes,
) -> Vec<ParkEntry<'a>> {
    let mut entries: Vec<ParkEntry<'a>> = parks
        .iter()
        .map(|(name, record)| ParkEntry {
            name,
            drive: record
                .coordinates()
                .and_then(|_| drive_times.get(name)),
        })
        .collect();

    // stable: ties keep park file order
    entries.sort_by_key(|entry| match entry.duration_seconds() {
        Some(seconds) => (false, seconds),
        None => (true, 0),
    });
    entries
}

/// Partition sorted parks by trip category, keeping their order
#[must_use]
pub fn group_by_category<'a>(
    sorted: &[ParkEntry<'a>],
) -> HashMap<TripCategory, Vec<ParkEntry<'a>>> {
    let mut groups: HashMap<TripCategory, Vec<ParkEntry<'a>>> = HashMap::new();
    for entry in sorted {
        groups.entry(entry.category()).or_default().push(*entry);
    }
    groups
}

/// Clusters of two or more parks where at least one park is a multi-day trip
#[must_use]
pub fn multi_day_clusters<'a>(clusters: &'a [Cluster], drive_times: &DriveTimes) -> Vec<&'a Cluster> {
    clusters
        .iter()
        .filter(|cluster| {
            cluster.len() > 1
                && cluster.members.iter().any(|name| {
                    let duration = drive_times.get(name).and_then(DriveTime::duration_seconds);
                    categorize(duration) == TripCategory::MultiDayTrip
                })
        })
        .collect()
}

/// Render the full report text (lines joined by `\n`, no trailing newline)
#[must_use]
pub fn render_report(
    parks: &ParkCatalog,
    drive_times: &DriveTimes,
    clusters: &[Cluster],
    context: &ReportContext,
) -> String {
    let heavy_rule = "=".repeat(RULE_WIDTH);
    let light_rule = "-".repeat(RULE_WIDTH);

    let sorted = sorted_by_drive_time(parks, drive_times);
    let groups = group_by_category(&sorted);

    let mut lines: Vec<String> = Vec::new();
    lines.push(heavy_rule.clone());
    lines.push("CALIFORNIA STATE PARKS TRIP PLANNER".to_string());
    lines.push(heavy_rule.clone());
    lines.push(String::new());
    lines.push(format!("Starting from: {}", context.home_address));
    lines.push(format!("Total parks: {}", parks.len()));
    lines.push(String::new());

    lines.push(light_rule.clone());
    lines.push("SUMMARY BY TRIP TYPE".to_string());
    lines.push(light_rule.clone());
    for category in TripCategory::ALL {
        let count = groups.get(&category).map_or(0, Vec::len);
        if count > 0 {
            lines.push(format!("  {}: {} parks", category.label(), count));
        }
    }
    lines.push(String::new());

    for category in TripCategory::LISTED {
        let Some(members) = groups.get(&category) else {
            continue;
        };

        lines.push(light_rule.clone());
        lines.push(format!(
            "{}S (sorted by drive time)",
            category.label().to_uppercase()
        ));
        lines.push(light_rule.clone());
        for entry in members {
            lines.push(format!("  {}", entry.name));
            lines.push(format!(
                "    Drive: {} | Distance: {}",
                entry.duration_text(),
                entry.distance_text()
            ));
        }
        lines.push(String::new());
    }

    let trip_clusters = multi_day_clusters(clusters, drive_times);
    if !trip_clusters.is_empty() {
        lines.push(light_rule.clone());
        lines.push("SUGGESTED MULTI-DAY TRIP CLUSTERS".to_string());
        lines.push(format!(
            "(Parks within {} miles of each other)",
            context.threshold_miles
        ));
        lines.push(light_rule);

        for (number, cluster) in trip_clusters.iter().enumerate() {
            lines.push(String::new());
            lines.push(format!("  Cluster {}: ({} parks)", number + 1, cluster.len()));
            for name in &cluster.members {
                let duration = drive_times
                    .get(name)
                    .and_then(DriveTime::duration_text)
                    .unwrap_or(NOT_AVAILABLE);
                lines.push(format!("    - {name} ({duration})"));
            }
        }
    }

    lines.push(String::new());
    lines.push(heavy_rule.clone());
    lines.push(format!("Map available at: {}", context.map_location));
    lines.push(heavy_rule);

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupFailure;
    use crate::models::{Coordinates, DriveRoute, ParkRecord};

    fn route(seconds: u64, duration_text: &str, distance_text: &str) -> DriveTime {
        DriveTime::Route(DriveRoute {
            duration_seconds: seconds,
            duration_text: duration_text.to_string(),
            distance_meters: 1000,
            distance_text: distance_text.to_string(),
        })
    }

    fn located(lat: f64, lng: f64) -> ParkRecord {
        ParkRecord::Located(Coordinates::new(lat, lng))
    }

    fn context() -> ReportContext {
        ReportContext {
            home_address: "Santa Cruz, CA".to_string(),
            threshold_miles: 30.0,
            map_location: "output/parks_map.html".to_string(),
        }
    }

    fn cluster(names: &[&str]) -> Cluster {
        Cluster {
            members: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    #[test]
    fn test_summary_counts_and_unknown_not_listed() {
        let parks: ParkCatalog = [
            ("X", located(36.0, -121.0)),
            ("Y", located(40.0, -124.0)),
            ("Z", located(34.0, -118.0)),
        ]
        .into_iter()
        .collect();
        let drive_times: DriveTimes = [
            ("X", route(7200, "2 hours", "100 mi")),
            ("Y", route(21_600, "6 hours", "400 mi")),
        ]
        .into_iter()
        .collect();
        let clusters = vec![cluster(&["X"]), cluster(&["Y"]), cluster(&["Z"])];

        let report = render_report(&parks, &drive_times, &clusters, &context());

        assert!(report.contains("Total parks: 3"));
        assert!(report.contains("  Day Trip: 1 parks"));
        assert!(report.contains("  Multi-day Trip: 1 parks"));
        assert!(report.contains("  Unknown: 1 parks"));
        assert!(!report.contains("Weekend Trip:"));
        assert!(!report.contains("  Z\n"));
        assert!(!report.contains("UNKNOWNS"));
        // singleton clusters are never suggested
        assert!(!report.contains("SUGGESTED MULTI-DAY TRIP CLUSTERS"));
    }

    #[test]
    fn test_full_report_layout() {
        let parks: ParkCatalog = [
            ("Gamma SHP", located(39.0, -120.1)),
            ("Alpha SP", located(36.9, -122.0)),
            ("Delta SP", ParkRecord::pending()),
            ("Beta SB", located(39.1, -120.0)),
        ]
        .into_iter()
        .collect();
        let drive_times: DriveTimes = [
            ("Alpha SP", route(3600, "1 hour", "50 mi")),
            ("Beta SB", route(21_600, "6 hours", "380 mi")),
            ("Gamma SHP", route(23_400, "6 hours 30 mins", "400 mi")),
        ]
        .into_iter()
        .collect();
        let clusters = vec![cluster(&["Gamma SHP", "Beta SB"]), cluster(&["Alpha SP"])];

        let report = render_report(&parks, &drive_times, &clusters, &context());

        let heavy = "=".repeat(60);
        let light = "-".repeat(60);
        let expected = [
            heavy.as_str(),
            "CALIFORNIA STATE PARKS TRIP PLANNER",
            heavy.as_str(),
            "",
            "Starting from: Santa Cruz, CA",
            "Total parks: 4",
            "",
            light.as_str(),
            "SUMMARY BY TRIP TYPE",
            light.as_str(),
            "  Day Trip: 1 parks",
            "  Multi-day Trip: 2 parks",
            "  Unknown: 1 parks",
            "",
            light.as_str(),
            "DAY TRIPS (sorted by drive time)",
            light.as_str(),
            "  Alpha SP",
            "    Drive: 1 hour | Distance: 50 mi",
            "",
            light.as_str(),
            "MULTI-DAY TRIPS (sorted by drive time)",
            light.as_str(),
            "  Beta SB",
            "    Drive: 6 hours | Distance: 380 mi",
            "  Gamma SHP",
            "    Drive: 6 hours 30 mins | Distance: 400 mi",
            "",
            light.as_str(),
            "SUGGESTED MULTI-DAY TRIP CLUSTERS",
            "(Parks within 30 miles of each other)",
            light.as_str(),
            "",
            "  Cluster 1: (2 parks)",
            "    - Gamma SHP (6 hours 30 mins)",
            "    - Beta SB (6 hours)",
            "",
            heavy.as_str(),
            "Map available at: output/parks_map.html",
            heavy.as_str(),
        ]
        .join("\n");

        assert_eq!(report, expected);
    }

    #[test]
    fn test_no_clusters_leaves_double_gap_before_footer() {
        let parks: ParkCatalog = [("Solo SP", located(36.0, -121.0))].into_iter().collect();
        let drive_times: DriveTimes = [("Solo SP", route(5000, "1 hour 23 mins", "70 mi"))]
            .into_iter()
            .collect();

        let report = render_report(&parks, &drive_times, &[cluster(&["Solo SP"])], &context());
        assert!(report.ends_with(&format!(
            "    Drive: 1 hour 23 mins | Distance: 70 mi\n\n\n{}\nMap available at: output/parks_map.html\n{}",
            "=".repeat(60),
            "=".repeat(60)
        )));
    }

    #[test]
    fn test_sort_is_stable_and_missing_last() {
        let parks: ParkCatalog = [
            ("NoRoute", located(36.0, -121.0)),
            ("Slow", located(36.0, -121.0)),
            ("TieA", located(36.0, -121.0)),
            ("TieB", located(36.0, -121.0)),
            ("Failed", located(36.0, -121.0)),
        ]
        .into_iter()
        .collect();
        let drive_times: DriveTimes = [
            ("Slow", route(9000, "2 hours 30 mins", "150 mi")),
            ("TieB", route(4000, "1 hour 7 mins", "60 mi")),
            ("TieA", route(4000, "1 hour 7 mins", "60 mi")),
            ("Failed", DriveTime::failed(&LookupFailure::RouteUnavailable)),
        ]
        .into_iter()
        .collect();

        let order: Vec<&str> = sorted_by_drive_time(&parks, &drive_times)
            .iter()
            .map(|entry| entry.name)
            .collect();
        assert_eq!(order, vec!["TieA", "TieB", "Slow", "NoRoute", "Failed"]);
    }

    #[test]
    fn test_unlocated_park_stays_unknown() {
        let parks: ParkCatalog = [("Ghost SP", ParkRecord::failed(&LookupFailure::NotFound))]
            .into_iter()
            .collect();
        let drive_times: DriveTimes = [("Ghost SP", route(3600, "1 hour", "50 mi"))]
            .into_iter()
            .collect();

        let sorted = sorted_by_drive_time(&parks, &drive_times);
        assert_eq!(sorted[0].category(), TripCategory::Unknown);

        let report = render_report(&parks, &drive_times, &[], &context());
        assert!(report.contains("  Unknown: 1 parks"));
        assert!(!report.contains("DAY TRIPS"));
    }

    #[test]
    fn test_multi_day_clusters_list_every_member() {
        let drive_times: DriveTimes = [
            ("Near", route(3600, "1 hour", "50 mi")),
            ("Far", route(20_000, "5 hours 33 mins", "350 mi")),
        ]
        .into_iter()
        .collect();
        let clusters = vec![
            cluster(&["Near", "Unrouted"]),
            cluster(&["Near", "Far", "Unrouted"]),
            cluster(&["Far"]),
        ];

        let picked = multi_day_clusters(&clusters, &drive_times);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].members, vec!["Near", "Far", "Unrouted"]);
    }

    #[test]
    fn test_render_is_idempotent() {
        let parks: ParkCatalog = [("A", located(36.0, -121.0)), ("B", located(36.1, -121.0))]
            .into_iter()
            .collect();
        let drive_times: DriveTimes = [("A", route(20_000, "5 hours 33 mins", "350 mi"))]
            .into_iter()
            .collect();
        let clusters = vec![cluster(&["A", "B"])];

        let first = render_report(&parks, &drive_times, &clusters, &context());
        let second = render_report(&parks, &drive_times, &clusters, &context());
        assert_eq!(first, second);
        assert!(first.contains("    - B (N/A)"));
    }
}
