//! Trip length buckets derived from the drive time to a park

use std::fmt;

use serde::Serialize;

const DAY_TRIP_LIMIT_SECONDS: u64 = 3 * 3600;
const WEEKEND_TRIP_LIMIT_SECONDS: u64 = 5 * 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TripCategory {
    DayTrip,
    WeekendTrip,
    MultiDayTrip,
    Unknown,
}

impl TripCategory {
    /// Every category in report order
    pub const ALL: [TripCategory; 4] = [
        TripCategory::DayTrip,
        TripCategory::WeekendTrip,
        TripCategory::MultiDayTrip,
        TripCategory::Unknown,
    ];

    /// Categories that get a detailed listing in the report
    pub const LISTED: [TripCategory; 3] = [
        TripCategory::DayTrip,
        TripCategory::WeekendTrip,
        TripCategory::MultiDayTrip,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TripCategory::DayTrip => "Day Trip",
            TripCategory::WeekendTrip => "Weekend Trip",
            TripCategory::MultiDayTrip => "Multi-day Trip",
            TripCategory::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TripCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Bucket a one-way drive time: under 3h is a day trip, under 5h a weekend,
/// anything longer a multi-day trip.
#[must_use]
pub fn categorize(duration_seconds: Option<u64>) -> TripCategory {
    match duration_seconds {
        None => TripCategory::Unknown,
        Some(seconds) if seconds < DAY_TRIP_LIMIT_SECONDS => TripCategory::DayTrip,
        Some(seconds) if seconds < WEEKEND_TRIP_LIMIT_SECONDS => TripCategory::WeekendTrip,
        Some(_) => TripCategory::MultiDayTrip,
    }
}

const GREEN_LIMIT_SECONDS: u64 = 2 * 3600;
const ORANGE_LIMIT_SECONDS: u64 = 4 * 3600;

/// Map marker colour for a drive time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerColor {
    Green,
    Orange,
    Red,
    Gray,
}

impl MarkerColor {
    #[must_use]
    pub fn for_drive_time(duration_seconds: Option<u64>) -> Self {
        match duration_seconds {
            None => MarkerColor::Gray,
            Some(seconds) if seconds < GREEN_LIMIT_SECONDS => MarkerColor::Green,
            Some(seconds) if seconds < ORANGE_LIMIT_SECONDS => MarkerColor::Orange,
            Some(_) => MarkerColor::Red,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MarkerColor::Green => "green",
            MarkerColor::Orange => "orange",
            MarkerColor::Red => "red",
            MarkerColor::Gray => "gray",
        }
    }
}

/// Kind of park, read off the unit designation in its name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParkType {
    Historical,
    Beach,
    Recreation,
    Reserve,
    Park,
}

impl ParkType {
    /// Substring match; the first designation found wins, so
    /// "SHP" is checked before "SB".
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.contains("SHP") {
            ParkType::Historical
        } else if name.contains("SB") {
            ParkType::Beach
        } else if name.contains("SRA") {
            ParkType::Recreation
        } else if name.contains("SNR") {
            ParkType::Reserve
        } else {
            ParkType::Park
        }
    }

    /// Font Awesome icon name
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            ParkType::Historical => "landmark",
            ParkType::Beach => "umbrella-beach",
            ParkType::Recreation => "campground",
            ParkType::Reserve => "leaf",
            ParkType::Park => "tree",
        }
    }
}
