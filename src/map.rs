//! Interactive Leaflet map of the home location and every located park

use anyhow::{Context, Result};
use html_escape::encode_double_quoted_attribute;
use serde::Serialize;

use crate::models::{Coordinates, DriveTime, DriveTimes, ParkCatalog};
use crate::trip::{MarkerColor, ParkType};

/// Roughly the middle of California
const MAP_CENTER: (f64, f64) = (37.5, -119.5);
const MAP_ZOOM: u8 = 6;
const POPUP_MAX_WIDTH: u32 = 300;

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>California State Parks</title>
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.css" />
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.2.0/css/all.min.css" />
    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
    <script src="https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.js"></script>
    <style>
        html, body, #map { width: 100%; height: 100%; margin: 0; padding: 0; }
    </style>
</head>
<body>
    <div id="map"></div>
    <script>
        const map = L.map("map").setView([__CENTER_LAT__, __CENTER_LNG__], __ZOOM__);
        L.tileLayer("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png", {
            maxZoom: 18,
            attribution: "&copy; OpenStreetMap contributors"
        }).addTo(map);

        const markers = __MARKERS__;
        for (const m of markers) {
            const icon = L.AwesomeMarkers.icon({ icon: m.icon, prefix: "fa", markerColor: m.color });
            L.marker([m.lat, m.lng], { icon: icon })
                .bindPopup(m.popup, { maxWidth: __POPUP_WIDTH__ })
                .addTo(map);
        }
    </script>
</body>
</html>
"#;

/// One pin on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub lat: f64,
    pub lng: f64,
    pub color: &'static str,
    pub icon: &'static str,
    pub popup: String,
}

/// The blue home pin followed by one pin per located park, in park file order
#[must_use]
pub fn map_markers(
    home: Coordinates,
    home_address: &str,
    parks: &ParkCatalog,
    drive_times: &DriveTimes,
) -> Vec<MapMarker> {
    let home_marker = MapMarker {
        lat: home.latitude,
        lng: home.longitude,
        color: "blue",
        icon: "home",
        popup: format!("<b>Home</b><br>{}", encode_double_quoted_attribute(home_address)),
    };

    let park_markers = parks.iter().filter_map(|(name, record)| {
        let coords = record.coordinates()?;
        let drive = drive_times.get(name);
        let color = MarkerColor::for_drive_time(drive.and_then(DriveTime::duration_seconds));

        Some(MapMarker {
            lat: coords.latitude,
            lng: coords.longitude,
            color: color.name(),
            icon: ParkType::from_name(name).icon(),
            popup: park_popup(name, drive),
        })
    });

    std::iter::once(home_marker).chain(park_markers).collect()
}

fn park_popup(name: &str, drive: Option<&DriveTime>) -> String {
    let mut popup = format!("<b>{}</b><br>", encode_double_quoted_attribute(name));
    match drive {
        Some(DriveTime::Route(route)) => {
            popup.push_str(&format!(
                "Drive: {}<br>Distance: {}",
                encode_double_quoted_attribute(&route.duration_text),
                encode_double_quoted_attribute(&route.distance_text)
            ));
        }
        Some(DriveTime::Failed { .. }) => popup.push_str("<i>Route unavailable</i>"),
        None => {}
    }
    popup
}

/// Render the standalone map page
pub fn render_map(markers: &[MapMarker]) -> Result<String> {
    let markers_json =
        serde_json::to_string(markers).with_context(|| "Failed to serialize map markers")?;

    Ok(PAGE_TEMPLATE
        .replace("__CENTER_LAT__", &MAP_CENTER.0.to_string())
        .replace("__CENTER_LNG__", &MAP_CENTER.1.to_string())
        .replace("__ZOOM__", &MAP_ZOOM.to_string())
        .replace("__POPUP_WIDTH__", &POPUP_MAX_WIDTH.to_string())
        // keep a stray "</script>" in a park name from closing the block
        .replace("__MARKERS__", &markers_json.replace("</", "<\\/")))
}
