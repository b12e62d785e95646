use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use station_traffic::marker::Marker;
use std::path::Path;

/// Create a GeoJSON point Feature for a located station marker
fn marker_to_feature(marker: &Marker) -> Option<Feature> {
    let station = &marker.traffic.station;
    let location = station.location?;

    let mut properties = serde_json::Map::new();
    properties.insert("short_name".to_string(), serde_json::json!(station.short_name.as_str()));
    properties.insert("name".to_string(), serde_json::json!(station.name.as_deref()));
    properties.insert("departures".to_string(), serde_json::json!(marker.traffic.departures()));
    properties.insert("arrivals".to_string(), serde_json::json!(marker.traffic.arrivals()));
    properties.insert("total_traffic".to_string(), serde_json::json!(marker.traffic.total_traffic()));
    properties.insert("radius".to_string(), serde_json::json!(marker.radius));
    properties.insert("departure_ratio".to_string(), serde_json::json!(marker.departure_flow));
    properties.insert("title".to_string(), serde_json::json!(marker.title));

    Some(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![location.x(), location.y()]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}

/// Collect located markers into a FeatureCollection. Unlocatable stations are skipped.
pub fn markers_to_collection(markers: &[Marker]) -> FeatureCollection {
    let features: Vec<Feature> = markers.iter().filter_map(marker_to_feature).collect();

    let skipped = markers.len() - features.len();
    if skipped > 0 {
        log::warn!("Skipped {} stations without coordinates", skipped);
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Write station markers to a GeoJSON file (one Point feature per located station)
pub fn write_traffic_geojson(markers: &[Marker], output_path: &Path) -> Result<()> {
    log::info!("Writing {} station markers to {}", markers.len(), output_path.display());

    let geojson = GeoJson::from(markers_to_collection(markers));
    let json_string = serde_json::to_string_pretty(&geojson)
        .context("Failed to serialize GeoJSON")?;

    std::fs::write(output_path, json_string)
        .with_context(|| format!("Failed to write GeoJSON to {}", output_path.display()))?;

    Ok(())
}
