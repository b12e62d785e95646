use std::io::Read;

use serde::Deserialize;

use crate::identifiers::StationIdentifier;
use crate::models::station::Station;
use crate::models::types::{Result, TrafficError};

/// `{"data": {"stations": [...]}}`
#[derive(Deserialize)]
struct StationDocument {
    data: StationData,
}

#[derive(Deserialize)]
struct StationData {
    stations: Vec<StationRecord>,
}

#[derive(Deserialize)]
struct StationRecord {
    short_name: StationIdentifier,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    lon: Option<Coordinate>,
    #[serde(default)]
    lat: Option<Coordinate>,
}

/// Feeds publish coordinates either as numbers or as numeric strings
#[derive(Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    fn value(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// Reads the station list. Stations with unusable coordinates are kept as unlocatable.
pub fn read_stations<R: Read>(reader: R) -> Result<Vec<Station>> {
    let document: StationDocument = serde_json::from_reader(reader)
        .map_err(|err| TrafficError::SerializationError(format!("station JSON: {err}")))?;

    let stations: Vec<Station> = document
        .data
        .stations
        .into_iter()
        .map(|record| {
            let station = Station::from_coordinates(
                record.short_name,
                record.lon.as_ref().and_then(Coordinate::value),
                record.lat.as_ref().and_then(Coordinate::value),
            );
            match record.name {
                Some(name) => station.with_name(name),
                None => station,
            }
        })
        .collect();

    tracing::debug!(stations = stations.len(), "read station list");
    Ok(stations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_read_stations() {
        let json = r#"{
            "last_updated": 1710000000,
            "data": {
                "stations": [
                    {"short_name": "M32006", "name": "MIT at Mass Ave", "lon": -71.09415, "lat": 42.36027, "capacity": 27},
                    {"short_name": "A32000", "lon": "-71.0656", "lat": "42.3519"},
                    {"short_name": "X00000", "lon": "not a number", "lat": 42.0},
                    {"short_name": "Y00000"}
                ]
            }
        }"#;

        let stations = read_stations(json.as_bytes()).unwrap();
        assert_eq!(stations.len(), 4);

        assert_eq!(stations[0].short_name.as_str(), "M32006");
        assert_eq!(stations[0].name.as_deref(), Some("MIT at Mass Ave"));
        let location = stations[0].location.unwrap();
        assert_relative_eq!(location.x(), -71.09415);
        assert_relative_eq!(location.y(), 42.36027);

        assert_relative_eq!(stations[1].location.unwrap().x(), -71.0656);
        assert!(stations[1].name.is_none());

        assert!(!stations[2].is_locatable());
        assert!(!stations[3].is_locatable());
    }

    #[test]
    fn test_missing_short_name_is_an_error() {
        let json = r#"{"data": {"stations": [{"lon": -71.0, "lat": 42.0}]}}"#;
        assert!(matches!(
            read_stations(json.as_bytes()),
            Err(TrafficError::SerializationError(_))
        ));
    }

    #[test]
    fn test_wrong_document_shape_is_an_error() {
        assert!(read_stations(r#"{"stations": []}"#.as_bytes()).is_err());
        assert!(read_stations("".as_bytes()).is_err());
    }
}
