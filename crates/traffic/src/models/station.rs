//! Bike-share stations.

use std::sync::Arc;

use geo::Point;

use crate::identifiers::StationIdentifier;

/// A docking station, keyed by its `short_name`.
///
/// Coordinates are validated once when the station is built. A station whose longitude or
/// latitude is missing, non-finite, or off the globe keeps its identity (it still receives
/// traffic counts) but has no `location`.
#[derive(Clone, Debug, PartialEq)]
pub struct Station {
    pub short_name: StationIdentifier,
    pub name: Option<Arc<str>>,
    pub location: Option<Point>,
}

impl Station {
    pub fn new(short_name: impl Into<StationIdentifier>, location: Point) -> Self {
        Self::from_coordinates(short_name, Some(location.x()), Some(location.y()))
    }

    /// Builds a station from raw lon/lat values
    pub fn from_coordinates(
        short_name: impl Into<StationIdentifier>,
        lon: Option<f64>,
        lat: Option<f64>,
    ) -> Self {
        let location = match (lon, lat) {
            (Some(lon), Some(lat)) if is_valid_coordinate(lon, lat) => Some(Point::new(lon, lat)),
            _ => None,
        };

        Self {
            short_name: short_name.into(),
            name: None,
            location,
        }
    }

    pub fn unlocatable(short_name: impl Into<StationIdentifier>) -> Self {
        Self::from_coordinates(short_name, None, None)
    }

    pub fn with_name(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(&self) -> &StationIdentifier {
        &self.short_name
    }

    pub fn is_locatable(&self) -> bool {
        self.location.is_some()
    }
}

fn is_valid_coordinate(lon: f64, lat: f64) -> bool {
    lon.is_finite() && lat.is_finite() && (-180.0..=180.0).contains(&lon) && (-90.0..=90.0).contains(&lat)
}
