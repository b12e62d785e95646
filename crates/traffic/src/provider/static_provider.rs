//! In-memory traffic provider built from one complete load.
//!
//! Stations and the minute bucket index are built once in [`StaticTrafficProvider::from_data`]
//! and never modified afterwards; every query derives a fresh view from them.

use std::collections::HashMap;
use std::sync::Arc;

use crate::identifiers::*;
use crate::index::BucketIndex;
use crate::models::{station::Station, traits::*, trip::Trip};

/// Loaded stations plus the trip bucket index
///
/// This type is cheap to clone since all data is stored in `Arc`s.
#[derive(Clone, Debug)]
pub struct StaticTrafficProvider {
    // Core data
    stations: Vec<Arc<Station>>,
    index: Arc<BucketIndex>,

    // Lookup maps
    station_map: HashMap<StationIdentifier, Arc<Station>>,
}

impl StaticTrafficProvider {
    /// Create a new empty provider
    pub fn new() -> Self {
        Self::from_data(Vec::new(), Vec::new())
    }

    /// Build provider from parsed stations and trips
    pub fn from_data(stations: Vec<Station>, trips: Vec<Trip>) -> Self {
        let stations: Vec<Arc<Station>> = stations.into_iter().map(Arc::new).collect();

        // First station wins on duplicate ids; later duplicates still appear in `stations`
        let mut station_map = HashMap::with_capacity(stations.len());
        let mut duplicates = 0usize;
        for station in &stations {
            if station_map.contains_key(&station.short_name) {
                duplicates += 1;
                continue;
            }
            station_map.insert(station.short_name.clone(), station.clone());
        }
        if duplicates > 0 {
            tracing::warn!(duplicates, "station list contains duplicate short names");
        }

        let unlocatable = stations.iter().filter(|s| !s.is_locatable()).count();
        if unlocatable > 0 {
            tracing::warn!(unlocatable, "stations without usable coordinates");
        }

        let index = Arc::new(BucketIndex::build(trips));

        tracing::debug!(stations = stations.len(), trips = index.len(), "traffic provider ready");

        Self {
            stations,
            index,
            station_map,
        }
    }
}

impl Default for StaticTrafficProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TrafficProvider for StaticTrafficProvider {
    fn get_station(&self, id: &StationIdentifier) -> Option<Arc<Station>> {
        self.station_map.get(id).cloned()
    }

    fn all_stations(&self) -> &[Arc<Station>] {
        &self.stations
    }

    fn index(&self) -> &BucketIndex {
        &self.index
    }
}
