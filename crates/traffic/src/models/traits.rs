//! Provider interface consumed by map front ends.
//!
//! Implementations own a fully loaded station list and trip index; a provider that exists is
//! always ready to answer queries.

use std::sync::Arc;

use crate::aggregate::{StationTraffic, TrafficView};
use crate::identifiers::StationIdentifier;
use crate::index::BucketIndex;
use crate::models::station::Station;
use crate::models::time::TimeFilter;
use crate::models::types::{Result, TrafficError};

pub trait TrafficProvider: Send + Sync {
    // ---- Lookups ----
    fn get_station(&self, id: &StationIdentifier) -> Option<Arc<Station>>;

    // ---- Collections ----

    /// Stations in load order
    fn all_stations(&self) -> &[Arc<Station>];

    fn index(&self) -> &BucketIndex;

    // ---- Traffic queries ----

    /// Per-station counts for the window selected by `filter`
    fn traffic_view(&self, filter: TimeFilter) -> TrafficView {
        TrafficView::compute(self.index(), filter)
    }

    /// Every station, in load order, with counts for `filter`
    fn station_traffic(&self, filter: TimeFilter) -> Vec<StationTraffic> {
        self.traffic_view(filter).join(self.all_stations())
    }

    /// Counts for a single station. Fails for an id missing from the station list, even when
    /// trips reference it.
    fn traffic_at(&self, id: &StationIdentifier, filter: TimeFilter) -> Result<StationTraffic> {
        let station = self
            .get_station(id)
            .ok_or_else(|| TrafficError::StationNotFound(id.clone()))?;
        let counts = self.traffic_view(filter).get(id);
        Ok(StationTraffic { station, counts })
    }
}
