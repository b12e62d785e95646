//! Per-station traffic under a time filter.
//!
//! A query never touches station records or the bucket index. It produces a [`TrafficView`],
//! an immutable mapping from station id to counts, which is then joined onto whatever station
//! list the caller renders.

use std::collections::HashMap;
use std::sync::Arc;

use crate::identifiers::StationIdentifier;
use crate::index::{select_range, BucketIndex, Selection, DEFAULT_HALF_WIDTH};
use crate::models::station::Station;
use crate::models::time::TimeFilter;

/// Departures and arrivals attributed to one station
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StationCounts {
    pub departures: u32,
    pub arrivals: u32,
}

impl StationCounts {
    pub fn total_traffic(&self) -> u32 {
        self.departures + self.arrivals
    }

    /// Share of traffic that departs here; `None` for a station with no traffic
    pub fn departure_ratio(&self) -> Option<f64> {
        match self.total_traffic() {
            0 => None,
            total => Some(f64::from(self.departures) / f64::from(total)),
        }
    }
}

/// Counts for every station with at least one selected trip
#[derive(Clone, Debug, PartialEq)]
pub struct TrafficView {
    filter: TimeFilter,
    selection: Selection,
    counts: HashMap<StationIdentifier, StationCounts>,
    departures: usize,
    arrivals: usize,
}

impl TrafficView {
    /// Counts the trips in the window selected by `filter`
    pub fn compute(index: &BucketIndex, filter: TimeFilter) -> Self {
        Self::compute_with_half_width(index, filter, DEFAULT_HALF_WIDTH)
    }

    pub fn compute_with_half_width(index: &BucketIndex, filter: TimeFilter, half_width: u16) -> Self {
        let selection = select_range(filter, half_width);
        let mut counts: HashMap<StationIdentifier, StationCounts> = HashMap::new();

        let mut departures = 0;
        for trip in index.departures_in(selection) {
            counts.entry(trip.start_station_id().clone()).or_default().departures += 1;
            departures += 1;
        }

        let mut arrivals = 0;
        for trip in index.arrivals_in(selection) {
            counts.entry(trip.end_station_id().clone()).or_default().arrivals += 1;
            arrivals += 1;
        }

        tracing::debug!(
            filter = filter.slider_value(),
            departures,
            arrivals,
            stations = counts.len(),
            "computed station traffic"
        );

        Self {
            filter,
            selection,
            counts,
            departures,
            arrivals,
        }
    }

    pub fn filter(&self) -> TimeFilter {
        self.filter
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Counts for `id`; zero when no selected trip touches the station
    pub fn get(&self, id: &StationIdentifier) -> StationCounts {
        self.counts.get(id).copied().unwrap_or_default()
    }

    /// Trips departing inside the window
    pub fn total_departures(&self) -> usize {
        self.departures
    }

    /// Trips arriving inside the window
    pub fn total_arrivals(&self) -> usize {
        self.arrivals
    }

    /// Stations with non-zero counts, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&StationIdentifier, &StationCounts)> + '_ {
        self.counts.iter()
    }

    /// Attaches counts to each station, keeping input order. Stations without selected trips
    /// get zero counts.
    pub fn join<'a, I>(&self, stations: I) -> Vec<StationTraffic>
    where
        I: IntoIterator<Item = &'a Arc<Station>>,
    {
        stations
            .into_iter()
            .map(|station| StationTraffic {
                station: station.clone(),
                counts: self.get(&station.short_name),
            })
            .collect()
    }
}

/// A station together with its counts under one filter
#[derive(Clone, Debug, PartialEq)]
pub struct StationTraffic {
    pub station: Arc<Station>,
    pub counts: StationCounts,
}

impl StationTraffic {
    pub fn id(&self) -> &StationIdentifier {
        &self.station.short_name
    }

    pub fn departures(&self) -> u32 {
        self.counts.departures
    }

    pub fn arrivals(&self) -> u32 {
        self.counts.arrivals
    }

    pub fn total_traffic(&self) -> u32 {
        self.counts.total_traffic()
    }
}

/// Counts departures and arrivals per station for `filter`, preserving station order.
pub fn aggregate(stations: &[Arc<Station>], index: &BucketIndex, filter: TimeFilter) -> Vec<StationTraffic> {
    TrafficView::compute(index, filter).join(stations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::time::MinuteOfDay;
    use crate::models::trip::Trip;
    use chrono::{NaiveDate, NaiveDateTime};
    use geo::Point;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap().and_hms_opt(hour, minute, 0).unwrap()
    }

    fn stations(ids: &[&str]) -> Vec<Arc<Station>> {
        ids.iter()
            .map(|id| Arc::new(Station::new(*id, Point::new(-71.09, 42.36))))
            .collect()
    }

    fn midnight_trips() -> BucketIndex {
        BucketIndex::build(vec![
            Trip::new(at(1, 0, 30), at(1, 0, 45), "A", "B"),
            Trip::new(at(1, 23, 50), at(2, 0, 10), "B", "A"),
        ])
    }

    fn counts(traffic: &[StationTraffic]) -> Vec<(&str, u32, u32, u32)> {
        traffic
            .iter()
            .map(|t| (t.id().as_str(), t.departures(), t.arrivals(), t.total_traffic()))
            .collect()
    }

    #[test]
    fn test_midnight_window_includes_both_sides() {
        let index = midnight_trips();
        let filter = TimeFilter::Around(MinuteOfDay::MIDNIGHT);

        let traffic = aggregate(&stations(&["A", "B"]), &index, filter);
        assert_eq!(counts(&traffic), vec![("A", 1, 1, 2), ("B", 1, 1, 2)]);
    }

    #[test]
    fn test_unfiltered_counts_everything() {
        let index = midnight_trips();

        let traffic = aggregate(&stations(&["A", "B"]), &index, TimeFilter::Any);
        assert_eq!(counts(&traffic), vec![("A", 1, 1, 2), ("B", 1, 1, 2)]);
    }

    #[test]
    fn test_trip_outside_window_is_excluded() {
        let index = BucketIndex::build(vec![
            Trip::new(at(1, 6, 0), at(1, 6, 0), "A", "B"),
            Trip::new(at(1, 12, 10), at(1, 12, 30), "B", "C"),
        ]);

        let traffic = aggregate(&stations(&["A", "B", "C"]), &index, TimeFilter::Around(MinuteOfDay::NOON));
        assert_eq!(counts(&traffic), vec![("A", 0, 0, 0), ("B", 1, 0, 1), ("C", 0, 1, 1)]);
    }

    #[test]
    fn test_order_preserved_and_unknown_stations_zeroed() {
        let index = midnight_trips();

        let traffic = aggregate(&stations(&["Z", "B", "A"]), &index, TimeFilter::Any);
        assert_eq!(counts(&traffic), vec![("Z", 0, 0, 0), ("B", 1, 1, 2), ("A", 1, 1, 2)]);
    }

    #[test]
    fn test_trips_to_unlisted_stations_still_count_in_totals() {
        let index = BucketIndex::build(vec![Trip::new(at(1, 8, 0), at(1, 8, 20), "A", "X")]);
        let view = TrafficView::compute(&index, TimeFilter::Any);

        assert_eq!(view.total_departures(), 1);
        assert_eq!(view.total_arrivals(), 1);
        assert_eq!(view.get(&StationIdentifier::new("X")).arrivals, 1);
        assert_eq!(view.iter().count(), 2);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let index = midnight_trips();
        let filter = TimeFilter::Around(MinuteOfDay::new(20).unwrap());

        let first = TrafficView::compute(&index, filter);
        let second = TrafficView::compute(&index, filter);
        assert_eq!(first, second);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_departure_ratio() {
        let counts = StationCounts { departures: 3, arrivals: 1 };
        assert_eq!(counts.departure_ratio(), Some(0.75));
        assert_eq!(StationCounts::default().departure_ratio(), None);
    }
}
