//! Minute-of-day bucket index over a full trip load.

use std::sync::Arc;

use crate::index::window::Selection;
use crate::models::time::{MinuteOfDay, MINUTES_PER_DAY};
use crate::models::trip::Trip;

const DAY: usize = MINUTES_PER_DAY as usize;

/// Trips partitioned by departure minute and, separately, by arrival minute.
///
/// Built once from the complete trip set and read-only afterwards. Every trip sits in exactly
/// one departure bucket (its start minute) and exactly one arrival bucket (its end minute).
#[derive(Clone, Debug)]
pub struct BucketIndex {
    departures_by_minute: Vec<Vec<Arc<Trip>>>,
    arrivals_by_minute: Vec<Vec<Arc<Trip>>>,
    trip_count: usize,
}

impl BucketIndex {
    pub fn build<I>(trips: I) -> Self
    where
        I: IntoIterator<Item = Trip>,
    {
        let mut departures_by_minute = vec![Vec::new(); DAY];
        let mut arrivals_by_minute = vec![Vec::new(); DAY];
        let mut trip_count = 0;

        for trip in trips {
            let trip = Arc::new(trip);
            departures_by_minute[trip.start_minute().index()].push(trip.clone());
            arrivals_by_minute[trip.end_minute().index()].push(trip);
            trip_count += 1;
        }

        tracing::debug!(trips = trip_count, "built minute bucket index");

        Self {
            departures_by_minute,
            arrivals_by_minute,
            trip_count,
        }
    }

    pub fn len(&self) -> usize {
        self.trip_count
    }

    pub fn is_empty(&self) -> bool {
        self.trip_count == 0
    }

    /// Trips departing during `minute`
    pub fn departures_at(&self, minute: MinuteOfDay) -> &[Arc<Trip>] {
        &self.departures_by_minute[minute.index()]
    }

    /// Trips arriving during `minute`
    pub fn arrivals_at(&self, minute: MinuteOfDay) -> &[Arc<Trip>] {
        &self.arrivals_by_minute[minute.index()]
    }

    /// Trips whose departure minute is selected. Only the selected buckets are visited.
    pub fn departures_in(&self, selection: Selection) -> impl Iterator<Item = &Trip> + '_ {
        buckets_in(&self.departures_by_minute, selection)
    }

    /// Trips whose arrival minute is selected. Only the selected buckets are visited.
    pub fn arrivals_in(&self, selection: Selection) -> impl Iterator<Item = &Trip> + '_ {
        buckets_in(&self.arrivals_by_minute, selection)
    }

    /// Every indexed trip, in departure-minute order
    pub fn iter(&self) -> impl Iterator<Item = &Trip> + '_ {
        self.departures_in(Selection::All)
    }
}

impl Default for BucketIndex {
    fn default() -> Self {
        Self::build(std::iter::empty())
    }
}

fn buckets_in(buckets: &[Vec<Arc<Trip>>], selection: Selection) -> impl Iterator<Item = &Trip> + '_ {
    selection
        .bucket_ranges()
        .into_iter()
        .flat_map(move |range| buckets[range].iter().flatten())
        .map(|trip| trip.as_ref())
}
