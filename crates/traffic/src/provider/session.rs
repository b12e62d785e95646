//! Load lifecycle around a provider.
//!
//! The slider can fire before the station and trip loads have finished. Until a load succeeds
//! every traffic request is a no-op; a failed load stays failed until the session is reset and
//! loaded again from scratch.

use crate::aggregate::{StationTraffic, TrafficView};
use crate::models::{station::Station, time::TimeFilter, traits::TrafficProvider, trip::Trip, types::*};
use crate::provider::static_provider::StaticTrafficProvider;

#[derive(Clone, Debug, Default)]
pub enum LoadState {
    #[default]
    Pending,
    Ready(StaticTrafficProvider),
    Failed(String),
}

#[derive(Clone, Debug, Default)]
pub struct TrafficSession {
    state: LoadState,
}

impl TrafficSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, LoadState::Ready(_))
    }

    pub fn provider(&self) -> Option<&StaticTrafficProvider> {
        match &self.state {
            LoadState::Ready(provider) => Some(provider),
            _ => None,
        }
    }

    /// Records the outcome of the station and trip loads.
    ///
    /// Only a pending session accepts a result; once ready or failed the call is ignored and
    /// `false` is returned.
    pub fn complete(&mut self, loaded: Result<(Vec<Station>, Vec<Trip>)>) -> bool {
        if !matches!(self.state, LoadState::Pending) {
            tracing::warn!("ignoring load result for a session that already finished loading");
            return false;
        }

        self.state = match loaded {
            Ok((stations, trips)) => LoadState::Ready(StaticTrafficProvider::from_data(stations, trips)),
            Err(err) => {
                tracing::error!(error = %err, "failed to load station traffic data");
                LoadState::Failed(err.to_string())
            }
        };
        true
    }

    /// Loads the station JSON and trip CSV from readers and completes the session
    #[cfg(feature = "loader")]
    pub fn load_from_readers<S, T>(&mut self, stations: S, trips: T) -> bool
    where
        S: std::io::Read,
        T: std::io::Read,
    {
        let loaded = crate::loader::read_stations(stations)
            .and_then(|stations| Ok((stations, crate::loader::read_trips(trips)?)));
        self.complete(loaded)
    }

    /// Drops any loaded data so a fresh load can be attempted
    pub fn reset(&mut self) {
        self.state = LoadState::Pending;
    }

    /// `None` until the session is ready
    pub fn traffic_view(&self, filter: TimeFilter) -> Option<TrafficView> {
        self.provider().map(|provider| provider.traffic_view(filter))
    }

    /// `None` until the session is ready
    pub fn station_traffic(&self, filter: TimeFilter) -> Option<Vec<StationTraffic>> {
        self.provider().map(|provider| provider.station_traffic(filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use geo::Point;

    fn loaded() -> Result<(Vec<Station>, Vec<Trip>)> {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        Ok((
            vec![Station::new("A", Point::new(-71.0, 42.3)), Station::new("B", Point::new(-71.1, 42.4))],
            vec![Trip::new(day.and_hms_opt(9, 0, 0).unwrap(), day.and_hms_opt(9, 10, 0).unwrap(), "A", "B")],
        ))
    }

    #[test]
    fn test_requests_before_load_are_ignored() {
        let session = TrafficSession::new();
        assert!(!session.is_ready());
        assert!(session.station_traffic(TimeFilter::Any).is_none());
        assert!(session.traffic_view(TimeFilter::Any).is_none());
    }

    #[test]
    fn test_successful_load() {
        let mut session = TrafficSession::new();
        assert!(session.complete(loaded()));
        assert!(session.is_ready());

        let traffic = session.station_traffic(TimeFilter::Any).unwrap();
        assert_eq!(traffic.len(), 2);
        assert_eq!(traffic[0].departures(), 1);
        assert_eq!(traffic[1].arrivals(), 1);

        // A second load result does not replace the first
        assert!(!session.complete(Ok((vec![], vec![]))));
        assert_eq!(session.station_traffic(TimeFilter::Any).unwrap().len(), 2);
    }

    #[test]
    fn test_failed_load_is_terminal_until_reset() {
        let mut session = TrafficSession::new();
        session.complete(Err(TrafficError::InvalidData("stations unavailable".into())));

        assert!(matches!(session.state(), LoadState::Failed(reason) if reason.contains("stations unavailable")));
        assert!(session.station_traffic(TimeFilter::Any).is_none());
        assert!(!session.complete(loaded()));

        session.reset();
        assert!(session.complete(loaded()));
        assert!(session.is_ready());
    }

    #[test]
    #[cfg(feature = "loader")]
    fn test_load_from_readers() {
        let stations = r#"{"data": {"stations": [{"short_name": "A", "lon": -71.0, "lat": 42.3}]}}"#;
        let trips = "started_at,ended_at,start_station_id,end_station_id\n\
                     2024-03-01 07:59:00,2024-03-01 08:10:00,A,A\n";

        let mut session = TrafficSession::new();
        assert!(session.load_from_readers(stations.as_bytes(), trips.as_bytes()));

        let traffic = session.station_traffic("08:00".parse().unwrap()).unwrap();
        assert_eq!(traffic[0].total_traffic(), 2);
    }

    #[test]
    #[cfg(feature = "loader")]
    fn test_bad_trip_file_fails_the_load() {
        let stations = r#"{"data": {"stations": [{"short_name": "A", "lon": -71.0, "lat": 42.3}]}}"#;
        let trips = "started_at,ended_at,start_station_id,end_station_id\nnot a date,2024-03-01 08:10:00,A,A\n";

        let mut session = TrafficSession::new();
        session.load_from_readers(stations.as_bytes(), trips.as_bytes());
        assert!(matches!(session.state(), LoadState::Failed(_)));
    }
}
