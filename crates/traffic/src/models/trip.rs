//! Completed rides between two stations.

use chrono::NaiveDateTime;

use crate::identifiers::{RideIdentifier, StationIdentifier};
use crate::models::time::{minutes_since_midnight, MinuteOfDay};

/// A single ride. Immutable once built.
///
/// The departure and arrival minutes are derived from the wall-clock timestamps at
/// construction, so they always lie in `[0, 1440)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trip {
    ride_id: Option<RideIdentifier>,
    started_at: NaiveDateTime,
    ended_at: NaiveDateTime,
    start_station_id: StationIdentifier,
    end_station_id: StationIdentifier,
    start_minute: MinuteOfDay,
    end_minute: MinuteOfDay,
}

impl Trip {
    pub fn new(
        started_at: NaiveDateTime,
        ended_at: NaiveDateTime,
        start_station_id: impl Into<StationIdentifier>,
        end_station_id: impl Into<StationIdentifier>,
    ) -> Self {
        Self {
            ride_id: None,
            started_at,
            ended_at,
            start_station_id: start_station_id.into(),
            end_station_id: end_station_id.into(),
            start_minute: minutes_since_midnight(&started_at),
            end_minute: minutes_since_midnight(&ended_at),
        }
    }

    pub fn with_ride_id(mut self, ride_id: impl Into<RideIdentifier>) -> Self {
        self.ride_id = Some(ride_id.into());
        self
    }

    pub fn ride_id(&self) -> Option<&RideIdentifier> {
        self.ride_id.as_ref()
    }

    pub fn started_at(&self) -> NaiveDateTime {
        self.started_at
    }

    pub fn ended_at(&self) -> NaiveDateTime {
        self.ended_at
    }

    pub fn start_station_id(&self) -> &StationIdentifier {
        &self.start_station_id
    }

    pub fn end_station_id(&self) -> &StationIdentifier {
        &self.end_station_id
    }

    /// Departure bucket
    pub fn start_minute(&self) -> MinuteOfDay {
        self.start_minute
    }

    /// Arrival bucket
    pub fn end_minute(&self) -> MinuteOfDay {
        self.end_minute
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_trip_minutes() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let trip = Trip::new(
            day.and_hms_opt(23, 50, 12).unwrap(),
            day.succ_opt().unwrap().and_hms_opt(0, 10, 59).unwrap(),
            "B32012",
            "A32000",
        )
        .with_ride_id("F96D5A74A3E41399");

        assert_eq!(trip.started_at().date(), day);
        assert_eq!(trip.ended_at() - trip.started_at(), chrono::Duration::seconds(20 * 60 + 47));
        assert_eq!(trip.start_minute().get(), 1430);
        assert_eq!(trip.end_minute().get(), 10);
        assert_eq!(trip.start_station_id().as_str(), "B32012");
        assert_eq!(trip.end_station_id().as_str(), "A32000");
        assert_eq!(trip.ride_id().map(|id| id.as_str()), Some("F96D5A74A3E41399"));
    }
}
