use std::io::Read;

use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;

use crate::identifiers::{RideIdentifier, StationIdentifier};
use crate::models::trip::Trip;
use crate::models::types::{Result, TrafficError};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// One row of the trip export. Column names are fixed by the upstream data source; any other
/// columns (`rideable_type`, `member_casual`, ...) are ignored.
#[derive(Deserialize)]
struct TripRecord {
    #[serde(default)]
    ride_id: Option<RideIdentifier>,
    started_at: String,
    ended_at: String,
    start_station_id: StationIdentifier,
    end_station_id: StationIdentifier,
}

/// Parses a trip timestamp into wall-clock time.
///
/// Accepts `YYYY-MM-DD HH:MM:SS[.fff]`, the same with a `T` separator, `YYYY-MM-DD HH:MM`, and
/// RFC 3339 with an offset (the local time at that offset is kept).
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|ts| ts.naive_local())
        })
}

/// Reads every trip from a CSV export with a header row.
///
/// The first row with an unparseable `started_at` or `ended_at` aborts the read; no partial
/// trip list is returned.
pub fn read_trips<R: Read>(reader: R) -> Result<Vec<Trip>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers().map_err(csv_error)?.clone();

    let mut trips = Vec::new();
    let mut record = csv::StringRecord::new();
    while csv_reader.read_record(&mut record).map_err(csv_error)? {
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        let row: TripRecord = record.deserialize(Some(&headers)).map_err(csv_error)?;

        let started_at = parse_timestamp(&row.started_at)
            .ok_or_else(|| TrafficError::InvalidTimestamp { line, value: row.started_at.clone() })?;
        let ended_at = parse_timestamp(&row.ended_at)
            .ok_or_else(|| TrafficError::InvalidTimestamp { line, value: row.ended_at.clone() })?;

        let trip = Trip::new(started_at, ended_at, row.start_station_id, row.end_station_id);
        trips.push(match row.ride_id {
            Some(ride_id) => trip.with_ride_id(ride_id),
            None => trip,
        });
    }

    tracing::debug!(trips = trips.len(), "read trip export");
    Ok(trips)
}

fn csv_error(err: csv::Error) -> TrafficError {
    TrafficError::SerializationError(format!("trip CSV: {err}"))
}
