//! Parsers for the two source files: the GBFS station list (JSON) and the monthly trip export
//! (CSV).
//!
//! This is the ingestion boundary. Timestamps and coordinates are validated here, so nothing
//! downstream has to handle a trip without a valid minute of day.

pub mod stations;
pub mod trips;

pub use stations::read_stations;
pub use trips::{parse_timestamp, read_trips};
