//! # station-traffic
//!
//! Time-of-day traffic for bike-share stations.
//!
//! ## Features
//!
//! - **Minute buckets**: trips are indexed once by departure and arrival minute of day
//! - **Sliding window**: counts for ±1 hour around any minute, wrapping at midnight
//! - **Per-query views**: every filter change yields a fresh, immutable count mapping
//! - **Loader** (default feature): GBFS station JSON and trip CSV parsing
//!
//! ## Example
//!
//! ```
//! use station_traffic::prelude::*;
//! use chrono::NaiveDate;
//! use geo::Point;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let trips = vec![
//!     Trip::new(day.and_hms_opt(0, 30, 0).unwrap(), day.and_hms_opt(0, 45, 0).unwrap(), "A", "B"),
//!     Trip::new(day.and_hms_opt(23, 50, 0).unwrap(), day.and_hms_opt(23, 59, 0).unwrap(), "B", "A"),
//! ];
//! let stations = vec![
//!     Station::new("A", Point::new(-71.09, 42.36)),
//!     Station::new("B", Point::new(-71.10, 42.37)),
//! ];
//!
//! let provider = StaticTrafficProvider::from_data(stations, trips);
//!
//! // One hour either side of midnight covers both trips
//! let traffic = provider.station_traffic(TimeFilter::from_slider(0).unwrap());
//! assert_eq!(traffic[0].departures(), 1);
//! assert_eq!(traffic[0].arrivals(), 1);
//! assert_eq!(format_time(MinuteOfDay::NOON), "12:00 PM");
//! ```

pub mod aggregate;
pub mod identifiers;
pub mod index;
#[cfg(feature = "loader")]
pub mod loader;
pub mod marker;
pub mod models;
pub mod provider;

// Re-exports for convenience
pub mod prelude {
    pub use crate::aggregate::{aggregate, StationCounts, StationTraffic, TrafficView};
    pub use crate::identifiers::*;
    pub use crate::index::{select_range, BucketIndex, Selection, DEFAULT_HALF_WIDTH};
    pub use crate::marker::{Marker, MarkerScale, RadiusScale};
    pub use crate::models::{
        format_time, minutes_since_midnight, MinuteOfDay, Result, Station, TimeFilter, TrafficError,
        TrafficProvider, Trip, MINUTES_PER_DAY,
    };
    pub use crate::provider::{LoadState, StaticTrafficProvider, TrafficSession};
}

pub use prelude::*;
