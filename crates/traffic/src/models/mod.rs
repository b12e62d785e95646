//! Station and trip models, time handling, and errors.

pub mod station;
pub mod time;
pub mod traits;
pub mod trip;
pub mod types;

// Re-exports for convenience
pub use station::Station;
pub use time::{format_time, minutes_since_midnight, MinuteOfDay, TimeFilter, MINUTES_PER_DAY};
pub use traits::TrafficProvider;
pub use trip::Trip;
pub use types::{Result, TrafficError};
