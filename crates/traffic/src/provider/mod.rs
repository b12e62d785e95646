//! Traffic providers and the load session.

pub mod session;
pub mod static_provider;

pub use session::{LoadState, TrafficSession};
pub use static_provider::StaticTrafficProvider;
