//! Marker sizing and coloring derived from station traffic.
//!
//! Radii follow a square-root scale so that marker area, not radius, tracks traffic. When a
//! time filter is active the counts are much smaller, so the radius range is widened and given
//! a non-zero floor to keep quiet stations visible.

use crate::aggregate::StationTraffic;
use crate::models::time::TimeFilter;

/// Radius ranges (in screen pixels) for unfiltered and filtered views
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerScale {
    pub unfiltered_range: (f64, f64),
    pub filtered_range: (f64, f64),
}

impl Default for MarkerScale {
    fn default() -> Self {
        Self {
            unfiltered_range: (0.0, 25.0),
            filtered_range: (3.0, 50.0),
        }
    }
}

impl MarkerScale {
    pub fn range_for(&self, filter: TimeFilter) -> (f64, f64) {
        if filter.is_filtered() {
            self.filtered_range
        } else {
            self.unfiltered_range
        }
    }

    /// Radius scale whose domain runs from zero to the busiest station in `traffic`
    pub fn radius_scale(&self, traffic: &[StationTraffic], filter: TimeFilter) -> RadiusScale {
        let max = traffic.iter().map(StationTraffic::total_traffic).max().unwrap_or(0);
        RadiusScale::new(f64::from(max), self.range_for(filter))
    }
}

/// `sqrt(0..=domain_max)` mapped linearly onto `range`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusScale {
    domain_max: f64,
    range: (f64, f64),
}

impl RadiusScale {
    pub fn new(domain_max: f64, range: (f64, f64)) -> Self {
        Self { domain_max, range }
    }

    pub fn radius(&self, total_traffic: u32) -> f64 {
        let (lo, hi) = self.range;
        let span = self.domain_max.sqrt();
        // An empty domain maps everything to the middle of the range
        let t = if span > 0.0 {
            f64::from(total_traffic).sqrt() / span
        } else {
            0.5
        };
        lo + t * (hi - lo)
    }
}

/// Departure share quantized to 0 (mostly arrivals), 0.5 (balanced) or 1 (mostly departures).
/// `None` when the station saw no traffic.
pub fn departure_flow(traffic: &StationTraffic) -> Option<f64> {
    traffic.counts.departure_ratio().map(|ratio| {
        if ratio < 1.0 / 3.0 {
            0.0
        } else if ratio < 2.0 / 3.0 {
            0.5
        } else {
            1.0
        }
    })
}

/// Hover text for a station marker
pub fn tooltip(traffic: &StationTraffic) -> String {
    format!(
        "{} trips ({} departures, {} arrivals)",
        traffic.total_traffic(),
        traffic.departures(),
        traffic.arrivals()
    )
}

/// Everything a renderer needs to draw one station
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub traffic: StationTraffic,
    pub radius: f64,
    pub departure_flow: Option<f64>,
    pub title: String,
}

/// Builds markers for every station, in the order given
pub fn markers(traffic: Vec<StationTraffic>, filter: TimeFilter, scale: &MarkerScale) -> Vec<Marker> {
    let radius_scale = scale.radius_scale(&traffic, filter);
    traffic
        .into_iter()
        .map(|traffic| Marker {
            radius: radius_scale.radius(traffic.total_traffic()),
            departure_flow: departure_flow(&traffic),
            title: tooltip(&traffic),
            traffic,
        })
        .collect()
}
