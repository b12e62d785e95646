use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use station_traffic::prelude::*;

/// Window totals for one center minute
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SweepRow {
    pub center: MinuteOfDay,
    pub departures: usize,
    pub arrivals: usize,
}

/// Stations ordered by total traffic (ties keep load order), at most `n`
pub fn busiest_stations(traffic: &[StationTraffic], n: usize) -> Vec<&StationTraffic> {
    let mut ranked: Vec<&StationTraffic> = traffic.iter().collect();
    ranked.sort_by_key(|s| std::cmp::Reverse(s.total_traffic()));
    ranked.truncate(n);
    ranked
}

/// Window totals centered on every full hour
pub fn hourly_sweep<P: TrafficProvider>(provider: &P) -> Result<Vec<SweepRow>> {
    let centers: Vec<MinuteOfDay> = (0..24).filter_map(|hour| MinuteOfDay::from_hm(hour, 0)).collect();

    let progress = ProgressBar::new(centers.len() as u64);
    progress.set_style(ProgressStyle::with_template("  {bar:40} {pos}/{len} {msg}")?);

    let rows = centers
        .into_iter()
        .map(|center| {
            progress.set_message(format_time(center));
            let view = provider.traffic_view(TimeFilter::Around(center));
            progress.inc(1);
            SweepRow {
                center,
                departures: view.total_departures(),
                arrivals: view.total_arrivals(),
            }
        })
        .collect();

    progress.finish_and_clear();
    log::debug!("hourly sweep finished");
    Ok(rows)
}
