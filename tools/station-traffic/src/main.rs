use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

mod output;
mod report;

use output::write_traffic_geojson;
use report::{busiest_stations, hourly_sweep};
use station_traffic::loader::{read_stations, read_trips};
use station_traffic::marker::{markers, MarkerScale};
use station_traffic::prelude::*;

#[derive(Parser, Debug)]
#[command(
    name = "station-traffic",
    author,
    version,
    about = "Compute time-of-day traffic for bike-share stations",
    long_about = "Loads a GBFS station list and a trip CSV export, counts departures and arrivals \
                  per station within one hour either side of the chosen time of day, and writes \
                  the result as GeoJSON points sized and colored for a map overlay.\n\n\
                  Windows wrap around midnight: a time of 00:00 covers 23:00 through 00:59."
)]
struct Args {
    /// Station list JSON ({"data": {"stations": [...]}})
    #[arg(short, long)]
    stations: PathBuf,

    /// Trip CSV export (started_at, ended_at, start_station_id, end_station_id)
    #[arg(short, long)]
    trips: PathBuf,

    /// Window center: `any`/-1 for all trips, a minute of day (0-1439), or HH:MM
    #[arg(long, default_value = "any", allow_hyphen_values = true)]
    time: TimeFilter,

    /// Output GeoJSON file of station markers
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log the N busiest stations for the selected time
    #[arg(long)]
    top: Option<usize>,

    /// Log counts for these station short names
    #[arg(long = "station", value_name = "ID")]
    stations_of_interest: Vec<String>,

    /// Also compute window totals for every hour of the day
    #[arg(long)]
    sweep: bool,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    log::info!("=== Station Traffic ===");
    log::info!("Stations: {}", args.stations.display());
    log::info!("Trips: {}", args.trips.display());

    for path in [&args.stations, &args.trips] {
        if !path.exists() {
            bail!("Input file does not exist: {}", path.display());
        }
    }
    if args.top == Some(0) {
        bail!("--top must be at least 1");
    }

    // Phase 1: Load both sources; any failure aborts before anything is computed
    log::info!("");
    log::info!("Phase 1: Loading stations and trips...");
    let stations = read_stations(open(&args.stations)?).context("Failed to read station list")?;
    log::info!("  Read {} stations", stations.len());
    let trips = read_trips(open(&args.trips)?).context("Failed to read trip export")?;
    log::info!("  Read {} trips", trips.len());
    let first_start = trips.iter().map(|trip| trip.started_at()).min();
    let last_end = trips.iter().map(|trip| trip.ended_at()).max();
    if let (Some(first), Some(last)) = (first_start, last_end) {
        log::info!("  Trips span {} to {}", first, last);
    }

    // Phase 2: Build the minute bucket index
    log::info!("");
    log::info!("Phase 2: Indexing trips by minute of day...");
    let provider = StaticTrafficProvider::from_data(stations, trips);
    log::info!("  Indexed {} trips", provider.index().len());

    // Phase 3: Aggregate for the requested window
    log::info!("");
    log::info!("Phase 3: Counting traffic for {}...", args.time);
    let view = provider.traffic_view(args.time);
    if let Some(center) = args.time.center() {
        log::debug!("  Window centered on minute {} ({:?})", center.get(), view.selection());
        if view.selection().wraps_midnight() {
            log::info!("  Window wraps midnight");
        }
    }
    log::info!(
        "  {} departures and {} arrivals in window",
        view.total_departures(),
        view.total_arrivals()
    );
    let traffic = view.join(provider.all_stations());

    if let Some(n) = args.top {
        log::info!("");
        log::info!("Busiest stations ({}):", args.time);
        for (rank, station) in busiest_stations(&traffic, n).iter().enumerate() {
            log::info!(
                "  {:>3}. {:<10} {:>6} total ({} departures, {} arrivals)",
                rank + 1,
                station.id().as_str(),
                station.total_traffic(),
                station.departures(),
                station.arrivals()
            );
        }
    }

    if !args.stations_of_interest.is_empty() {
        log::info!("");
        for id in &args.stations_of_interest {
            let station = provider
                .traffic_at(&StationIdentifier::new(id.as_str()), args.time)
                .with_context(|| format!("Failed to look up --station {id}"))?;
            log::info!(
                "  {} ({}): {} departures, {} arrivals",
                station.id(),
                station.station.name.as_deref().unwrap_or("unnamed"),
                station.departures(),
                station.arrivals()
            );
        }
    }

    if args.sweep {
        log::info!("");
        log::info!("Hourly sweep:");
        for row in hourly_sweep(&provider)? {
            log::info!(
                "  {:>8}  {:>7} departures  {:>7} arrivals",
                format_time(row.center),
                row.departures,
                row.arrivals
            );
        }
    }

    // Phase 4: Write markers
    if let Some(output_path) = &args.output {
        log::info!("");
        log::info!("Phase 4: Writing output...");
        let markers = markers(traffic, args.time, &MarkerScale::default());
        write_traffic_geojson(&markers, output_path).context("Failed to write station GeoJSON")?;
        log::info!("Output written to: {}", output_path.display());
    }

    log::info!("Done!");

    Ok(())
}
