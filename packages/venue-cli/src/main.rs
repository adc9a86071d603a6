//! Venue discovery CLI
//!
//! Runs one discovery search and prints the JSON response to stdout.
//! Logs go to stderr; set `RUST_LOG` to change verbosity.
//!
//! ```text
//! venues --lat 44.977 --lng=-93.265 --sport volleyball --minutes 20 --isochrone
//! venues --request request.json --classify
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use venue_discovery::{
    classify_all, Coordinates, DiscoveryConfig, DiscoveryError, GeoJsonPolygon,
    SearchOrchestrator, SearchOutcome, SearchRequest, Sport,
};

#[derive(Debug, Parser)]
#[command(name = "venues", version, about = "Find sports clubs and venues within a drive time")]
struct Args {
    /// Read the whole request from a JSON file instead of flags
    #[arg(long, conflicts_with_all = ["lat", "lng", "sports", "minutes"])]
    request: Option<PathBuf>,

    /// Origin latitude
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Origin longitude
    #[arg(long, allow_negative_numbers = true)]
    lng: Option<f64>,

    /// Sport categories, most important first (repeat or comma-separate)
    #[arg(long = "sport", value_delimiter = ',')]
    sports: Vec<String>,

    /// Drive-time budget in minutes
    #[arg(long)]
    minutes: Option<f64>,

    /// GeoJSON Polygon file used as the reachability pre-filter
    #[arg(long, conflicts_with = "isochrone")]
    polygon_file: Option<PathBuf>,

    /// Generate the reachability polygon from the isochrone provider first
    #[arg(long)]
    isochrone: bool,

    /// Tag each entity as club, school, college or unknown
    #[arg(long)]
    classify: bool,

    /// Routing calls allowed in flight at once
    #[arg(long, env = "VENUES_ROUTING_CONCURRENCY", default_value_t = 1)]
    routing_concurrency: usize,

    /// Drive-time slack in minutes when accepting a routed result
    #[arg(long, env = "VENUES_TOLERANCE_MINUTES")]
    tolerance: Option<f64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,venue_discovery=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();
    let printed = match execute(&args).await {
        Ok(outcome) => render(&outcome, args.pretty).map(|json| {
            println!("{}", json);
            !outcome.is_error()
        }),
        Err(e) => Err(e),
    };

    match printed {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run one search. Request and configuration problems come back as the
/// `{ "error": ... }` outcome; only I/O failures are `Err`.
async fn execute(args: &Args) -> Result<SearchOutcome> {
    let request_body = args
        .request
        .as_deref()
        .map(|path| read_file(path, "request"))
        .transpose()?;
    let polygon_body = args
        .polygon_file
        .as_deref()
        .map(|path| read_file(path, "polygon"))
        .transpose()?;

    let mut request = match build_request(args, request_body.as_deref(), polygon_body.as_deref())
    {
        Ok(request) => request,
        Err(e) => return Ok(rejected(e)),
    };

    let orchestrator = match SearchOrchestrator::from_env(discovery_config(args)) {
        Ok(orchestrator) => orchestrator,
        Err(e) => return Ok(rejected(e)),
    };

    if args.isochrone && request.isochrone_polygon.is_none() {
        let minutes = request.drive_time_minutes.ceil().max(1.0) as u32;
        match orchestrator.reachability(request.origin, minutes).await {
            Ok(polygon) => request.isochrone_polygon = Some(polygon),
            Err(e) => tracing::warn!(error = %e, "Continuing without reachability polygon"),
        }
    }

    let mut outcome = orchestrator.respond(&request).await;
    if args.classify {
        if let SearchOutcome::Found(response) = &mut outcome {
            classify_all(&mut response.entities);
        }
    }
    Ok(outcome)
}

fn rejected(err: DiscoveryError) -> SearchOutcome {
    tracing::warn!(error = %err, "Discovery request rejected");
    SearchOutcome::Failed(err.into())
}

fn discovery_config(args: &Args) -> DiscoveryConfig {
    let config = DiscoveryConfig::default().with_routing_concurrency(args.routing_concurrency);
    match args.tolerance {
        Some(tolerance) => config.with_tolerance(tolerance),
        None => config,
    }
}

fn render(outcome: &SearchOutcome, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(outcome)
    } else {
        serde_json::to_string(outcome)
    };
    json.context("Failed to serialize response")
}

fn read_file(path: &Path, what: &str) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file {}", what, path.display()))
}

/// Build the request from a JSON body or from flags, then attach the
/// polygon file if one was given.
fn build_request(
    args: &Args,
    request_body: Option<&str>,
    polygon_body: Option<&str>,
) -> std::result::Result<SearchRequest, DiscoveryError> {
    let mut request = match request_body {
        Some(body) => SearchRequest::from_json(body)?,
        None => request_from_flags(args)?,
    };

    if let Some(body) = polygon_body {
        let polygon: GeoJsonPolygon = serde_json::from_str(body)
            .map_err(|e| DiscoveryError::validation(format!("isochronePolygon: {}", e)))?;
        request.isochrone_polygon = Some(polygon);
    }
    Ok(request)
}

fn request_from_flags(args: &Args) -> std::result::Result<SearchRequest, DiscoveryError> {
    let (Some(lat), Some(lng), Some(minutes)) = (args.lat, args.lng, args.minutes) else {
        return Err(DiscoveryError::validation(
            "--lat, --lng and --minutes are required unless --request is given",
        ));
    };
    if args.sports.is_empty() {
        return Err(DiscoveryError::validation("at least one --sport is required"));
    }

    let sports = args.sports.iter().map(|s| Sport::from(s.as_str())).collect();
    Ok(SearchRequest::new(Coordinates::new(lat, lng), sports, minutes))
}
