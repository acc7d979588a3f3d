use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tripplanner::config::LoggingConfig;
use tripplanner::{HotelTier, PlannerConfig, PlannerError, SessionStore, TripPlanner, TripRequest};

/// Plan a short trip: destination forecast, recommended spots and a cost estimate
#[derive(Parser, Debug)]
#[command(name = "tripplanner", version)]
struct Cli {
    /// Destination place name, e.g. "Bali, Indonesia"
    #[arg(long)]
    destination: String,

    /// Travel date (YYYY-MM-DD)
    #[arg(long)]
    date: NaiveDate,

    /// Origin place name; defaults to the destination itself
    #[arg(long)]
    origin: Option<String>,

    /// Hotel nights [default: from config, 1]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    nights: Option<u32>,

    /// Hotel tier [default: from config, mid]
    #[arg(long = "hotel-tier", alias = "hotel_tier", value_enum)]
    hotel_tier: Option<HotelTier>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long = "log-level")]
    log_level: Option<String>,
}

fn init_tracing(logging: &LoggingConfig, level_override: Option<&str>) {
    let level = level_override.unwrap_or(&logging.level).to_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries the JSON report only
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let _ = if logging.format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

async fn run(cli: Cli) -> Result<()> {
    let config = PlannerConfig::load_from_path(cli.config.clone())?;
    init_tracing(&config.logging, cli.log_level.as_deref());
    debug!("Loaded configuration: {:?}", config.weather);

    let mut request = TripRequest::new(cli.destination, cli.date)
        .with_nights(cli.nights.unwrap_or(config.defaults.nights))
        .with_hotel_tier(cli.hotel_tier.unwrap_or_else(|| config.defaults.tier()));
    if let Some(origin) = cli.origin {
        request = request.with_origin(origin);
    }

    let sessions = Arc::new(SessionStore::new());
    let planner = TripPlanner::from_config(&config, sessions)?;

    info!("Planning trip to {} on {}", request.destination, request.date);
    let itinerary = planner.plan(&request).await?;

    let report =
        serde_json::to_string_pretty(&itinerary).context("Failed to serialize itinerary")?;
    println!("{report}");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            if let Some(planner_error) = e.downcast_ref::<PlannerError>() {
                eprintln!("{}", planner_error.user_message());
            }
            ExitCode::FAILURE
        }
    }
}
