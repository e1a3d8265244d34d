//! atco: CLI + web server for the airport traffic overlay.

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use comfy_table::{Cell, Table};
use tracing_subscriber::EnvFilter;

use atc_core::airports;
use atc_core::Engine;

mod upstream;
mod web;

use upstream::{now_epoch, FeedClient};

#[derive(Parser)]
#[command(name = "atco", version, about = "Airport traffic overlay engine and server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the snapshot feed and serve the overlay REST API
    Serve {
        /// Base URL of the inbound snapshot feed
        #[arg(long, env = "ATC_UPSTREAM", default_value = "http://localhost:8080")]
        upstream: String,

        /// Initial airport code
        #[arg(long, env = "ATC_AIRPORT", default_value = airports::DEFAULT_AIRPORT)]
        airport: String,

        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Bind port
        #[arg(long, env = "ATC_PORT", default_value = "3000")]
        port: u16,

        /// Seconds between snapshot polls
        #[arg(long, default_value = "2")]
        interval: u64,
    },

    /// Fetch one snapshot and print the arrival board
    Board {
        /// Base URL of the inbound snapshot feed
        #[arg(long, env = "ATC_UPSTREAM", default_value = "http://localhost:8080")]
        upstream: String,

        /// Airport code
        #[arg(long, env = "ATC_AIRPORT", default_value = airports::DEFAULT_AIRPORT)]
        airport: String,
    },

    /// List supported airports
    Airports {
        /// Filter by code or name substring
        #[arg(short, long)]
        query: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            upstream,
            airport,
            host,
            port,
            interval,
        } => cmd_serve(&upstream, &airport, &host, port, interval).await,
        Commands::Board { upstream, airport } => cmd_board(&upstream, &airport).await,
        Commands::Airports { query } => cmd_airports(query.as_deref()),
    }
}

async fn cmd_serve(upstream: &str, airport: &str, host: &str, port: u16, interval: u64) {
    let state = Arc::new(web::AppState::new(airport));
    let client = FeedClient::new(upstream);

    tracing::info!(
        airport = state.engine.lock().unwrap().airport().code,
        upstream,
        "starting overlay"
    );

    tokio::spawn(upstream::poll_loop(
        state.clone(),
        client,
        Duration::from_secs(interval.max(1)),
    ));

    web::serve(state, host, port).await;
}

async fn cmd_board(upstream: &str, airport: &str) {
    let client = FeedClient::new(upstream);
    let batch = match client.fetch_states().await {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error fetching snapshot from {upstream}: {e}");
            std::process::exit(1);
        }
    };

    let mut engine = Engine::new(airport);
    let now = now_epoch();
    engine.apply_snapshot(batch, now);
    let overlay = engine.render(now);

    println!();
    println!(
        "{} — {} aircraft, {} on approach",
        overlay.airport,
        overlay.aircraft.len(),
        overlay.arrivals.entries.len()
    );

    if let Some(banner) = &overlay.emergency {
        println!("  EMERGENCY: {} squawk {} ({})", banner.label, banner.squawk, banner.meaning);
    }
    if overlay.arrivals.runway_occupied {
        println!("  RUNWAY OCCUPIED");
    }
    println!();

    if overlay.arrivals.entries.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Flight", "Dist (nm)", "ETA (min)", "Countdown", "Advisory"]);

    for (i, entry) in overlay.arrivals.entries.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&entry.label),
            Cell::new(format!("{:.1}", entry.distance_nm)),
            Cell::new(format!("{:.1}", entry.eta_minutes)),
            Cell::new(
                overlay
                    .arrivals
                    .next_countdown_ms
                    .filter(|_| i == 0)
                    .map(format_countdown)
                    .unwrap_or("-".into()),
            ),
            Cell::new(entry.advisory.unwrap_or("-")),
        ]);
    }

    println!("{table}");
}

/// "M:SS" from a millisecond countdown.
fn format_countdown(ms: i64) -> String {
    let total = ms / 1000;
    format!("{}:{:02}", total / 60, total % 60)
}

fn cmd_airports(query: Option<&str>) {
    let hits = airports::search(query.unwrap_or(""));

    let mut table = Table::new();
    table.set_header(vec!["Code", "Name", "Country", "Lat", "Lon", "Radius (nm)"]);

    for a in hits {
        table.add_row(vec![
            Cell::new(a.code),
            Cell::new(a.name),
            Cell::new(a.country),
            Cell::new(format!("{:.4}", a.lat)),
            Cell::new(format!("{:.4}", a.lon)),
            Cell::new(a.radius_nm),
        ]);
    }

    println!("{table}");
}
