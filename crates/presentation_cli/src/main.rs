//! SunSync CLI
//!
//! Command-line interface for inspecting the wire format, seeding the local
//! weather store and running a loopback simulation of the sync flow.

#![allow(clippy::print_stdout)]

mod simulate;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use domain::{ConditionCategory, ConditionCode, DisplayState, WeatherRecord, WeatherSummary};
use infrastructure::persistence::{SqliteWeatherStore, create_pool};
use infrastructure::{AppConfig, TelemetryAppConfig, init_logging};

/// SunSync CLI
#[derive(Parser)]
#[command(name = "sunsync-cli")]
#[command(
    author,
    version,
    about = "Weather summary sync between phone and watch faces",
    long_about = None
)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, env = "SUNSYNC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the wire payload for a forecast
    ///
    /// Temperatures are rounded half up before encoding.
    /// Example: sunsync-cli encode --condition 500 --high 21.6 --low 14.2
    Encode {
        /// Weather condition code
        #[arg(long)]
        condition: i32,

        /// Daily high
        #[arg(long, allow_hyphen_values = true)]
        high: f64,

        /// Daily low
        #[arg(long, allow_hyphen_values = true)]
        low: f64,
    },

    /// Decode a wire payload and print the resulting display state as JSON
    Decode {
        /// Payload text, e.g. "500::22::14"
        #[arg(allow_hyphen_values = true)]
        payload: String,
    },

    /// Show the category and assets for a condition code
    Category {
        /// Weather condition code
        #[arg(allow_hyphen_values = true)]
        code: i32,
    },

    /// Insert or replace a forecast in the local weather store
    Seed {
        /// Location (defaults to sync.location from the configuration)
        #[arg(long)]
        location: Option<String>,

        /// Weather condition code
        #[arg(long)]
        condition: i32,

        /// Daily high
        #[arg(long, allow_hyphen_values = true)]
        high: f64,

        /// Daily low
        #[arg(long, allow_hyphen_values = true)]
        low: f64,

        /// Forecast date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Run a data node and display nodes over an in-process transport
    Simulate {
        /// Number of display nodes
        #[arg(long, default_value = "2")]
        watches: usize,

        /// Index of a display node that cannot be reached (repeatable)
        #[arg(long)]
        unreachable: Vec<usize>,

        /// Keep the data node from ever connecting
        #[arg(long)]
        never_connect: bool,

        /// Run the display faces in ambient mode
        #[arg(long)]
        ambient: bool,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Describe a category and its asset pair on one line
fn describe_category(code: ConditionCode) -> String {
    let category = ConditionCategory::from_code(code);
    let assets = category.assets();
    format!(
        "{code}: {category} (scene {}, icon {})",
        assets.scene, assets.icon
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load_from(cli.config.as_deref()).context("loading configuration")?;

    init_logging(&TelemetryAppConfig {
        log_filter: log_filter_from_verbosity(cli.verbose).to_string(),
        json: config.telemetry.json,
    })?;

    match cli.command {
        Commands::Encode {
            condition,
            high,
            low,
        } => {
            let summary = WeatherSummary::from_record(&WeatherRecord::new(condition, high, low))?;
            println!("{}", String::from_utf8_lossy(&domain::encode(&summary)));
        },

        Commands::Decode { payload } => {
            let summary = domain::decode(payload.as_bytes())?;
            let state = DisplayState::from_summary(&summary, chrono::Utc::now());
            println!("{}", serde_json::to_string_pretty(&state)?);
        },

        Commands::Category { code } => {
            println!("{}", describe_category(ConditionCode::new(code)));
        },

        Commands::Seed {
            location,
            condition,
            high,
            low,
            date,
        } => {
            let location = location.unwrap_or_else(|| config.sync.location.clone());
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let pool = create_pool(&config.database)?;
            let store = SqliteWeatherStore::new(Arc::new(pool));

            store
                .upsert(&location, date, WeatherRecord::new(condition, high, low))
                .await?;
            println!(
                "Stored {condition} {high}/{low} for {location} on {date} in {}",
                config.database.path
            );
        },

        Commands::Simulate {
            watches,
            unreachable,
            never_connect,
            ambient,
        } => {
            let pool = create_pool(&config.database)?;
            let store = Arc::new(SqliteWeatherStore::new(Arc::new(pool)));
            let options = simulate::SimulationOptions {
                watches,
                unreachable,
                never_connect,
                ambient,
            };

            let outcome =
                simulate::run(store, config.sync.sender_config()?, &options).await?;

            match &outcome.report {
                Some(report) => println!(
                    "Sent {} to {} peer(s): {} delivered, {} failed",
                    String::from_utf8_lossy(&report.payload),
                    report.outcomes.len(),
                    report.delivered_count(),
                    report.failed_count()
                ),
                None => println!("Nothing sent"),
            }
            for display in &outcome.displays {
                println!(
                    "{}",
                    serde_json::json!({
                        "node": display.id.as_str(),
                        "drawn": display.drawn,
                        "state": display.state.as_ref(),
                    })
                );
            }
        },
    }

    Ok(())
}
