mod config;
mod main_lib;
mod output;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::Config;
use main_lib::{build_state, init_tracing, AppState};
use vehicle_rating_core::imports::ImportSources;
use vehicle_rating_core::Error;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_NOT_RATED: i32 = 2;
const EXIT_INVALID_INPUT: i32 = 3;
const EXIT_BAND_ISSUES: i32 = 4;
const EXIT_IMPORT_INCOMPLETE: i32 = 5;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Import postcodes, region, vehicle and mileage factors from CSV files
    Import {
        /// Directory holding the four reference CSV files
        #[arg(long)]
        csv_dir: Option<PathBuf>,
    },
    /// Resolve the rating factors for one request
    Resolve {
        postcode: String,
        vehicle_type: String,
        #[arg(allow_negative_numbers = true)]
        annual_mileage: i64,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report gaps and overlaps in the stored mileage bands
    CheckBands,
}

#[derive(Parser, Debug)]
#[command(name = "vehicle-rating")]
#[command(about = "Vehicle rating factor resolution", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// SQLite database path (overrides DATABASE_URL)
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            exit_code_for(&err)
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let csv_override = match &cli.command {
        Commands::Import { csv_dir } => csv_dir.clone(),
        _ => None,
    };
    let config = Config::from_env().with_overrides(cli.database_url, csv_override);
    let state = build_state(&config)
        .await
        .context("Failed to open the rating database")?;

    match cli.command {
        Commands::Import { .. } => import(&state, &config).await,
        Commands::Resolve {
            postcode,
            vehicle_type,
            annual_mileage,
            json,
        } => resolve(&state, &postcode, &vehicle_type, annual_mileage, json),
        Commands::CheckBands => check_bands(&state),
    }
}

async fn import(state: &AppState, config: &Config) -> anyhow::Result<i32> {
    tracing::info!("Importing reference data from {}", config.csv_dir.display());
    let sources = ImportSources::from_dir(&config.csv_dir);
    let report = state.import_service.run_import(&sources).await;
    print!("{}", output::format_import_report(&report));

    if report.is_success() {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_IMPORT_INCOMPLETE)
    }
}

fn resolve(
    state: &AppState,
    postcode: &str,
    vehicle_type: &str,
    annual_mileage: i64,
    json: bool,
) -> anyhow::Result<i32> {
    let result = state
        .rating_service
        .resolve(postcode, vehicle_type, annual_mileage)
        .with_context(|| {
            format!(
                "Cannot rate postcode '{}', vehicle type '{}', mileage {}",
                postcode, vehicle_type, annual_mileage
            )
        })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", output::format_rating(&result));
    }
    Ok(EXIT_SUCCESS)
}

fn check_bands(state: &AppState) -> anyhow::Result<i32> {
    let issues = state
        .rating_service
        .check_mileage_bands()
        .context("Failed to load mileage bands")?;
    print!("{}", output::format_band_issues(&issues));

    if issues.is_empty() {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_BAND_ISSUES)
    }
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<Error>() {
        Some(Error::Rating(_)) => EXIT_NOT_RATED,
        Some(Error::Validation(_)) => EXIT_INVALID_INPUT,
        _ => EXIT_FAILURE,
    }
}
