use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use vehicle_rating_core::imports::{ImportService, ImportServiceTrait};
use vehicle_rating_core::rating::{RatingService, RatingServiceTrait};
use vehicle_rating_storage_sqlite::{
    db::{self, write_actor},
    MileageBandRepository, RegionRepository, VehicleRepository,
};

use crate::config::Config;

pub struct AppState {
    pub rating_service: Arc<dyn RatingServiceTrait>,
    pub import_service: Arc<dyn ImportServiceTrait>,
}

/// Logs go to stderr so `resolve --json` output stays machine readable.
pub fn init_tracing(verbose: bool) {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let db_path = db::init(&config.database_url)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let region_repository = Arc::new(RegionRepository::new(pool.clone(), writer.clone()));
    let vehicle_repository = Arc::new(VehicleRepository::new(pool.clone(), writer.clone()));
    let mileage_repository = Arc::new(MileageBandRepository::new(pool.clone(), writer));

    let rating_service = Arc::new(RatingService::new(
        region_repository.clone(),
        vehicle_repository.clone(),
        mileage_repository.clone(),
    ));
    let import_service = Arc::new(ImportService::new(
        region_repository,
        vehicle_repository,
        mileage_repository,
    ));

    Ok(AppState {
        rating_service,
        import_service,
    })
}
