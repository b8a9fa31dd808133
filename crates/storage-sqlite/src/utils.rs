//! Helpers shared by the repository implementations.

use std::str::FromStr;

use log::error;
use rust_decimal::Decimal;
use vehicle_rating_core::errors::{DatabaseError, Error, Result};

/// Bound parameters per statement, below SQLite's default variable limit.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

/// Factors are stored as TEXT to keep their exact decimal value.
pub fn parse_factor(column: &str, value: &str) -> Result<Decimal> {
    Decimal::from_str(value).map_err(|e| {
        error!("Stored {} '{}' is not a decimal: {}", column, value, e);
        Error::Database(DatabaseError::Internal(format!(
            "Invalid {} '{}': {}",
            column, value, e
        )))
    })
}
