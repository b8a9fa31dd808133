//! Loaders for the reference data CSV files.
//!
//! All files tolerate padded header names, padded values and values wrapped in
//! double quotes after padding (`  "Bayern", 1.6`). Blank lines are skipped.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::constants::{
    MILEAGE_FACTOR_COLUMN, MILEAGE_FROM_COLUMN, MILEAGE_TO_COLUMN, OPEN_ENDED_MARKER,
    POSTCODE_CODE_INDEX, POSTCODE_DIGITS, POSTCODE_REGION_INDEX, REGION_FACTOR_COLUMN,
    REGION_NAME_COLUMN, VEHICLE_FACTOR_COLUMN, VEHICLE_TYPE_COLUMN,
};
use crate::errors::{Result, ValidationError};

use super::import_model::{MileageFactorRecord, PostcodeRecord, VehicleFactorRecord};

lazy_static! {
    /// First run of exactly `POSTCODE_DIGITS` digits inside a raw postcode cell
    static ref POSTCODE_REGEX: Regex =
        Regex::new(&format!(r"\d{{{}}}", POSTCODE_DIGITS)).expect("Invalid regex pattern");
}

/// A data row with its 1-based line number in the source file.
struct Row {
    line: u64,
    values: Vec<String>,
}

/// A headered CSV file reduced to the requested columns.
struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Reads `path` and checks that every column in `required` is present.
    /// Returned rows hold the required columns only, in the requested order.
    fn read(path: &Path, required: &[&str]) -> Result<Self> {
        let mut reader = open_reader(path, true)?;

        let headers: Vec<String> = reader.headers()?.iter().map(clean_value).collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(ValidationError::EmptyInput(path.display().to_string()).into());
        }

        let mut indices = Vec::with_capacity(required.len());
        let mut missing = Vec::new();
        for column in required {
            match headers.iter().position(|h| h == column) {
                Some(index) => indices.push(index),
                None => missing.push(*column),
            }
        }
        if !missing.is_empty() {
            return Err(ValidationError::MissingColumns(missing.join(", ")).into());
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let Some(row) = to_row(&record?) else {
                continue;
            };
            let values = indices
                .iter()
                .map(|&index| row.values.get(index).cloned().unwrap_or_default())
                .collect();
            rows.push(Row {
                line: row.line,
                values,
            });
        }

        Ok(Table { rows })
    }
}

fn open_reader(path: &Path, has_headers: bool) -> Result<csv::Reader<File>> {
    let file = File::open(path)?;
    Ok(ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(file))
}

/// Converts a record to a row, or `None` when every cell is blank.
fn to_row(record: &StringRecord) -> Option<Row> {
    let values: Vec<String> = record.iter().map(clean_value).collect();
    if values.iter().all(|v| v.is_empty()) {
        return None;
    }
    let line = record.position().map(|p| p.line()).unwrap_or_default();
    Some(Row { line, values })
}

fn clean_value(raw: &str) -> String {
    raw.trim().trim_matches('"').trim().to_string()
}

fn parse_factor(value: &str, column: &str, line: u64) -> Result<Decimal> {
    let factor = Decimal::from_str(value).map_err(|_| {
        ValidationError::InvalidInput(format!(
            "line {}: column {} is not a number: '{}'",
            line, column, value
        ))
    })?;
    if factor <= Decimal::ZERO {
        return Err(ValidationError::InvalidInput(format!(
            "line {}: column {} must be positive, got {}",
            line, column, factor
        ))
        .into());
    }
    Ok(factor)
}

/// Parses a whole number, accepting decimal spellings such as `10001.0`.
fn parse_whole_number(value: &str, column: &str, line: u64) -> Result<i64> {
    if let Ok(number) = value.parse::<i64>() {
        return Ok(number);
    }
    Decimal::from_str(value)
        .ok()
        .filter(|d| d.fract().is_zero())
        .and_then(|d| d.to_i64())
        .ok_or_else(|| {
            ValidationError::InvalidInput(format!(
                "line {}: column {} is not a whole number: '{}'",
                line, column, value
            ))
            .into()
        })
}

fn require_value<'a>(value: &'a str, column: &str, line: u64) -> Result<&'a str> {
    if value.is_empty() {
        return Err(ValidationError::MissingField(format!("{} (line {})", column, line)).into());
    }
    Ok(value)
}

/// Loads the region name to region factor mapping.
///
/// When a region appears twice the later row wins.
pub fn load_region_factors(path: &Path) -> Result<BTreeMap<String, Decimal>> {
    info!("Loading region factors from CSV: {}", path.display());
    let table = Table::read(path, &[REGION_NAME_COLUMN, REGION_FACTOR_COLUMN])?;

    let mut factors = BTreeMap::new();
    for row in &table.rows {
        let region = require_value(&row.values[0], REGION_NAME_COLUMN, row.line)?;
        let factor = parse_factor(&row.values[1], REGION_FACTOR_COLUMN, row.line)?;
        if let Some(previous) = factors.insert(region.to_string(), factor) {
            debug!(
                "Region '{}' listed again on line {}, replacing factor {} with {}",
                region, row.line, previous, factor
            );
        }
    }

    info!("{} regions loaded.", factors.len());
    Ok(factors)
}

/// Loads the headerless postcode file (region in column 3, postcode in column 7).
///
/// The postcode cell is reduced to its first run of five digits. Rows without
/// a region or without such a run are skipped; a file that yields no postcode
/// at all is rejected.
pub fn load_postcodes(path: &Path) -> Result<Vec<PostcodeRecord>> {
    info!("Loading postcodes from CSV: {}", path.display());
    let mut reader = open_reader(path, false)?;

    let mut records = Vec::new();
    let mut seen_rows = 0usize;
    for record in reader.records() {
        let Some(row) = to_row(&record?) else {
            continue;
        };
        seen_rows += 1;

        if row.values.len() <= POSTCODE_CODE_INDEX {
            return Err(ValidationError::InvalidInput(format!(
                "line {}: expected at least {} columns, found {}",
                row.line,
                POSTCODE_CODE_INDEX + 1,
                row.values.len()
            ))
            .into());
        }

        let region = &row.values[POSTCODE_REGION_INDEX];
        let raw_postcode = &row.values[POSTCODE_CODE_INDEX];
        if region.is_empty() || raw_postcode.is_empty() {
            debug!("Skipping line {}: region or postcode missing", row.line);
            continue;
        }

        match POSTCODE_REGEX.find(raw_postcode) {
            Some(found) => records.push(PostcodeRecord {
                region: region.clone(),
                postcode: found.as_str().to_string(),
            }),
            None => warn!(
                "Skipping line {}: '{}' contains no {}-digit postcode",
                row.line, raw_postcode, POSTCODE_DIGITS
            ),
        }
    }

    if seen_rows == 0 {
        return Err(ValidationError::EmptyInput(path.display().to_string()).into());
    }
    if records.is_empty() {
        return Err(ValidationError::InvalidInput(format!(
            "{} contains no valid postcodes",
            path.display()
        ))
        .into());
    }

    info!("{} postcode lines loaded.", records.len());
    Ok(records)
}

/// Loads the vehicle type factors in file order.
pub fn load_vehicle_factors(path: &Path) -> Result<Vec<VehicleFactorRecord>> {
    info!("Loading vehicle factors from CSV: {}", path.display());
    let table = Table::read(path, &[VEHICLE_TYPE_COLUMN, VEHICLE_FACTOR_COLUMN])?;

    let records = table
        .rows
        .iter()
        .map(|row| {
            Ok(VehicleFactorRecord {
                vehicle_type: require_value(&row.values[0], VEHICLE_TYPE_COLUMN, row.line)?
                    .to_string(),
                vehicle_factor: parse_factor(&row.values[1], VEHICLE_FACTOR_COLUMN, row.line)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    info!("{} vehicle types loaded.", records.len());
    Ok(records)
}

/// Loads the yearly mileage bands in file order.
///
/// An upper bound of `-1` (or an empty cell) marks the open-ended band.
pub fn load_mileage_factors(path: &Path) -> Result<Vec<MileageFactorRecord>> {
    info!("Loading yearly mileage factors from CSV: {}", path.display());
    let table = Table::read(
        path,
        &[MILEAGE_FROM_COLUMN, MILEAGE_TO_COLUMN, MILEAGE_FACTOR_COLUMN],
    )?;

    let records = table
        .rows
        .iter()
        .map(|row| {
            let from_value = require_value(&row.values[0], MILEAGE_FROM_COLUMN, row.line)?;
            let mileage_from = parse_whole_number(from_value, MILEAGE_FROM_COLUMN, row.line)?;

            let to_value = row.values[1].as_str();
            let mileage_to = if to_value.is_empty() {
                None
            } else {
                match parse_whole_number(to_value, MILEAGE_TO_COLUMN, row.line)? {
                    OPEN_ENDED_MARKER => None,
                    to => Some(to),
                }
            };

            Ok(MileageFactorRecord {
                mileage_from,
                mileage_to,
                mileage_factor: parse_factor(&row.values[2], MILEAGE_FACTOR_COLUMN, row.line)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    info!("{} factors for yearly mileages loaded.", records.len());
    Ok(records)
}
