//! Reference data import models.

use std::fmt;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{
    MILEAGE_FACTORS_FILE, POSTCODES_FILE, REGION_FACTORS_FILE, VEHICLE_FACTORS_FILE,
};

/// One line of the postcode file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostcodeRecord {
    pub region: String,
    pub postcode: String,
}

/// One line of the vehicle factor file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleFactorRecord {
    pub vehicle_type: String,
    pub vehicle_factor: Decimal,
}

/// One line of the yearly mileage factor file. `mileage_to` is `None` for
/// the open-ended band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MileageFactorRecord {
    pub mileage_from: i64,
    pub mileage_to: Option<i64>,
    pub mileage_factor: Decimal,
}

/// Row counts of one import stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub inserted: usize,
    /// Stored postcodes without a region that were linked to one.
    pub relinked: usize,
    /// Rows already present in the store or repeated within the file.
    pub skipped: usize,
    /// Rows the store rejected; the rest of the stage still ran.
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportStage {
    MileageFactors,
    VehicleFactors,
    Postcodes,
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportStage::MileageFactors => write!(f, "yearly mileage factors"),
            ImportStage::VehicleFactors => write!(f, "vehicle factors"),
            ImportStage::Postcodes => write!(f, "postcodes and region factors"),
        }
    }
}

/// Result of one stage of an import run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageOutcome {
    pub stage: ImportStage,
    pub summary: Option<ImportSummary>,
    pub error: Option<String>,
}

/// Result of a full import run, one outcome per stage in execution order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub stages: Vec<StageOutcome>,
}

impl ImportReport {
    pub fn is_success(&self) -> bool {
        self.stages.iter().all(|stage| stage.error.is_none())
    }

    pub fn failed_stages(&self) -> Vec<ImportStage> {
        self.stages
            .iter()
            .filter(|stage| stage.error.is_some())
            .map(|stage| stage.stage)
            .collect()
    }
}

/// Locations of the four reference data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSources {
    pub postcodes_csv: PathBuf,
    pub region_factors_csv: PathBuf,
    pub vehicle_factors_csv: PathBuf,
    pub mileage_factors_csv: PathBuf,
}

impl ImportSources {
    /// Uses the standard file names inside `dir`.
    pub fn from_dir(dir: &Path) -> Self {
        ImportSources {
            postcodes_csv: dir.join(POSTCODES_FILE),
            region_factors_csv: dir.join(REGION_FACTORS_FILE),
            vehicle_factors_csv: dir.join(VEHICLE_FACTORS_FILE),
            mileage_factors_csv: dir.join(MILEAGE_FACTORS_FILE),
        }
    }
}
