//! Yearly mileage band domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Domain model representing a yearly mileage band.
///
/// Both bounds are inclusive. A band without `mileage_to` is open-ended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MileageBand {
    pub id: i32,
    pub mileage_from: i64,
    pub mileage_to: Option<i64>,
    pub mileage_factor: Decimal,
}

impl MileageBand {
    /// Returns true when `annual_mileage` lies inside `[mileage_from, mileage_to]`.
    pub fn contains(&self, annual_mileage: i64) -> bool {
        if annual_mileage < self.mileage_from {
            return false;
        }
        match self.mileage_to {
            Some(to) => annual_mileage <= to,
            None => true,
        }
    }

    pub fn is_open_ended(&self) -> bool {
        self.mileage_to.is_none()
    }
}

/// Input model for creating a new mileage band
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMileageBand {
    pub mileage_from: i64,
    pub mileage_to: Option<i64>,
    pub mileage_factor: Decimal,
}
