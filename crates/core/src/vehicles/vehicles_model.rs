//! Vehicle type domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Domain model representing a vehicle type and its rating factor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleType {
    pub id: i32,
    pub vehicle_type: String,
    pub vehicle_factor: Decimal,
}

/// Input model for creating a new vehicle type
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewVehicleType {
    pub vehicle_type: String,
    pub vehicle_factor: Decimal,
}
