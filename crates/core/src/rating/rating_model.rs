//! Rating result models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The factors found for one rating request and their product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatingResult {
    pub region_factor: Decimal,
    pub vehicle_factor: Decimal,
    pub mileage_factor: Decimal,
    pub composite_factor: Decimal,
    /// Reference data problems noticed while resolving. They never fail the request.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anomalies: Vec<RatingAnomaly>,
}

/// A data-integrity problem detected during resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum RatingAnomaly {
    /// Several mileage bands contain the requested mileage. The band with the
    /// smallest lower bound was used.
    #[serde(rename_all = "camelCase")]
    OverlappingMileageBand {
        annual_mileage: i64,
        chosen_band_id: i32,
        matching_band_ids: Vec<i32>,
    },
}
