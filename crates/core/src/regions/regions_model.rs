//! Region and postcode domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Domain model representing a rating region
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: i32,
    pub name: String,
    pub region_factor: Decimal,
}

/// Input model for creating a new region
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewRegion {
    pub name: String,
    pub region_factor: Decimal,
}

/// Domain model representing a registered postcode.
///
/// `region_id` is absent for orphan postcodes, which cannot be rated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Postcode {
    pub id: i32,
    pub postcode: String,
    pub region_id: Option<i32>,
}

/// Input model for creating a new postcode
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewPostcode {
    pub postcode: String,
    pub region_id: Option<i32>,
}

/// A postcode joined with the region it references, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct PostcodeRegion {
    pub postcode: Postcode,
    pub region: Option<Region>,
}
