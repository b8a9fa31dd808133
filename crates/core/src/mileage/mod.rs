//! Mileage module - yearly mileage bands, range lookup and coverage checks.

mod band_index;
mod band_validation;
mod mileage_model;
mod mileage_traits;

pub use band_index::{BandMatch, MileageBandIndex};
pub use band_validation::{validate_mileage_bands, MileageBandIssue};
pub use mileage_model::{MileageBand, NewMileageBand};
pub use mileage_traits::MileageBandRepositoryTrait;
