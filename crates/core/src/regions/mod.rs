//! Regions module - postcode to region mapping, domain models and traits.

mod regions_model;
mod regions_traits;

pub use regions_model::{NewPostcode, NewRegion, Postcode, PostcodeRegion, Region};
pub use regions_traits::RegionRepositoryTrait;
