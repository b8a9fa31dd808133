use crate::errors::Result;
use crate::mileage::MileageBandIssue;
use crate::rating::rating_model::RatingResult;

/// Trait for rating service operations
pub trait RatingServiceTrait: Send + Sync {
    /// Resolves the composite rating factor for a vehicle.
    fn resolve(
        &self,
        postcode: &str,
        vehicle_type: &str,
        annual_mileage: i64,
    ) -> Result<RatingResult>;

    /// Checks the stored mileage bands for gaps, overlaps and open ends.
    fn check_mileage_bands(&self) -> Result<Vec<MileageBandIssue>>;
}
