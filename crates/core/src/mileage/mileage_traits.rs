use crate::errors::Result;
use crate::mileage::mileage_model::{MileageBand, NewMileageBand};
use async_trait::async_trait;

/// Trait for mileage band repository operations
#[async_trait]
pub trait MileageBandRepositoryTrait: Send + Sync {
    fn load_mileage_bands(&self) -> Result<Vec<MileageBand>>;
    fn find_mileage_band(
        &self,
        mileage_from: i64,
        mileage_to: Option<i64>,
    ) -> Result<Option<MileageBand>>;
    async fn insert_mileage_band(&self, new_band: NewMileageBand) -> Result<MileageBand>;
}
