use crate::errors::Result;
use crate::vehicles::vehicles_model::{NewVehicleType, VehicleType};
use async_trait::async_trait;

/// Trait for vehicle type repository operations
#[async_trait]
pub trait VehicleRepositoryTrait: Send + Sync {
    fn find_vehicle_type(&self, vehicle_type: &str) -> Result<Option<VehicleType>>;
    async fn insert_vehicle_type(&self, new_vehicle_type: NewVehicleType) -> Result<VehicleType>;
}
