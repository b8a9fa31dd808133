//! Vehicles module - vehicle type factors, domain models and traits.

mod vehicles_model;
mod vehicles_traits;

pub use vehicles_model::{NewVehicleType, VehicleType};
pub use vehicles_traits::VehicleRepositoryTrait;
