mod model;
mod repository;

pub use model::{NewVehicleTypeDB, VehicleTypeDB};
pub use repository::VehicleRepository;
