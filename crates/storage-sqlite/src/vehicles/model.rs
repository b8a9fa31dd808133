use diesel::prelude::*;
use vehicle_rating_core::vehicles::{NewVehicleType, VehicleType};
use vehicle_rating_core::{Error, Result};

use crate::utils::parse_factor;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::vehicle)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct VehicleTypeDB {
    pub id: i32,
    pub vehicle_type: String,
    pub vehicle_factor: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::vehicle)]
pub struct NewVehicleTypeDB {
    pub vehicle_type: String,
    pub vehicle_factor: String,
}

impl TryFrom<VehicleTypeDB> for VehicleType {
    type Error = Error;

    fn try_from(db: VehicleTypeDB) -> Result<Self> {
        Ok(Self {
            vehicle_factor: parse_factor("vehicle_factor", &db.vehicle_factor)?,
            id: db.id,
            vehicle_type: db.vehicle_type,
        })
    }
}

impl From<NewVehicleType> for NewVehicleTypeDB {
    fn from(domain: NewVehicleType) -> Self {
        Self {
            vehicle_type: domain.vehicle_type,
            vehicle_factor: domain.vehicle_factor.to_string(),
        }
    }
}
