//! Database models for yearly mileage bands.

use diesel::prelude::*;
use vehicle_rating_core::mileage::{MileageBand, NewMileageBand};
use vehicle_rating_core::{Error, Result};

use crate::utils::parse_factor;

/// Database model for yearly mileage bands. A NULL upper bound marks the
/// open-ended band.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::yearly_mileage)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MileageBandDB {
    pub id: i32,
    pub yearly_mileage_from: i64,
    pub yearly_mileage_to: Option<i64>,
    pub yearly_mileage_factor: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::yearly_mileage)]
pub struct NewMileageBandDB {
    pub yearly_mileage_from: i64,
    pub yearly_mileage_to: Option<i64>,
    pub yearly_mileage_factor: String,
}

impl TryFrom<MileageBandDB> for MileageBand {
    type Error = Error;

    fn try_from(db: MileageBandDB) -> Result<Self> {
        Ok(Self {
            mileage_factor: parse_factor("yearly_mileage_factor", &db.yearly_mileage_factor)?,
            id: db.id,
            mileage_from: db.yearly_mileage_from,
            mileage_to: db.yearly_mileage_to,
        })
    }
}

impl From<NewMileageBand> for NewMileageBandDB {
    fn from(domain: NewMileageBand) -> Self {
        Self {
            yearly_mileage_from: domain.mileage_from,
            yearly_mileage_to: domain.mileage_to,
            yearly_mileage_factor: domain.mileage_factor.to_string(),
        }
    }
}
