//! Database models for regions and postcodes.

use diesel::prelude::*;
use vehicle_rating_core::regions::{NewPostcode, NewRegion, Postcode, Region};
use vehicle_rating_core::{Error, Result};

use crate::utils::parse_factor;

/// Database model for regions
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::regions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RegionDB {
    pub id: i32,
    pub region: String,
    pub region_factor: String,
}

/// Database model for creating a new region
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::regions)]
pub struct NewRegionDB {
    pub region: String,
    pub region_factor: String,
}

/// Database model for postcodes
#[derive(Queryable, Identifiable, Associations, Selectable, PartialEq, Debug, Clone)]
#[diesel(belongs_to(RegionDB, foreign_key = region_id))]
#[diesel(table_name = crate::schema::postcodes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PostcodeDB {
    pub id: i32,
    pub postcode: String,
    pub region_id: Option<i32>,
}

/// Database model for creating a new postcode
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::postcodes)]
pub struct NewPostcodeDB {
    pub postcode: String,
    pub region_id: Option<i32>,
}

impl TryFrom<RegionDB> for Region {
    type Error = Error;

    fn try_from(db: RegionDB) -> Result<Self> {
        Ok(Self {
            region_factor: parse_factor("region_factor", &db.region_factor)?,
            id: db.id,
            name: db.region,
        })
    }
}

impl From<NewRegion> for NewRegionDB {
    fn from(domain: NewRegion) -> Self {
        Self {
            region: domain.name,
            region_factor: domain.region_factor.to_string(),
        }
    }
}

impl From<PostcodeDB> for Postcode {
    fn from(db: PostcodeDB) -> Self {
        Self {
            id: db.id,
            postcode: db.postcode,
            region_id: db.region_id,
        }
    }
}

impl From<NewPostcode> for NewPostcodeDB {
    fn from(domain: NewPostcode) -> Self {
        Self {
            postcode: domain.postcode,
            region_id: domain.region_id,
        }
    }
}
