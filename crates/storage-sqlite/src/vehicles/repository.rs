use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use vehicle_rating_core::vehicles::{NewVehicleType, VehicleRepositoryTrait, VehicleType};
use vehicle_rating_core::Result;

use super::model::{NewVehicleTypeDB, VehicleTypeDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::vehicle;

pub struct VehicleRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl VehicleRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        VehicleRepository { pool, writer }
    }
}

#[async_trait]
impl VehicleRepositoryTrait for VehicleRepository {
    fn find_vehicle_type(&self, name: &str) -> Result<Option<VehicleType>> {
        let mut conn = get_connection(&self.pool)?;
        vehicle::table
            .filter(vehicle::vehicle_type.eq(name))
            .first::<VehicleTypeDB>(&mut conn)
            .optional()
            .into_core()?
            .map(VehicleType::try_from)
            .transpose()
    }

    async fn insert_vehicle_type(&self, new_vehicle_type: NewVehicleType) -> Result<VehicleType> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<VehicleType> {
                let result_db = diesel::insert_into(vehicle::table)
                    .values(NewVehicleTypeDB::from(new_vehicle_type))
                    .returning(VehicleTypeDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                VehicleType::try_from(result_db)
            })
            .await
    }
}
