use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use vehicle_rating_core::mileage::{MileageBand, MileageBandRepositoryTrait, NewMileageBand};
use vehicle_rating_core::Result;

use super::model::{MileageBandDB, NewMileageBandDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::yearly_mileage;

pub struct MileageBandRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl MileageBandRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        MileageBandRepository { pool, writer }
    }
}

#[async_trait]
impl MileageBandRepositoryTrait for MileageBandRepository {
    fn load_mileage_bands(&self) -> Result<Vec<MileageBand>> {
        let mut conn = get_connection(&self.pool)?;
        let bands_db = yearly_mileage::table
            .order((yearly_mileage::yearly_mileage_from.asc(), yearly_mileage::id.asc()))
            .load::<MileageBandDB>(&mut conn)
            .into_core()?;
        bands_db.into_iter().map(MileageBand::try_from).collect()
    }

    fn find_mileage_band(
        &self,
        mileage_from: i64,
        mileage_to: Option<i64>,
    ) -> Result<Option<MileageBand>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = yearly_mileage::table
            .filter(yearly_mileage::yearly_mileage_from.eq(mileage_from))
            .into_boxed();
        query = match mileage_to {
            Some(to) => query.filter(yearly_mileage::yearly_mileage_to.eq(to)),
            None => query.filter(yearly_mileage::yearly_mileage_to.is_null()),
        };
        query
            .first::<MileageBandDB>(&mut conn)
            .optional()
            .into_core()?
            .map(MileageBand::try_from)
            .transpose()
    }

    async fn insert_mileage_band(&self, new_band: NewMileageBand) -> Result<MileageBand> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<MileageBand> {
                let result_db = diesel::insert_into(yearly_mileage::table)
                    .values(NewMileageBandDB::from(new_band))
                    .returning(MileageBandDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                MileageBand::try_from(result_db)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    async fn create_test_repository() -> (MileageBandRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());

        (MileageBandRepository::new(Arc::clone(&pool), writer), temp_dir)
    }

    fn band(from: i64, to: Option<i64>, factor: Decimal) -> NewMileageBand {
        NewMileageBand {
            mileage_from: from,
            mileage_to: to,
            mileage_factor: factor,
        }
    }

    #[tokio::test]
    async fn test_bands_load_in_lower_bound_order() {
        let (repo, _dir) = create_test_repository().await;
        repo.insert_mileage_band(band(20001, None, dec!(1.5)))
            .await
            .unwrap();
        repo.insert_mileage_band(band(0, Some(10000), dec!(1.0)))
            .await
            .unwrap();
        repo.insert_mileage_band(band(10001, Some(20000), dec!(1.1)))
            .await
            .unwrap();

        let bands = repo.load_mileage_bands().unwrap();

        let lower_bounds: Vec<i64> = bands.iter().map(|b| b.mileage_from).collect();
        assert_eq!(lower_bounds, vec![0, 10001, 20001]);
        assert!(bands[2].is_open_ended());
        assert_eq!(bands[1].mileage_factor, dec!(1.1));
    }

    #[tokio::test]
    async fn test_find_band_distinguishes_open_ended() {
        let (repo, _dir) = create_test_repository().await;
        let closed = repo
            .insert_mileage_band(band(20001, Some(30000), dec!(1.3)))
            .await
            .unwrap();
        let open = repo
            .insert_mileage_band(band(20001, None, dec!(1.5)))
            .await
            .unwrap();

        assert_eq!(repo.find_mileage_band(20001, Some(30000)).unwrap(), Some(closed));
        assert_eq!(repo.find_mileage_band(20001, None).unwrap(), Some(open));
        assert_eq!(repo.find_mileage_band(20001, Some(40000)).unwrap(), None);
        assert_eq!(repo.find_mileage_band(0, None).unwrap(), None);
    }

    #[tokio::test]
    async fn test_empty_table_loads_no_bands() {
        let (repo, _dir) = create_test_repository().await;
        assert!(repo.load_mileage_bands().unwrap().is_empty());
    }
}
