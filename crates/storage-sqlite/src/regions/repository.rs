use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use vehicle_rating_core::regions::{
    NewPostcode, NewRegion, Postcode, PostcodeRegion, Region, RegionRepositoryTrait,
};
use vehicle_rating_core::Result;

use super::model::{NewPostcodeDB, NewRegionDB, PostcodeDB, RegionDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::{postcodes, regions};
use crate::utils::SQLITE_MAX_PARAMS_CHUNK;

pub struct RegionRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl RegionRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        RegionRepository { pool, writer }
    }
}

#[async_trait]
impl RegionRepositoryTrait for RegionRepository {
    fn find_region_for_postcode(&self, code: &str) -> Result<Option<PostcodeRegion>> {
        let mut conn = get_connection(&self.pool)?;
        let row = postcodes::table
            .left_join(regions::table)
            .filter(postcodes::postcode.eq(code))
            .select((postcodes::all_columns, regions::all_columns.nullable()))
            .first::<(PostcodeDB, Option<RegionDB>)>(&mut conn)
            .optional()
            .into_core()?;

        row.map(|(postcode_db, region_db)| -> Result<PostcodeRegion> {
            Ok(PostcodeRegion {
                postcode: Postcode::from(postcode_db),
                region: region_db.map(Region::try_from).transpose()?,
            })
        })
        .transpose()
    }

    fn find_region_by_name(&self, name: &str) -> Result<Option<Region>> {
        let mut conn = get_connection(&self.pool)?;
        regions::table
            .filter(regions::region.eq(name))
            .first::<RegionDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Region::try_from)
            .transpose()
    }

    fn load_postcode_codes(&self) -> Result<HashSet<String>> {
        let mut conn = get_connection(&self.pool)?;
        let codes = postcodes::table
            .select(postcodes::postcode)
            .load::<String>(&mut conn)
            .into_core()?;
        Ok(codes.into_iter().collect())
    }

    async fn insert_region(&self, new_region: NewRegion) -> Result<Region> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Region> {
                let new_region_db = NewRegionDB::from(new_region);
                let result_db = diesel::insert_into(regions::table)
                    .values(&new_region_db)
                    .returning(RegionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Region::try_from(result_db)
            })
            .await
    }

    /// Inserts all postcodes in one transaction; a rejected row rolls back the batch.
    async fn insert_postcodes(&self, new_postcodes: Vec<NewPostcode>) -> Result<usize> {
        if new_postcodes.is_empty() {
            return Ok(0);
        }
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut inserted = 0;
                for new_postcode in new_postcodes {
                    inserted += diesel::insert_into(postcodes::table)
                        .values(NewPostcodeDB::from(new_postcode))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(inserted)
            })
            .await
    }

    async fn link_orphan_postcodes(&self, codes: Vec<String>, region_id: i32) -> Result<usize> {
        if codes.is_empty() {
            return Ok(0);
        }
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut linked = 0;
                for chunk in codes.chunks(SQLITE_MAX_PARAMS_CHUNK) {
                    linked += diesel::update(
                        postcodes::table
                            .filter(postcodes::postcode.eq_any(chunk))
                            .filter(postcodes::region_id.is_null()),
                    )
                    .set(postcodes::region_id.eq(region_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                }
                Ok(linked)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;
    use vehicle_rating_core::errors::{DatabaseError, Error};

    async fn create_test_repository() -> (RegionRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());

        (RegionRepository::new(Arc::clone(&pool), writer), temp_dir)
    }

    fn new_region(name: &str, factor: rust_decimal::Decimal) -> NewRegion {
        NewRegion {
            name: name.to_string(),
            region_factor: factor,
        }
    }

    fn new_postcode(code: &str, region_id: Option<i32>) -> NewPostcode {
        NewPostcode {
            postcode: code.to_string(),
            region_id,
        }
    }

    #[tokio::test]
    async fn test_postcode_resolves_to_its_region() {
        let (repo, _dir) = create_test_repository().await;
        let bayern = repo
            .insert_region(new_region("Bayern", dec!(1.20)))
            .await
            .unwrap();
        repo.insert_postcodes(vec![new_postcode("80331", Some(bayern.id))])
            .await
            .unwrap();

        let found = repo.find_region_for_postcode("80331").unwrap().unwrap();

        assert_eq!(found.postcode.postcode, "80331");
        assert_eq!(found.region, Some(bayern.clone()));
        // Scale survives the TEXT round trip.
        assert_eq!(bayern.region_factor.to_string(), "1.20");
    }

    #[tokio::test]
    async fn test_unknown_postcode_is_none() {
        let (repo, _dir) = create_test_repository().await;
        assert_eq!(repo.find_region_for_postcode("99999").unwrap(), None);
    }

    #[tokio::test]
    async fn test_orphan_postcode_has_no_region() {
        let (repo, _dir) = create_test_repository().await;
        repo.insert_postcodes(vec![new_postcode("01067", None)])
            .await
            .unwrap();

        let found = repo.find_region_for_postcode("01067").unwrap().unwrap();

        assert_eq!(found.postcode.region_id, None);
        assert_eq!(found.region, None);
    }

    #[tokio::test]
    async fn test_region_lookup_by_name_is_exact() {
        let (repo, _dir) = create_test_repository().await;
        repo.insert_region(new_region("Berlin", dec!(1.5)))
            .await
            .unwrap();

        assert!(repo.find_region_by_name("Berlin").unwrap().is_some());
        assert!(repo.find_region_by_name("berlin").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_region_is_unique_violation() {
        let (repo, _dir) = create_test_repository().await;
        repo.insert_region(new_region("Berlin", dec!(1.5)))
            .await
            .unwrap();

        let err = repo
            .insert_region(new_region("Berlin", dec!(1.7)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Database(DatabaseError::UniqueViolation(_))
        ));
    }

    #[tokio::test]
    async fn test_postcode_batch_is_atomic() {
        let (repo, _dir) = create_test_repository().await;
        repo.insert_postcodes(vec![new_postcode("10115", None)])
            .await
            .unwrap();

        let result = repo
            .insert_postcodes(vec![
                new_postcode("10117", None),
                new_postcode("10115", None),
            ])
            .await;

        assert!(result.is_err());
        let codes = repo.load_postcode_codes().unwrap();
        assert_eq!(codes, HashSet::from(["10115".to_string()]));
    }

    #[tokio::test]
    async fn test_postcode_with_missing_region_is_rejected() {
        let (repo, _dir) = create_test_repository().await;

        let err = repo
            .insert_postcodes(vec![new_postcode("10115", Some(42))])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Database(DatabaseError::ForeignKeyViolation(_))
        ));
    }

    #[tokio::test]
    async fn test_insert_postcodes_returns_count() {
        let (repo, _dir) = create_test_repository().await;
        let region = repo
            .insert_region(new_region("Hessen", dec!(0.9)))
            .await
            .unwrap();

        let inserted = repo
            .insert_postcodes(vec![
                new_postcode("60311", Some(region.id)),
                new_postcode("60313", Some(region.id)),
            ])
            .await
            .unwrap();

        assert_eq!(inserted, 2);
        assert_eq!(repo.insert_postcodes(Vec::new()).await.unwrap(), 0);
        assert_eq!(repo.load_postcode_codes().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_link_orphan_postcodes_only_touches_unlinked_rows() {
        let (repo, _dir) = create_test_repository().await;
        let bayern = repo
            .insert_region(new_region("Bayern", dec!(1.6)))
            .await
            .unwrap();
        let sachsen = repo
            .insert_region(new_region("Sachsen", dec!(1.05)))
            .await
            .unwrap();
        repo.insert_postcodes(vec![
            new_postcode("01067", None),
            new_postcode("80331", Some(bayern.id)),
        ])
        .await
        .unwrap();

        let linked = repo
            .link_orphan_postcodes(
                vec!["01067".to_string(), "80331".to_string(), "99999".to_string()],
                sachsen.id,
            )
            .await
            .unwrap();

        assert_eq!(linked, 1);
        let orphan = repo.find_region_for_postcode("01067").unwrap().unwrap();
        assert_eq!(orphan.region, Some(sachsen));
        let linked_before = repo.find_region_for_postcode("80331").unwrap().unwrap();
        assert_eq!(linked_before.region, Some(bayern));
        assert_eq!(repo.link_orphan_postcodes(Vec::new(), 1).await.unwrap(), 0);
    }
}
