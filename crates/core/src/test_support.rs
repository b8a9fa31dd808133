//! In-memory reference data used as a repository fixture in unit tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::{DatabaseError, Error, Result};
use crate::mileage::{MileageBand, MileageBandRepositoryTrait, NewMileageBand};
use crate::regions::{NewPostcode, NewRegion, Postcode, PostcodeRegion, Region, RegionRepositoryTrait};
use crate::vehicles::{NewVehicleType, VehicleRepositoryTrait, VehicleType};

#[derive(Default)]
pub struct InMemoryReferenceData {
    regions: RwLock<Vec<Region>>,
    postcodes: RwLock<Vec<Postcode>>,
    vehicles: RwLock<Vec<VehicleType>>,
    bands: RwLock<Vec<MileageBand>>,
    reads: AtomicUsize,
    rejected_band_from: RwLock<Option<i64>>,
}

impl InMemoryReferenceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_region(&self, name: &str, factor: Decimal) -> i32 {
        let mut regions = self.regions.write().unwrap();
        let id = regions.len() as i32 + 1;
        regions.push(Region {
            id,
            name: name.to_string(),
            region_factor: factor,
        });
        id
    }

    pub fn add_postcode(&self, code: &str, region_id: Option<i32>) {
        let mut postcodes = self.postcodes.write().unwrap();
        let id = postcodes.len() as i32 + 1;
        postcodes.push(Postcode {
            id,
            postcode: code.to_string(),
            region_id,
        });
    }

    pub fn add_vehicle(&self, name: &str, factor: Decimal) {
        let mut vehicles = self.vehicles.write().unwrap();
        let id = vehicles.len() as i32 + 1;
        vehicles.push(VehicleType {
            id,
            vehicle_type: name.to_string(),
            vehicle_factor: factor,
        });
    }

    pub fn add_band(&self, from: i64, to: Option<i64>, factor: Decimal) -> i32 {
        let mut bands = self.bands.write().unwrap();
        let id = bands.len() as i32 + 1;
        bands.push(MileageBand {
            id,
            mileage_from: from,
            mileage_to: to,
            mileage_factor: factor,
        });
        id
    }

    /// Makes `insert_mileage_band` fail for bands starting at `from`.
    pub fn reject_band_insert(&self, from: i64) {
        *self.rejected_band_from.write().unwrap() = Some(from);
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn regions(&self) -> Vec<Region> {
        self.regions.read().unwrap().clone()
    }

    pub fn postcodes(&self) -> Vec<Postcode> {
        self.postcodes.read().unwrap().clone()
    }

    pub fn vehicles(&self) -> Vec<VehicleType> {
        self.vehicles.read().unwrap().clone()
    }

    pub fn bands(&self) -> Vec<MileageBand> {
        self.bands.read().unwrap().clone()
    }

    fn count_read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RegionRepositoryTrait for InMemoryReferenceData {
    fn find_region_for_postcode(&self, postcode: &str) -> Result<Option<PostcodeRegion>> {
        self.count_read();
        let found = self
            .postcodes
            .read()
            .unwrap()
            .iter()
            .find(|p| p.postcode == postcode)
            .cloned();
        Ok(found.map(|postcode| {
            let region = postcode.region_id.and_then(|region_id| {
                self.regions
                    .read()
                    .unwrap()
                    .iter()
                    .find(|r| r.id == region_id)
                    .cloned()
            });
            PostcodeRegion { postcode, region }
        }))
    }

    fn find_region_by_name(&self, name: &str) -> Result<Option<Region>> {
        self.count_read();
        Ok(self
            .regions
            .read()
            .unwrap()
            .iter()
            .find(|r| r.name == name)
            .cloned())
    }

    fn load_postcode_codes(&self) -> Result<HashSet<String>> {
        self.count_read();
        Ok(self
            .postcodes
            .read()
            .unwrap()
            .iter()
            .map(|p| p.postcode.clone())
            .collect())
    }

    async fn insert_region(&self, new_region: NewRegion) -> Result<Region> {
        if self.find_region_by_name(&new_region.name)?.is_some() {
            return Err(Error::Database(DatabaseError::UniqueViolation(
                new_region.name,
            )));
        }
        let id = self.add_region(&new_region.name, new_region.region_factor);
        Ok(Region {
            id,
            name: new_region.name,
            region_factor: new_region.region_factor,
        })
    }

    async fn insert_postcodes(&self, new_postcodes: Vec<NewPostcode>) -> Result<usize> {
        let count = new_postcodes.len();
        for new_postcode in new_postcodes {
            self.add_postcode(&new_postcode.postcode, new_postcode.region_id);
        }
        Ok(count)
    }

    async fn link_orphan_postcodes(&self, codes: Vec<String>, region_id: i32) -> Result<usize> {
        let mut linked = 0;
        for postcode in self.postcodes.write().unwrap().iter_mut() {
            if postcode.region_id.is_none() && codes.contains(&postcode.postcode) {
                postcode.region_id = Some(region_id);
                linked += 1;
            }
        }
        Ok(linked)
    }
}

#[async_trait]
impl VehicleRepositoryTrait for InMemoryReferenceData {
    fn find_vehicle_type(&self, vehicle_type: &str) -> Result<Option<VehicleType>> {
        self.count_read();
        Ok(self
            .vehicles
            .read()
            .unwrap()
            .iter()
            .find(|v| v.vehicle_type == vehicle_type)
            .cloned())
    }

    async fn insert_vehicle_type(&self, new_vehicle_type: NewVehicleType) -> Result<VehicleType> {
        self.add_vehicle(&new_vehicle_type.vehicle_type, new_vehicle_type.vehicle_factor);
        self.find_vehicle_type(&new_vehicle_type.vehicle_type)?
            .ok_or_else(|| Error::Unexpected("vehicle type vanished".to_string()))
    }
}

#[async_trait]
impl MileageBandRepositoryTrait for InMemoryReferenceData {
    fn load_mileage_bands(&self) -> Result<Vec<MileageBand>> {
        self.count_read();
        Ok(self.bands())
    }

    fn find_mileage_band(
        &self,
        mileage_from: i64,
        mileage_to: Option<i64>,
    ) -> Result<Option<MileageBand>> {
        self.count_read();
        Ok(self
            .bands
            .read()
            .unwrap()
            .iter()
            .find(|b| b.mileage_from == mileage_from && b.mileage_to == mileage_to)
            .cloned())
    }

    async fn insert_mileage_band(&self, new_band: NewMileageBand) -> Result<MileageBand> {
        if *self.rejected_band_from.read().unwrap() == Some(new_band.mileage_from) {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "insert rejected".to_string(),
            )));
        }
        let id = self.add_band(
            new_band.mileage_from,
            new_band.mileage_to,
            new_band.mileage_factor,
        );
        Ok(MileageBand {
            id,
            mileage_from: new_band.mileage_from,
            mileage_to: new_band.mileage_to,
            mileage_factor: new_band.mileage_factor,
        })
    }
}
