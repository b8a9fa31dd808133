use std::collections::HashSet;

use crate::errors::Result;
use crate::regions::regions_model::{NewPostcode, NewRegion, PostcodeRegion, Region};
use async_trait::async_trait;

/// Trait for region and postcode repository operations
#[async_trait]
pub trait RegionRepositoryTrait: Send + Sync {
    /// Exact, case-sensitive lookup of a postcode together with its region.
    fn find_region_for_postcode(&self, postcode: &str) -> Result<Option<PostcodeRegion>>;
    fn find_region_by_name(&self, name: &str) -> Result<Option<Region>>;
    fn load_postcode_codes(&self) -> Result<HashSet<String>>;
    async fn insert_region(&self, new_region: NewRegion) -> Result<Region>;
    async fn insert_postcodes(&self, new_postcodes: Vec<NewPostcode>) -> Result<usize>;
    /// Points the listed postcodes that have no region at `region_id`.
    /// Postcodes already linked to a region are left alone.
    async fn link_orphan_postcodes(&self, codes: Vec<String>, region_id: i32) -> Result<usize>;
}
