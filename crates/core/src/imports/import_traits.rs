use std::collections::BTreeMap;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::imports::import_model::{
    ImportReport, ImportSources, ImportSummary, MileageFactorRecord, PostcodeRecord,
    VehicleFactorRecord,
};

/// Trait for reference data import operations.
///
/// Every import is idempotent: rows already present in the store are skipped,
/// never updated. The one exception is a postcode stored without a region,
/// which is linked once a later import creates that region.
#[async_trait]
pub trait ImportServiceTrait: Send + Sync {
    async fn import_mileage_factors(
        &self,
        records: Vec<MileageFactorRecord>,
    ) -> Result<ImportSummary>;

    async fn import_vehicle_factors(
        &self,
        records: Vec<VehicleFactorRecord>,
    ) -> Result<ImportSummary>;

    async fn import_postcodes(
        &self,
        records: Vec<PostcodeRecord>,
        region_factors: &BTreeMap<String, Decimal>,
    ) -> Result<ImportSummary>;

    /// Loads and imports all reference files. Stages run independently; a
    /// failed stage is recorded in the report and the next one still runs.
    async fn run_import(&self, sources: &ImportSources) -> ImportReport;
}
