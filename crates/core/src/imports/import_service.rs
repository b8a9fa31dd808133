use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error, info, warn};
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::mileage::{validate_mileage_bands, MileageBandRepositoryTrait, NewMileageBand};
use crate::regions::{NewPostcode, NewRegion, RegionRepositoryTrait};
use crate::vehicles::{NewVehicleType, VehicleRepositoryTrait};

use super::csv_loader::{
    load_mileage_factors, load_postcodes, load_region_factors, load_vehicle_factors,
};
use super::import_model::{
    ImportReport, ImportSources, ImportStage, ImportSummary, MileageFactorRecord,
    PostcodeRecord, StageOutcome, VehicleFactorRecord,
};
use super::import_traits::ImportServiceTrait;

pub struct ImportService {
    region_repository: Arc<dyn RegionRepositoryTrait>,
    vehicle_repository: Arc<dyn VehicleRepositoryTrait>,
    mileage_repository: Arc<dyn MileageBandRepositoryTrait>,
}

impl ImportService {
    pub fn new(
        region_repository: Arc<dyn RegionRepositoryTrait>,
        vehicle_repository: Arc<dyn VehicleRepositoryTrait>,
        mileage_repository: Arc<dyn MileageBandRepositoryTrait>,
    ) -> Self {
        ImportService {
            region_repository,
            vehicle_repository,
            mileage_repository,
        }
    }

    /// Resolves the id postcodes of `region` should reference, creating the
    /// region if needed. `None` means the region has no factor and its
    /// postcodes stay unrated.
    async fn region_id_for(
        &self,
        region: &str,
        region_factors: &BTreeMap<String, Decimal>,
    ) -> Result<Option<i32>> {
        if let Some(existing) = self.region_repository.find_region_by_name(region)? {
            info!("'{}' already exists (id={}).", region, existing.id);
            return Ok(Some(existing.id));
        }

        let Some(factor) = region_factors.get(region) else {
            warn!(
                "Region '{}' has no factor; its postcodes are stored without a region.",
                region
            );
            return Ok(None);
        };

        let created = self
            .region_repository
            .insert_region(NewRegion {
                name: region.to_string(),
                region_factor: *factor,
            })
            .await?;
        info!(
            "New region '{}' (id={}, factor={}) added.",
            created.name, created.id, created.region_factor
        );
        Ok(Some(created.id))
    }

    async fn mileage_stage(&self, sources: &ImportSources) -> Result<ImportSummary> {
        let records = load_mileage_factors(&sources.mileage_factors_csv)?;
        self.import_mileage_factors(records).await
    }

    async fn vehicle_stage(&self, sources: &ImportSources) -> Result<ImportSummary> {
        let records = load_vehicle_factors(&sources.vehicle_factors_csv)?;
        self.import_vehicle_factors(records).await
    }

    async fn postcode_stage(&self, sources: &ImportSources) -> Result<ImportSummary> {
        let region_factors = load_region_factors(&sources.region_factors_csv)?;
        let records = load_postcodes(&sources.postcodes_csv)?;
        self.import_postcodes(records, &region_factors).await
    }
}

fn stage_outcome(stage: ImportStage, result: Result<ImportSummary>) -> StageOutcome {
    match result {
        Ok(summary) => {
            info!(
                "Import of {} done: {} inserted, {} relinked, {} skipped, {} failed.",
                stage, summary.inserted, summary.relinked, summary.skipped, summary.failed
            );
            StageOutcome {
                stage,
                summary: Some(summary),
                error: None,
            }
        }
        Err(e) => {
            error!("Failed to import {}: {}", stage, e);
            StageOutcome {
                stage,
                summary: None,
                error: Some(e.to_string()),
            }
        }
    }
}

#[async_trait]
impl ImportServiceTrait for ImportService {
    async fn import_mileage_factors(
        &self,
        records: Vec<MileageFactorRecord>,
    ) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();
        let mut seen = HashSet::new();

        for record in records {
            let key = (record.mileage_from, record.mileage_to);
            if !seen.insert(key) {
                debug!(
                    "Yearly mileage range {} - {:?} repeated in file, keeping the first factor.",
                    record.mileage_from, record.mileage_to
                );
                summary.skipped += 1;
                continue;
            }

            if let Some(existing) = self
                .mileage_repository
                .find_mileage_band(record.mileage_from, record.mileage_to)?
            {
                info!(
                    "'{} - {:?}' already exists (id={}).",
                    record.mileage_from, record.mileage_to, existing.id
                );
                summary.skipped += 1;
                continue;
            }

            let insert = self
                .mileage_repository
                .insert_mileage_band(NewMileageBand {
                    mileage_from: record.mileage_from,
                    mileage_to: record.mileage_to,
                    mileage_factor: record.mileage_factor,
                })
                .await;
            match insert {
                Ok(band) => {
                    info!(
                        "'{} - {:?}' added (id={}, factor={}).",
                        band.mileage_from, band.mileage_to, band.id, band.mileage_factor
                    );
                    summary.inserted += 1;
                }
                Err(e) => {
                    error!(
                        "Error processing yearly mileage range {} - {:?}: {}",
                        record.mileage_from, record.mileage_to, e
                    );
                    summary.failed += 1;
                }
            }
        }

        let issues = validate_mileage_bands(&self.mileage_repository.load_mileage_bands()?);
        for issue in &issues {
            warn!("Mileage band coverage: {}", issue);
        }

        Ok(summary)
    }

    async fn import_vehicle_factors(
        &self,
        records: Vec<VehicleFactorRecord>,
    ) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();
        let mut seen = HashSet::new();

        for record in records {
            if !seen.insert(record.vehicle_type.clone()) {
                summary.skipped += 1;
                continue;
            }

            if let Some(existing) = self
                .vehicle_repository
                .find_vehicle_type(&record.vehicle_type)?
            {
                info!(
                    "'{}' already exists (id={}).",
                    existing.vehicle_type, existing.id
                );
                summary.skipped += 1;
                continue;
            }

            let created = self
                .vehicle_repository
                .insert_vehicle_type(NewVehicleType {
                    vehicle_type: record.vehicle_type,
                    vehicle_factor: record.vehicle_factor,
                })
                .await?;
            info!(
                "'{}' added (id={}, factor={}).",
                created.vehicle_type, created.id, created.vehicle_factor
            );
            summary.inserted += 1;
        }

        Ok(summary)
    }

    async fn import_postcodes(
        &self,
        records: Vec<PostcodeRecord>,
        region_factors: &BTreeMap<String, Decimal>,
    ) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();

        // Regions in order of first appearance, each with its postcodes.
        let mut by_region: Vec<(String, Vec<String>)> = Vec::new();
        for record in records {
            match by_region.iter_mut().find(|(name, _)| *name == record.region) {
                Some((_, codes)) => codes.push(record.postcode),
                None => by_region.push((record.region, vec![record.postcode])),
            }
        }
        debug!(
            "Regions in file: {:?}",
            by_region.iter().map(|(name, _)| name).collect::<Vec<_>>()
        );

        let mut known_codes = self.region_repository.load_postcode_codes()?;

        for (region, codes) in by_region {
            let region_id = self.region_id_for(&region, region_factors).await?;

            let mut new_postcodes = Vec::new();
            let mut stored_codes = Vec::new();
            for code in codes {
                if known_codes.contains(&code) {
                    stored_codes.push(code);
                    continue;
                }
                known_codes.insert(code.clone());
                new_postcodes.push(NewPostcode {
                    postcode: code,
                    region_id,
                });
            }

            // Postcodes stored while their region had no factor.
            let mut relinked = 0;
            if let Some(region_id) = region_id {
                if !stored_codes.is_empty() {
                    relinked = self
                        .region_repository
                        .link_orphan_postcodes(stored_codes.clone(), region_id)
                        .await?;
                }
            }
            if relinked > 0 {
                info!("{} existing postcodes linked to '{}'.", relinked, region);
            }
            summary.relinked += relinked;
            summary.skipped += stored_codes.len() - relinked;

            if new_postcodes.is_empty() {
                info!("No new postcodes found for '{}'.", region);
                continue;
            }

            let inserted = self
                .region_repository
                .insert_postcodes(new_postcodes)
                .await?;
            info!("{} new postcodes added for '{}'.", inserted, region);
            summary.inserted += inserted;
        }

        Ok(summary)
    }

    async fn run_import(&self, sources: &ImportSources) -> ImportReport {
        let mut report = ImportReport::default();

        report.stages.push(stage_outcome(
            ImportStage::MileageFactors,
            self.mileage_stage(sources).await,
        ));
        report.stages.push(stage_outcome(
            ImportStage::VehicleFactors,
            self.vehicle_stage(sources).await,
        ));
        report.stages.push(stage_outcome(
            ImportStage::Postcodes,
            self.postcode_stage(sources).await,
        ));

        report
    }
}
