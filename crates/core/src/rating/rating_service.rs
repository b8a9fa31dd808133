use std::sync::Arc;

use log::{debug, warn};
use rust_decimal::Decimal;

use crate::errors::{Result, ValidationError};
use crate::mileage::{
    validate_mileage_bands, BandMatch, MileageBandIndex, MileageBandIssue,
    MileageBandRepositoryTrait,
};
use crate::regions::RegionRepositoryTrait;
use crate::vehicles::VehicleRepositoryTrait;

use super::rating_errors::RatingError;
use super::rating_model::{RatingAnomaly, RatingResult};
use super::rating_traits::RatingServiceTrait;

/// Resolves rating factors from the reference data behind three read-only
/// repositories. Holds no state of its own.
pub struct RatingService {
    region_repository: Arc<dyn RegionRepositoryTrait>,
    vehicle_repository: Arc<dyn VehicleRepositoryTrait>,
    mileage_repository: Arc<dyn MileageBandRepositoryTrait>,
}

impl RatingService {
    pub fn new(
        region_repository: Arc<dyn RegionRepositoryTrait>,
        vehicle_repository: Arc<dyn VehicleRepositoryTrait>,
        mileage_repository: Arc<dyn MileageBandRepositoryTrait>,
    ) -> Self {
        RatingService {
            region_repository,
            vehicle_repository,
            mileage_repository,
        }
    }

    fn region_factor(&self, postcode: &str) -> Result<Decimal> {
        self.region_repository
            .find_region_for_postcode(postcode)?
            .and_then(|found| found.region)
            .map(|region| region.region_factor)
            .ok_or_else(|| {
                RatingError::UnknownRegion {
                    postcode: postcode.to_string(),
                }
                .into()
            })
    }

    fn vehicle_factor(&self, vehicle_type: &str) -> Result<Decimal> {
        self.vehicle_repository
            .find_vehicle_type(vehicle_type)?
            .map(|vehicle| vehicle.vehicle_factor)
            .ok_or_else(|| {
                RatingError::UnknownVehicleType {
                    vehicle_type: vehicle_type.to_string(),
                }
                .into()
            })
    }

    fn mileage_factor(&self, annual_mileage: i64) -> Result<(Decimal, Option<RatingAnomaly>)> {
        let index = MileageBandIndex::new(self.mileage_repository.load_mileage_bands()?);

        match index.lookup(annual_mileage) {
            BandMatch::None => Err(RatingError::NoMileageBand { annual_mileage }.into()),
            BandMatch::Single(band) => Ok((band.mileage_factor, None)),
            BandMatch::Overlap {
                chosen,
                matching_ids,
            } => {
                warn!(
                    "Overlapping mileage bands {:?} all contain {}; using band {} (from {})",
                    matching_ids, annual_mileage, chosen.id, chosen.mileage_from
                );
                Ok((
                    chosen.mileage_factor,
                    Some(RatingAnomaly::OverlappingMileageBand {
                        annual_mileage,
                        chosen_band_id: chosen.id,
                        matching_band_ids: matching_ids,
                    }),
                ))
            }
        }
    }
}

fn validate_request(postcode: &str, vehicle_type: &str, annual_mileage: i64) -> Result<()> {
    if postcode.is_empty() {
        return Err(ValidationError::MissingField("postcode".to_string()).into());
    }
    if vehicle_type.is_empty() {
        return Err(ValidationError::MissingField("vehicle_type".to_string()).into());
    }
    if annual_mileage < 0 {
        return Err(ValidationError::InvalidInput(format!(
            "annual mileage must not be negative, got {}",
            annual_mileage
        ))
        .into());
    }
    Ok(())
}

impl RatingServiceTrait for RatingService {
    fn resolve(
        &self,
        postcode: &str,
        vehicle_type: &str,
        annual_mileage: i64,
    ) -> Result<RatingResult> {
        validate_request(postcode, vehicle_type, annual_mileage)?;

        let region_factor = self.region_factor(postcode)?;
        let vehicle_factor = self.vehicle_factor(vehicle_type)?;
        let (mileage_factor, anomaly) = self.mileage_factor(annual_mileage)?;

        let composite_factor = region_factor * vehicle_factor * mileage_factor;
        debug!(
            "Rated {} / {} / {}: {} x {} x {} = {}",
            postcode,
            vehicle_type,
            annual_mileage,
            region_factor,
            vehicle_factor,
            mileage_factor,
            composite_factor
        );

        Ok(RatingResult {
            region_factor,
            vehicle_factor,
            mileage_factor,
            composite_factor,
            anomalies: anomaly.into_iter().collect(),
        })
    }

    fn check_mileage_bands(&self) -> Result<Vec<MileageBandIssue>> {
        let bands = self.mileage_repository.load_mileage_bands()?;
        Ok(validate_mileage_bands(&bands))
    }
}
