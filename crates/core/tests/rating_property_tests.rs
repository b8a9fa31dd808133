//! Property-based integration tests for mileage band coverage and rating
//! composition, using the `proptest` crate for random test case generation.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use proptest::prelude::*;
use rust_decimal::Decimal;
use vehicle_rating_core::mileage::{
    validate_mileage_bands, BandMatch, MileageBand, MileageBandIndex, MileageBandIssue,
    MileageBandRepositoryTrait, NewMileageBand,
};
use vehicle_rating_core::rating::{RatingService, RatingServiceTrait};
use vehicle_rating_core::regions::{
    NewPostcode, NewRegion, Postcode, PostcodeRegion, Region, RegionRepositoryTrait,
};
use vehicle_rating_core::vehicles::{NewVehicleType, VehicleRepositoryTrait, VehicleType};
use vehicle_rating_core::{Error, Result};

// =============================================================================
// Fixture
// =============================================================================

/// Single-row reference data: one postcode, one vehicle type, a set of bands.
struct Fixture {
    region: Region,
    vehicle: VehicleType,
    bands: Vec<MileageBand>,
}

#[async_trait]
impl RegionRepositoryTrait for Fixture {
    fn find_region_for_postcode(&self, postcode: &str) -> Result<Option<PostcodeRegion>> {
        Ok((postcode == "NP1").then(|| PostcodeRegion {
            postcode: Postcode {
                id: 1,
                postcode: postcode.to_string(),
                region_id: Some(self.region.id),
            },
            region: Some(self.region.clone()),
        }))
    }
    fn find_region_by_name(&self, _: &str) -> Result<Option<Region>> {
        unimplemented!()
    }
    fn load_postcode_codes(&self) -> Result<HashSet<String>> {
        unimplemented!()
    }
    async fn insert_region(&self, _: NewRegion) -> Result<Region> {
        unimplemented!()
    }
    async fn insert_postcodes(&self, _: Vec<NewPostcode>) -> Result<usize> {
        unimplemented!()
    }
    async fn link_orphan_postcodes(&self, _: Vec<String>, _: i32) -> Result<usize> {
        unimplemented!()
    }
}

#[async_trait]
impl VehicleRepositoryTrait for Fixture {
    fn find_vehicle_type(&self, vehicle_type: &str) -> Result<Option<VehicleType>> {
        Ok((vehicle_type == self.vehicle.vehicle_type).then(|| self.vehicle.clone()))
    }
    async fn insert_vehicle_type(&self, _: NewVehicleType) -> Result<VehicleType> {
        unimplemented!()
    }
}

#[async_trait]
impl MileageBandRepositoryTrait for Fixture {
    fn load_mileage_bands(&self) -> Result<Vec<MileageBand>> {
        Ok(self.bands.clone())
    }
    fn find_mileage_band(&self, _: i64, _: Option<i64>) -> Result<Option<MileageBand>> {
        unimplemented!()
    }
    async fn insert_mileage_band(&self, _: NewMileageBand) -> Result<MileageBand> {
        unimplemented!()
    }
}

// =============================================================================
// Generators
// =============================================================================

/// A positive factor with up to three decimal places.
fn arb_factor() -> impl Strategy<Value = Decimal> {
    (1i64..5000).prop_map(|units| Decimal::new(units, 3))
}

/// A complete partition of `[0, ∞)`: consecutive closed bands of the given
/// widths followed by one open-ended band.
fn arb_partition() -> impl Strategy<Value = Vec<MileageBand>> {
    proptest::collection::vec((1i64..20_000, arb_factor()), 0..8).prop_flat_map(|closed| {
        arb_factor().prop_map(move |open_factor| {
            let mut bands = Vec::with_capacity(closed.len() + 1);
            let mut from = 0i64;
            for (i, (width, factor)) in closed.iter().enumerate() {
                bands.push(MileageBand {
                    id: i as i32 + 1,
                    mileage_from: from,
                    mileage_to: Some(from + width - 1),
                    mileage_factor: *factor,
                });
                from += width;
            }
            bands.push(MileageBand {
                id: closed.len() as i32 + 1,
                mileage_from: from,
                mileage_to: None,
                mileage_factor: open_factor,
            });
            bands
        })
    })
}

fn matched_id(found: BandMatch<'_>) -> Option<i32> {
    match found {
        BandMatch::Single(band) => Some(band.id),
        _ => None,
    }
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A generated partition has no gaps and no overlaps.
    #[test]
    fn prop_partition_is_valid(bands in arb_partition()) {
        prop_assert!(validate_mileage_bands(&bands).is_empty());
    }

    /// Every mileage resolves to exactly one band, and that band contains it.
    #[test]
    fn prop_every_mileage_has_exactly_one_band(
        bands in arb_partition(),
        mileage in 0i64..200_000,
    ) {
        let index = MileageBandIndex::new(bands);
        match index.lookup(mileage) {
            BandMatch::Single(band) => prop_assert!(band.contains(mileage)),
            other => prop_assert!(false, "expected single match, got {:?}", other),
        }
    }

    /// An upper bound belongs to its own band; the next integer to the next band.
    #[test]
    fn prop_boundaries_are_inclusive(bands in arb_partition()) {
        let index = MileageBandIndex::new(bands.clone());
        for pair in bands.windows(2) {
            let upper = pair[0].mileage_to.unwrap();
            prop_assert_eq!(matched_id(index.lookup(upper)), Some(pair[0].id));
            prop_assert_eq!(matched_id(index.lookup(upper + 1)), Some(pair[1].id));
            prop_assert_eq!(matched_id(index.lookup(pair[1].mileage_from)), Some(pair[1].id));
        }
    }

    /// Removing an inner band leaves a gap that is reported and not patched.
    #[test]
    fn prop_removed_band_is_reported_as_gap(
        bands in arb_partition().prop_filter("needs an inner band", |b| b.len() >= 3),
        pick in any::<prop::sample::Index>(),
    ) {
        let removed_at = 1 + pick.index(bands.len() - 2);
        let mut remaining = bands.clone();
        let removed = remaining.remove(removed_at);

        let issues = validate_mileage_bands(&remaining);
        let has_gap = issues
            .iter()
            .any(|issue| matches!(issue, MileageBandIssue::Gap { .. }));
        prop_assert!(has_gap);

        let index = MileageBandIndex::new(remaining);
        prop_assert_eq!(index.lookup(removed.mileage_from), BandMatch::None);
    }

    /// Stretching a band into its successor is reported as an overlap, and
    /// lookups inside the overlap use the lower band.
    #[test]
    fn prop_stretched_band_is_reported_as_overlap(
        bands in arb_partition().prop_filter("needs two bands", |b| b.len() >= 2),
        pick in any::<prop::sample::Index>(),
    ) {
        let at = pick.index(bands.len() - 1);
        let mut stretched = bands.clone();
        let upper = stretched[at].mileage_to.unwrap();
        stretched[at].mileage_to = Some(upper + 1);

        let issues = validate_mileage_bands(&stretched);
        let expected = MileageBandIssue::Overlap {
            first_band_id: stretched[at].id,
            second_band_id: stretched[at + 1].id,
        };
        prop_assert!(issues.contains(&expected));

        let index = MileageBandIndex::new(stretched.clone());
        match index.lookup(upper + 1) {
            BandMatch::Overlap { chosen, matching_ids } => {
                prop_assert_eq!(chosen.id, stretched[at].id);
                prop_assert_eq!(matching_ids, vec![stretched[at].id, stretched[at + 1].id]);
            }
            other => prop_assert!(false, "expected overlap, got {:?}", other),
        }
    }

    /// The composite factor is the exact product of the three components, and
    /// repeated calls give bit-identical results.
    #[test]
    fn prop_composite_is_exact_product(
        region_factor in arb_factor(),
        vehicle_factor in arb_factor(),
        bands in arb_partition(),
        mileage in 0i64..200_000,
    ) {
        let fixture = Arc::new(Fixture {
            region: Region { id: 1, name: "North".to_string(), region_factor },
            vehicle: VehicleType { id: 1, vehicle_type: "Van".to_string(), vehicle_factor },
            bands,
        });
        let service = RatingService::new(fixture.clone(), fixture.clone(), fixture.clone());

        let result = service.resolve("NP1", "Van", mileage).unwrap();
        prop_assert_eq!(result.region_factor, region_factor);
        prop_assert_eq!(result.vehicle_factor, vehicle_factor);
        prop_assert_eq!(
            result.composite_factor,
            region_factor * vehicle_factor * result.mileage_factor
        );

        let again = service.resolve("NP1", "Van", mileage).unwrap();
        prop_assert_eq!(again.composite_factor.serialize(), result.composite_factor.serialize());

        let unknown = service.resolve("NP2", "Van", mileage);
        prop_assert!(matches!(unknown, Err(Error::Rating(_))));
    }
}
