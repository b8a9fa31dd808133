//! Sorted-interval search over yearly mileage bands.
//!
//! Bands are kept ordered by lower bound so a lookup is a binary search for
//! the last band starting at or below the mileage, followed by a short walk
//! back over earlier bands that may still reach it. `reach[i]` holds the
//! furthest upper bound among `bands[..=i]`, which bounds that walk.

use std::cmp::Ordering;

use super::mileage_model::MileageBand;

/// Outcome of a mileage band lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum BandMatch<'a> {
    /// No band contains the mileage.
    None,
    /// Exactly one band contains the mileage.
    Single(&'a MileageBand),
    /// Several bands contain the mileage. `chosen` is the one with the
    /// smallest lower bound; `matching_ids` lists every matching band in
    /// ascending order of lower bound.
    Overlap {
        chosen: &'a MileageBand,
        matching_ids: Vec<i32>,
    },
}

/// Read-only index over a snapshot of mileage bands.
#[derive(Debug, Clone)]
pub struct MileageBandIndex {
    bands: Vec<MileageBand>,
    reach: Vec<Option<i64>>,
}

impl MileageBandIndex {
    pub fn new(mut bands: Vec<MileageBand>) -> Self {
        bands.sort_by(compare_bands);

        let mut reach = Vec::with_capacity(bands.len());
        let mut furthest: Option<Option<i64>> = None;
        for band in &bands {
            let next = match furthest {
                None => band.mileage_to,
                Some(current) => max_upper(current, band.mileage_to),
            };
            furthest = Some(next);
            reach.push(next);
        }

        MileageBandIndex { bands, reach }
    }

    /// Bands in ascending order of lower bound.
    pub fn bands(&self) -> &[MileageBand] {
        &self.bands
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    pub fn lookup(&self, annual_mileage: i64) -> BandMatch<'_> {
        let end = self
            .bands
            .partition_point(|band| band.mileage_from <= annual_mileage);

        let mut matching: Vec<&MileageBand> = Vec::new();
        for i in (0..end).rev() {
            if let Some(reach) = self.reach[i] {
                if reach < annual_mileage {
                    break;
                }
            }
            let band = &self.bands[i];
            if band.contains(annual_mileage) {
                matching.push(band);
            }
        }
        matching.reverse();

        match matching.len() {
            0 => BandMatch::None,
            1 => BandMatch::Single(matching[0]),
            _ => BandMatch::Overlap {
                chosen: matching[0],
                matching_ids: matching.iter().map(|band| band.id).collect(),
            },
        }
    }
}

/// Orders bands by lower bound, then upper bound (open-ended last), then id.
pub(crate) fn compare_bands(a: &MileageBand, b: &MileageBand) -> Ordering {
    a.mileage_from
        .cmp(&b.mileage_from)
        .then_with(|| compare_upper(a.mileage_to, b.mileage_to))
        .then_with(|| a.id.cmp(&b.id))
}

fn compare_upper(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub(crate) fn max_upper(a: Option<i64>, b: Option<i64>) -> Option<i64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        _ => None,
    }
}
