//! Coverage checks for yearly mileage bands.
//!
//! A well-formed configuration partitions `[0, ∞)`: bands start at zero, do
//! not overlap, leave no integer uncovered and end with a single open-ended
//! band.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::band_index::{compare_bands, max_upper};
use super::mileage_model::MileageBand;

/// A defect in the mileage band configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum MileageBandIssue {
    Empty,
    NegativeLowerBound {
        band_id: i32,
        mileage_from: i64,
    },
    InvertedBounds {
        band_id: i32,
        mileage_from: i64,
        mileage_to: i64,
    },
    NonPositiveFactor {
        band_id: i32,
    },
    DoesNotStartAtZero {
        lowest_from: i64,
    },
    Gap {
        after_band_id: i32,
        before_band_id: i32,
        missing_from: i64,
        missing_to: i64,
    },
    Overlap {
        first_band_id: i32,
        second_band_id: i32,
    },
    MultipleOpenEnded {
        band_ids: Vec<i32>,
    },
    OpenEndedNotHighest {
        band_id: i32,
    },
    NoOpenEndedBand {
        highest_to: i64,
    },
}

impl fmt::Display for MileageBandIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MileageBandIssue::Empty => write!(f, "no mileage bands configured"),
            MileageBandIssue::NegativeLowerBound {
                band_id,
                mileage_from,
            } => write!(
                f,
                "band {} starts below zero ({})",
                band_id, mileage_from
            ),
            MileageBandIssue::InvertedBounds {
                band_id,
                mileage_from,
                mileage_to,
            } => write!(
                f,
                "band {} has upper bound {} below lower bound {}",
                band_id, mileage_to, mileage_from
            ),
            MileageBandIssue::NonPositiveFactor { band_id } => {
                write!(f, "band {} has a factor that is not positive", band_id)
            }
            MileageBandIssue::DoesNotStartAtZero { lowest_from } => write!(
                f,
                "mileage 0..{} is not covered (lowest band starts at {})",
                lowest_from - 1,
                lowest_from
            ),
            MileageBandIssue::Gap {
                after_band_id,
                before_band_id,
                missing_from,
                missing_to,
            } => write!(
                f,
                "mileage {}..{} is not covered (between bands {} and {})",
                missing_from, missing_to, after_band_id, before_band_id
            ),
            MileageBandIssue::Overlap {
                first_band_id,
                second_band_id,
            } => write!(
                f,
                "bands {} and {} overlap",
                first_band_id, second_band_id
            ),
            MileageBandIssue::MultipleOpenEnded { band_ids } => {
                write!(f, "more than one open-ended band: {:?}", band_ids)
            }
            MileageBandIssue::OpenEndedNotHighest { band_id } => write!(
                f,
                "open-ended band {} is not the highest band",
                band_id
            ),
            MileageBandIssue::NoOpenEndedBand { highest_to } => write!(
                f,
                "no open-ended band, mileage above {} is not covered",
                highest_to
            ),
        }
    }
}

/// Checks that `bands` partition `[0, ∞)`. An empty result means the
/// configuration is complete and free of overlaps.
pub fn validate_mileage_bands(bands: &[MileageBand]) -> Vec<MileageBandIssue> {
    if bands.is_empty() {
        return vec![MileageBandIssue::Empty];
    }

    let mut sorted: Vec<&MileageBand> = bands.iter().collect();
    sorted.sort_by(|a, b| compare_bands(a, b));

    let mut issues = Vec::new();

    for band in &sorted {
        if band.mileage_from < 0 {
            issues.push(MileageBandIssue::NegativeLowerBound {
                band_id: band.id,
                mileage_from: band.mileage_from,
            });
        }
        if let Some(to) = band.mileage_to {
            if to < band.mileage_from {
                issues.push(MileageBandIssue::InvertedBounds {
                    band_id: band.id,
                    mileage_from: band.mileage_from,
                    mileage_to: to,
                });
            }
        }
        if band.mileage_factor <= Decimal::ZERO {
            issues.push(MileageBandIssue::NonPositiveFactor { band_id: band.id });
        }
    }

    let lowest = sorted[0];
    if lowest.mileage_from > 0 {
        issues.push(MileageBandIssue::DoesNotStartAtZero {
            lowest_from: lowest.mileage_from,
        });
    }

    // Walk bands in order, tracking how far coverage reaches so far.
    let mut covered_to = lowest.mileage_to;
    let mut reaching_id = lowest.id;
    for band in sorted.iter().skip(1) {
        match covered_to {
            None => issues.push(MileageBandIssue::Overlap {
                first_band_id: reaching_id,
                second_band_id: band.id,
            }),
            Some(to) if band.mileage_from <= to => issues.push(MileageBandIssue::Overlap {
                first_band_id: reaching_id,
                second_band_id: band.id,
            }),
            Some(to) if band.mileage_from > to.saturating_add(1) => {
                issues.push(MileageBandIssue::Gap {
                    after_band_id: reaching_id,
                    before_band_id: band.id,
                    missing_from: to + 1,
                    missing_to: band.mileage_from - 1,
                })
            }
            Some(_) => {}
        }

        let extended = max_upper(covered_to, band.mileage_to);
        if extended != covered_to {
            covered_to = extended;
            reaching_id = band.id;
        }
    }

    let open_ended: Vec<&MileageBand> = sorted
        .iter()
        .copied()
        .filter(|band| band.is_open_ended())
        .collect();
    match open_ended.len() {
        0 => {
            let highest_to = sorted
                .iter()
                .filter_map(|band| band.mileage_to)
                .max()
                .unwrap_or(lowest.mileage_from);
            issues.push(MileageBandIssue::NoOpenEndedBand { highest_to });
        }
        1 => {}
        _ => issues.push(MileageBandIssue::MultipleOpenEnded {
            band_ids: open_ended.iter().map(|band| band.id).collect(),
        }),
    }

    let highest_from = sorted
        .iter()
        .map(|band| band.mileage_from)
        .max()
        .unwrap_or(lowest.mileage_from);
    for band in &open_ended {
        if band.mileage_from < highest_from {
            issues.push(MileageBandIssue::OpenEndedNotHighest { band_id: band.id });
        }
    }

    issues
}
