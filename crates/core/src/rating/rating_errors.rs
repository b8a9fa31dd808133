use thiserror::Error;

/// Reasons a rating request cannot be resolved.
///
/// All of them stem from missing or inconsistent reference data and are
/// returned to the caller as-is; none is worth retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// The postcode is unknown, or it is not linked to a region.
    #[error("No region found for postcode '{postcode}'")]
    UnknownRegion { postcode: String },

    #[error("Unknown vehicle type '{vehicle_type}'")]
    UnknownVehicleType { vehicle_type: String },

    /// The mileage falls into a gap of the configured bands.
    #[error("No mileage band covers an annual mileage of {annual_mileage}")]
    NoMileageBand { annual_mileage: i64 },
}
