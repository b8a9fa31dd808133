/// Region factor file: region name column
pub const REGION_NAME_COLUMN: &str = "REGION1";

/// Region factor file: factor column
pub const REGION_FACTOR_COLUMN: &str = "REGION_FACTOR";

/// Postcode file (headerless): zero-based column holding the region name
pub const POSTCODE_REGION_INDEX: usize = 2;

/// Postcode file (headerless): zero-based column holding the postcode
pub const POSTCODE_CODE_INDEX: usize = 6;

/// Number of digits in a valid postcode
pub const POSTCODE_DIGITS: usize = 5;

/// Vehicle factor file: vehicle type column
pub const VEHICLE_TYPE_COLUMN: &str = "VEHICLE_TYPE";

/// Vehicle factor file: factor column
pub const VEHICLE_FACTOR_COLUMN: &str = "VEHICLE_FACTOR";

/// Mileage factor file: inclusive lower bound column
pub const MILEAGE_FROM_COLUMN: &str = "YEARLY_MILEAGE_FROM";

/// Mileage factor file: inclusive upper bound column
pub const MILEAGE_TO_COLUMN: &str = "YEARLY_MILEAGE_TO";

/// Mileage factor file: factor column
pub const MILEAGE_FACTOR_COLUMN: &str = "FACTOR";

/// Upper bound marker in the mileage file meaning "no upper bound"
pub const OPEN_ENDED_MARKER: i64 = -1;

/// Default file names inside the CSV directory
pub const POSTCODES_FILE: &str = "postcodes.csv";
pub const REGION_FACTORS_FILE: &str = "region_factor_mapping.csv";
pub const VEHICLE_FACTORS_FILE: &str = "vehicle_factor_mapping.csv";
pub const MILEAGE_FACTORS_FILE: &str = "yearly_mileage_factor_mapping.csv";
