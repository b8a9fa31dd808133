//! Imports module - loading reference data files and writing them to the store.

mod csv_loader;
mod import_model;
mod import_service;
mod import_traits;

pub use csv_loader::{
    load_mileage_factors, load_postcodes, load_region_factors, load_vehicle_factors,
};
pub use import_model::{
    ImportReport, ImportSources, ImportStage, ImportSummary, MileageFactorRecord,
    PostcodeRecord, StageOutcome, VehicleFactorRecord,
};
pub use import_service::ImportService;
pub use import_traits::ImportServiceTrait;
