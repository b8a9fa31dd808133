//! Vehicle Rating Core - Domain entities, services, and traits.
//!
//! This crate contains the rating-factor resolution logic and the reference
//! data import pipeline. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod imports;
pub mod mileage;
pub mod rating;
pub mod regions;
pub mod vehicles;

#[cfg(test)]
mod test_support;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
