//! SQLite storage implementation for the vehicle rating reference data.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `vehicle-rating-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for regions, vehicle types and mileage bands
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the workspace where Diesel dependencies exist.
//! The `core` crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod mileage;
pub mod regions;
pub mod vehicles;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export repositories
pub use mileage::MileageBandRepository;
pub use regions::RegionRepository;
pub use vehicles::VehicleRepository;

// Re-export from vehicle-rating-core for convenience
pub use vehicle_rating_core::errors::{DatabaseError, Error, Result};
