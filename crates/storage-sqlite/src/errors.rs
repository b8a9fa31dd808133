//! Storage-specific error types for SQLite operations.
//!
//! This module wraps Diesel and r2d2 errors and converts them to the
//! database-agnostic error types defined in `vehicle_rating_core`.

use diesel::result::Error as DieselError;
use thiserror::Error;
use vehicle_rating_core::errors::{DatabaseError, Error};

/// Storage-specific errors that wrap Diesel and r2d2 types.
///
/// These errors stay inside the storage layer and are converted to
/// `vehicle_rating_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Core error: {0}")]
    CoreError(Box<Error>),
}

/// Lets write jobs return core errors from inside a transaction.
impl From<Error> for StorageError {
    fn from(err: Error) -> Self {
        StorageError::CoreError(Box::new(err))
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::PoolCreationFailed(e.to_string()))
            }
            StorageError::QueryFailed(DieselError::NotFound) => {
                Error::Database(DatabaseError::NotFound("Record not found".to_string()))
            }
            StorageError::QueryFailed(DieselError::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                info,
            )) => Error::Database(DatabaseError::UniqueViolation(info.message().to_string())),
            StorageError::QueryFailed(DieselError::DatabaseError(
                diesel::result::DatabaseErrorKind::ForeignKeyViolation,
                info,
            )) => Error::Database(DatabaseError::ForeignKeyViolation(
                info.message().to_string(),
            )),
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            // The job's own error passes through the transaction unchanged.
            StorageError::CoreError(e) => *e,
        }
    }
}

/// Extension trait for converting Diesel and r2d2 results to core results.
///
/// Orphan rules prevent `From<DieselError> for Error`, so the conversion goes
/// through [`StorageError`].
pub trait IntoCore<T> {
    fn into_core(self) -> vehicle_rating_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> vehicle_rating_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> vehicle_rating_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}
