//! Storage-specific error types for SQLite operations.
//!
//! Wraps Diesel and r2d2 errors and converts them to the database-agnostic
//! types defined in `sarraf_core`. Domain errors raised inside a write job
//! (insufficient funds, duplicate receipt) are carried through unchanged so
//! callers still see the structured variant, not a stringified copy.

use diesel::result::Error as DieselError;
use thiserror::Error;

use sarraf_core::errors::{DatabaseError, Error};

/// Storage-layer errors. Converted to `sarraf_core::Error` at the crate
/// boundary.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// A domain error that crossed the write-actor transaction boundary.
    /// Kept intact so the variant survives the round trip.
    #[error(transparent)]
    Core(Error),
}

impl From<Error> for StorageError {
    fn from(err: Error) -> Self {
        StorageError::Core(err)
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
            StorageError::MigrationFailed(e) => Error::Database(DatabaseError::MigrationFailed(e)),
            StorageError::Core(e) => e,
        }
    }
}

/// Extension trait for converting Diesel Results to core Results.
///
/// `From<DieselError> for Error` would violate orphan rules, so the
/// conversion goes through `StorageError` via this method.
pub trait IntoCore<T> {
    fn into_core(self) -> sarraf_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> sarraf_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> sarraf_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_survive_the_round_trip() {
        let original = Error::DuplicateTransaction {
            receipt_number: "R1".to_string(),
        };
        let back: Error = StorageError::from(original).into();
        assert!(matches!(back, Error::DuplicateTransaction { .. }));
    }

    #[test]
    fn not_found_maps_to_database_not_found() {
        let back: Error = StorageError::QueryFailed(DieselError::NotFound).into();
        assert!(matches!(back, Error::Database(DatabaseError::NotFound(_))));
    }
}
