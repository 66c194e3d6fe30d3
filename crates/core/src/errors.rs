//! Core error types for the Sarraf ledger engine.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage
//! layer. Orchestrators return these as structured results; nothing in the
//! engine panics for control flow.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::currency::Currency;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the ledger engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A transaction with the same tenant, type, receipt number and amount
    /// already exists; the retry was blocked.
    #[error("A transaction with receipt number '{receipt_number}' and the same amount was already recorded; change the receipt number or the amount to submit again")]
    DuplicateTransaction { receipt_number: String },

    /// The tenant has no exchange rate settings row.
    #[error("No exchange rate is configured for company {0}")]
    RateNotConfigured(String),

    /// A guarded debit would drive a balance below zero.
    #[error("Insufficient {currency} funds in {entity}: short by {shortfall}")]
    InsufficientFunds {
        entity: String,
        currency: Currency,
        shortfall: Decimal,
    },

    /// A referenced treasury, wallet, merchant, employee or transaction is missing.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Reversal was requested for a transaction type that is not reversible.
    #[error("Transaction is not reversible: {0}")]
    NotReversible(String),

    /// The store was unreachable or the commit timed out. Retryable; the
    /// write may or may not have been applied.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
///
/// Uses `String` for all details, allowing the storage layer to convert
/// storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    #[error("Database query failed: {0}")]
    QueryFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    #[error("Database backup failed: {0}")]
    BackupFailed(String),
}

/// Validation failures for input models.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}
