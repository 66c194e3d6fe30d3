use std::time::Duration;

/// Decimal precision for monetary amounts
pub const DECIMAL_PRECISION: u32 = 2;

/// Decimal precision for stored exchange rates
pub const RATE_PRECISION: u32 = 4;

/// Upper bound for a single ledger commit; elapsing maps to `Error::Unavailable`
pub const LEDGER_COMMIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Minimum accepted password length for user accounts
pub const MIN_PASSWORD_LENGTH: usize = 8;
