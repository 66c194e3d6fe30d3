//! Ledger repository and service traits.

use async_trait::async_trait;

use super::ledger_model::{
    BalanceDelta, ExchangeRequest, LedgerPosting, MerchantEntryRequest, TreasuryMoveRequest,
    WalletFeedRequest, WalletTransferRequest,
};
use crate::errors::Result;
use crate::transactions::Transaction;

/// Contract for atomic ledger writes.
///
/// Implementations must apply every balance delta and the transaction row
/// inside one storage transaction, re-reading each balance before applying
/// its delta so guarded debits are checked against fresh state. Partial
/// application must be impossible.
#[async_trait]
pub trait LedgerRepositoryTrait: Send + Sync {
    /// Applies the posting and returns the recorded transaction.
    async fn commit(&self, posting: LedgerPosting) -> Result<Transaction>;

    /// Applies the inverse deltas and deletes the transaction row, as one
    /// unit.
    async fn reverse(&self, transaction_id: &str, deltas: Vec<BalanceDelta>) -> Result<()>;
}

/// Contract for the money-movement orchestrators.
///
/// Each operation runs the same pipeline: validate, duplicate guard (where
/// the type requires it), rate resolution (exchange only), sufficiency
/// checks, atomic commit. Failures come back as structured errors, never
/// panics.
#[async_trait]
pub trait LedgerServiceTrait: Send + Sync {
    /// Currency exchange against an employee's treasury.
    async fn exchange(&self, request: ExchangeRequest) -> Result<Transaction>;

    /// Main → employee float hand-out, or external cash into the main
    /// treasury.
    async fn feed_treasury(&self, request: TreasuryMoveRequest) -> Result<Transaction>;

    /// Employee → main float return, or external cash out of the main
    /// treasury.
    async fn withdraw_treasury(&self, request: TreasuryMoveRequest) -> Result<Transaction>;

    /// Main treasury EGP → e-wallet float.
    async fn feed_wallet(&self, request: WalletFeedRequest) -> Result<Transaction>;

    /// Outgoing e-wallet transfer; commission is charged on top of the
    /// transferred amount.
    async fn transfer_from_wallet(&self, request: WalletTransferRequest) -> Result<Transaction>;

    /// Merchant credit/debit plus its append-only audit entry.
    async fn record_merchant_entry(&self, request: MerchantEntryRequest) -> Result<Transaction>;

    /// Reverses an exchange: inverse deltas, then the record is deleted.
    async fn reverse_transaction(&self, transaction_id: &str) -> Result<()>;
}
