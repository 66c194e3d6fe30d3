//! Transaction repository and service traits.
//!
//! Inserting and deleting transaction rows is the ledger repository's job
//! (they must share a storage transaction with the balance deltas); this
//! trait covers reads and the duplicate guard query.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::transactions_model::{Transaction, TransactionType};
use crate::errors::Result;

/// Contract for transaction reads.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    fn get_by_id(&self, transaction_id: &str) -> Result<Transaction>;

    /// Newest first, optionally narrowed to one type.
    fn list(
        &self,
        company_id: &str,
        type_filter: Option<TransactionType>,
    ) -> Result<Vec<Transaction>>;

    /// Exact match on tenant + type + receipt number + from_amount.
    fn find_duplicate(
        &self,
        company_id: &str,
        transaction_type: TransactionType,
        receipt_number: &str,
        from_amount: Decimal,
    ) -> Result<bool>;
}

/// Contract for transaction queries.
pub trait TransactionServiceTrait: Send + Sync {
    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction>;

    fn list_transactions(
        &self,
        company_id: &str,
        type_filter: Option<TransactionType>,
    ) -> Result<Vec<Transaction>>;
}
