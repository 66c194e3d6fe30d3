use std::sync::Arc;

use super::transactions_model::{Transaction, TransactionType};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::errors::Result;

/// Read-side service over the transaction audit trail.
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    pub fn new(repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        Self { repository }
    }
}

impl TransactionServiceTrait for TransactionService {
    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        self.repository.get_by_id(transaction_id)
    }

    fn list_transactions(
        &self,
        company_id: &str,
        type_filter: Option<TransactionType>,
    ) -> Result<Vec<Transaction>> {
        self.repository.list(company_id, type_filter)
    }
}
