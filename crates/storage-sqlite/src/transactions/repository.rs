use async_trait::async_trait;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::transactions;

use super::model::TransactionDb;
use sarraf_core::errors::Result;
use sarraf_core::transactions::{Transaction, TransactionRepositoryTrait, TransactionType};

/// Read-side repository for the audit trail. Inserts and deletes happen in
/// the ledger repository, inside the same transaction as the balance deltas.
pub struct TransactionRepository {
    pool: Arc<DbPool>,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn get_by_id(&self, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;

        let row = transactions::table
            .select(TransactionDb::as_select())
            .find(transaction_id)
            .first::<TransactionDb>(&mut conn)
            .into_core()?;

        row.try_into()
    }

    fn list(
        &self,
        company_id_param: &str,
        type_filter: Option<TransactionType>,
    ) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = transactions::table
            .filter(transactions::company_id.eq(company_id_param))
            .into_boxed();
        if let Some(transaction_type) = type_filter {
            query = query.filter(transactions::transaction_type.eq(transaction_type.as_str()));
        }

        let rows = query
            .select(TransactionDb::as_select())
            .order(transactions::created_at.desc())
            .load::<TransactionDb>(&mut conn)
            .into_core()?;

        rows.into_iter().map(Transaction::try_from).collect()
    }

    fn find_duplicate(
        &self,
        company_id_param: &str,
        transaction_type: TransactionType,
        receipt_number_param: &str,
        from_amount_param: Decimal,
    ) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;

        // Amounts are stored as decimal strings, where "500" and "500.00"
        // are distinct texts for the same value. Candidates are narrowed in
        // SQL and the amount is compared as a parsed decimal.
        let stored_amounts: Vec<String> = transactions::table
            .filter(transactions::company_id.eq(company_id_param))
            .filter(transactions::transaction_type.eq(transaction_type.as_str()))
            .filter(transactions::receipt_number.eq(receipt_number_param))
            .select(transactions::from_amount)
            .load(&mut conn)
            .into_core()?;

        for stored in stored_amounts {
            if Decimal::from_str(&stored)? == from_amount_param {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
