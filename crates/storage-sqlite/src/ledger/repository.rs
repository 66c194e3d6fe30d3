use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::db::WriteHandle;
use crate::errors::IntoCore;
use crate::events::{Collection, MutationKind, StoreEvent, StoreNotifier};
use crate::merchants::MerchantEntryDb;
use crate::schema::{e_wallets, merchants, transactions, treasuries};
use crate::transactions::TransactionDb;

use sarraf_core::currency::Currency;
use sarraf_core::errors::{Error, Result};
use sarraf_core::ledger::{BalanceDelta, BalanceTarget, LedgerPosting, LedgerRepositoryTrait};
use sarraf_core::transactions::Transaction;

/// Repository applying ledger postings.
///
/// Every posting runs as one write-actor job, which the actor wraps in an
/// immediate transaction. Balances are re-read inside that transaction, so
/// a guarded debit is checked against the committed state and two postings
/// can never jointly overdraw a balance.
pub struct LedgerRepository {
    writer: WriteHandle,
    notifier: StoreNotifier,
}

impl LedgerRepository {
    pub fn new(writer: WriteHandle, notifier: StoreNotifier) -> Self {
        Self { writer, notifier }
    }
}

#[async_trait]
impl LedgerRepositoryTrait for LedgerRepository {
    async fn commit(&self, posting: LedgerPosting) -> Result<Transaction> {
        let deltas = posting.deltas;
        let mut transaction_db: TransactionDb = posting.transaction.into();
        transaction_db.id = uuid::Uuid::new_v4().to_string();
        let entry_db = posting.merchant_entry.map(|entry| {
            let mut entry_db: MerchantEntryDb = entry.into();
            entry_db.id = uuid::Uuid::new_v4().to_string();
            entry_db
        });
        let entry_id = entry_db.as_ref().map(|entry| entry.id.clone());

        let stored = self
            .writer
            .exec(move |conn| {
                for delta in &deltas {
                    apply_delta(conn, delta)?;
                }

                diesel::insert_into(transactions::table)
                    .values(&transaction_db)
                    .execute(conn)
                    .into_core()?;

                if let Some(entry_db) = &entry_db {
                    diesel::insert_into(crate::schema::merchant_entries::table)
                        .values(entry_db)
                        .execute(conn)
                        .into_core()?;
                }

                Ok(transaction_db)
            })
            .await?;

        let transaction: Transaction = stored.try_into()?;
        self.notifier.notify(StoreEvent::new(
            Collection::Transactions,
            MutationKind::Created,
            transaction.id.clone(),
        ));
        if let Some(entry_id) = entry_id {
            self.notifier.notify(StoreEvent::new(
                Collection::MerchantEntries,
                MutationKind::Created,
                entry_id,
            ));
        }
        Ok(transaction)
    }

    async fn reverse(&self, transaction_id: &str, deltas: Vec<BalanceDelta>) -> Result<()> {
        let id_owned = transaction_id.to_string();

        let reversed_id = self
            .writer
            .exec(move |conn| {
                for delta in &deltas {
                    apply_delta(conn, delta)?;
                }

                let affected = diesel::delete(transactions::table.find(&id_owned))
                    .execute(conn)
                    .into_core()?;
                if affected == 0 {
                    return Err(diesel::result::Error::NotFound).into_core();
                }

                Ok(id_owned)
            })
            .await?;

        self.notifier.notify(StoreEvent::new(
            Collection::Transactions,
            MutationKind::Deleted,
            reversed_id,
        ));
        Ok(())
    }
}

/// Applies one signed delta against the current committed balance. Runs
/// inside the write-actor transaction.
fn apply_delta(conn: &mut SqliteConnection, delta: &BalanceDelta) -> Result<()> {
    let now = chrono::Utc::now().naive_utc();

    let current: String = match &delta.target {
        BalanceTarget::Treasury(id) => match delta.currency {
            Currency::Egp => treasuries::table
                .find(id)
                .select(treasuries::egp_balance)
                .first(conn)
                .into_core()?,
            Currency::Sdg => treasuries::table
                .find(id)
                .select(treasuries::sdg_balance)
                .first(conn)
                .into_core()?,
        },
        BalanceTarget::Merchant(id) => match delta.currency {
            Currency::Egp => merchants::table
                .find(id)
                .select(merchants::egp_balance)
                .first(conn)
                .into_core()?,
            Currency::Sdg => merchants::table
                .find(id)
                .select(merchants::sdg_balance)
                .first(conn)
                .into_core()?,
        },
        BalanceTarget::Wallet(id) => e_wallets::table
            .find(id)
            .select(e_wallets::balance)
            .first(conn)
            .into_core()?,
    };

    let next = Decimal::from_str(&current)? + delta.amount;
    if delta.guarded && next < Decimal::ZERO {
        return Err(Error::InsufficientFunds {
            entity: delta.target.describe(),
            currency: delta.currency,
            shortfall: -next,
        });
    }
    let next = next.to_string();

    match &delta.target {
        BalanceTarget::Treasury(id) => match delta.currency {
            Currency::Egp => diesel::update(treasuries::table.find(id))
                .set((
                    treasuries::egp_balance.eq(next),
                    treasuries::updated_at.eq(now),
                ))
                .execute(conn)
                .into_core()?,
            Currency::Sdg => diesel::update(treasuries::table.find(id))
                .set((
                    treasuries::sdg_balance.eq(next),
                    treasuries::updated_at.eq(now),
                ))
                .execute(conn)
                .into_core()?,
        },
        BalanceTarget::Merchant(id) => match delta.currency {
            Currency::Egp => diesel::update(merchants::table.find(id))
                .set((
                    merchants::egp_balance.eq(next),
                    merchants::updated_at.eq(now),
                ))
                .execute(conn)
                .into_core()?,
            Currency::Sdg => diesel::update(merchants::table.find(id))
                .set((
                    merchants::sdg_balance.eq(next),
                    merchants::updated_at.eq(now),
                ))
                .execute(conn)
                .into_core()?,
        },
        BalanceTarget::Wallet(id) => diesel::update(e_wallets::table.find(id))
            .set((e_wallets::balance.eq(next), e_wallets::updated_at.eq(now)))
            .execute(conn)
            .into_core()?,
    };

    Ok(())
}
