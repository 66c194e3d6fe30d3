use diesel::prelude::*;
use std::sync::Arc;

use crate::companies::CompanyDb;
use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::merchants::{MerchantDb, MerchantEntryDb};
use crate::rates::ExchangeRateDb;
use crate::schema::{
    companies, e_wallets, exchange_rates, merchant_entries, merchants, transactions, treasuries,
    users,
};
use crate::transactions::TransactionDb;
use crate::treasuries::TreasuryDb;
use crate::users::UserDb;
use crate::wallets::EWalletDb;

use sarraf_core::companies::Company;
use sarraf_core::errors::Result;
use sarraf_core::merchants::{Merchant, MerchantEntry};
use sarraf_core::rates::ExchangeRateSettings;
use sarraf_core::snapshot::{BackupSnapshot, SnapshotRepositoryTrait};
use sarraf_core::transactions::Transaction;
use sarraf_core::treasuries::Treasury;
use sarraf_core::users::User;
use sarraf_core::wallets::EWallet;

/// Repository reading every table on one connection for backup export.
pub struct SnapshotRepository {
    pool: Arc<DbPool>,
}

impl SnapshotRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl SnapshotRepositoryTrait for SnapshotRepository {
    fn export_all(&self) -> Result<BackupSnapshot> {
        let mut conn = get_connection(&self.pool)?;

        let mut snapshot = BackupSnapshot::empty();

        snapshot.companies = companies::table
            .select(CompanyDb::as_select())
            .load::<CompanyDb>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Company::try_from)
            .collect::<Result<_>>()?;

        snapshot.users = users::table
            .select(UserDb::as_select())
            .load::<UserDb>(&mut conn)
            .into_core()?
            .into_iter()
            .map(User::try_from)
            .collect::<Result<_>>()?;

        snapshot.treasuries = treasuries::table
            .select(TreasuryDb::as_select())
            .load::<TreasuryDb>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Treasury::try_from)
            .collect::<Result<_>>()?;

        snapshot.exchange_rates = exchange_rates::table
            .select(ExchangeRateDb::as_select())
            .load::<ExchangeRateDb>(&mut conn)
            .into_core()?
            .into_iter()
            .map(ExchangeRateSettings::try_from)
            .collect::<Result<_>>()?;

        snapshot.merchants = merchants::table
            .select(MerchantDb::as_select())
            .load::<MerchantDb>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Merchant::try_from)
            .collect::<Result<_>>()?;

        snapshot.merchant_entries = merchant_entries::table
            .select(MerchantEntryDb::as_select())
            .load::<MerchantEntryDb>(&mut conn)
            .into_core()?
            .into_iter()
            .map(MerchantEntry::try_from)
            .collect::<Result<_>>()?;

        snapshot.e_wallets = e_wallets::table
            .select(EWalletDb::as_select())
            .load::<EWalletDb>(&mut conn)
            .into_core()?
            .into_iter()
            .map(EWallet::try_from)
            .collect::<Result<_>>()?;

        snapshot.transactions = transactions::table
            .select(TransactionDb::as_select())
            .order(transactions::created_at.asc())
            .load::<TransactionDb>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Transaction::try_from)
            .collect::<Result<_>>()?;

        Ok(snapshot)
    }
}
