use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::events::{Collection, MutationKind, StoreEvent, StoreNotifier};
use crate::schema::e_wallets;

use super::model::EWalletDb;
use sarraf_core::errors::Result;
use sarraf_core::wallets::{EWallet, EWalletUpdate, NewEWallet, WalletRepositoryTrait};

/// Repository for e-wallet rows. The balance column is written only by the
/// ledger repository.
pub struct WalletRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    notifier: StoreNotifier,
}

impl WalletRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle, notifier: StoreNotifier) -> Self {
        Self {
            pool,
            writer,
            notifier,
        }
    }
}

#[async_trait]
impl WalletRepositoryTrait for WalletRepository {
    async fn create(&self, new_wallet: NewEWallet) -> Result<EWallet> {
        new_wallet.validate()?;

        let mut wallet_db: EWalletDb = new_wallet.into();
        wallet_db.id = uuid::Uuid::new_v4().to_string();

        let wallet: EWallet = self
            .writer
            .exec(move |conn| {
                diesel::insert_into(e_wallets::table)
                    .values(&wallet_db)
                    .execute(conn)
                    .into_core()?;

                wallet_db.try_into()
            })
            .await?;

        self.notifier.notify(StoreEvent::new(
            Collection::EWallets,
            MutationKind::Created,
            wallet.id.clone(),
        ));
        Ok(wallet)
    }

    async fn update(&self, wallet_update: EWalletUpdate) -> Result<EWallet> {
        wallet_update.validate()?;

        let wallet: EWallet = self
            .writer
            .exec(move |conn| {
                let affected = diesel::update(e_wallets::table.find(&wallet_update.id))
                    .set((
                        e_wallets::phone_number.eq(&wallet_update.phone_number),
                        e_wallets::provider.eq(&wallet_update.provider),
                        e_wallets::is_active.eq(wallet_update.is_active),
                        e_wallets::updated_at.eq(chrono::Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;

                if affected == 0 {
                    return Err(diesel::result::Error::NotFound).into_core();
                }

                let stored = e_wallets::table
                    .select(EWalletDb::as_select())
                    .find(&wallet_update.id)
                    .first::<EWalletDb>(conn)
                    .into_core()?;

                stored.try_into()
            })
            .await?;

        self.notifier.notify(StoreEvent::new(
            Collection::EWallets,
            MutationKind::Updated,
            wallet.id.clone(),
        ));
        Ok(wallet)
    }

    fn get_by_id(&self, wallet_id: &str) -> Result<EWallet> {
        let mut conn = get_connection(&self.pool)?;

        let row = e_wallets::table
            .select(EWalletDb::as_select())
            .find(wallet_id)
            .first::<EWalletDb>(&mut conn)
            .into_core()?;

        row.try_into()
    }

    fn list(&self, company_id_param: &str, is_active_filter: Option<bool>) -> Result<Vec<EWallet>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = e_wallets::table
            .filter(e_wallets::company_id.eq(company_id_param))
            .into_boxed();
        if let Some(active) = is_active_filter {
            query = query.filter(e_wallets::is_active.eq(active));
        }

        let rows = query
            .select(EWalletDb::as_select())
            .order(e_wallets::created_at.asc())
            .load::<EWalletDb>(&mut conn)
            .into_core()?;

        rows.into_iter().map(EWallet::try_from).collect()
    }

    fn list_by_employee(&self, employee_id_param: &str) -> Result<Vec<EWallet>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = e_wallets::table
            .select(EWalletDb::as_select())
            .filter(e_wallets::employee_id.eq(employee_id_param))
            .order(e_wallets::created_at.asc())
            .load::<EWalletDb>(&mut conn)
            .into_core()?;

        rows.into_iter().map(EWallet::try_from).collect()
    }
}
