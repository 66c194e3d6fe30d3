use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::companies::Company;
use crate::merchants::{Merchant, MerchantEntry};
use crate::rates::ExchangeRateSettings;
use crate::transactions::Transaction;
use crate::treasuries::Treasury;
use crate::users::User;
use crate::wallets::EWallet;

/// Point-in-time export of every table in the store.
///
/// Password hashes are not serialized (the `Company` and `User` models skip
/// them), so a snapshot is safe to hand to the tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSnapshot {
    pub exported_at: NaiveDateTime,
    pub companies: Vec<Company>,
    pub users: Vec<User>,
    pub treasuries: Vec<Treasury>,
    pub exchange_rates: Vec<ExchangeRateSettings>,
    pub merchants: Vec<Merchant>,
    pub merchant_entries: Vec<MerchantEntry>,
    pub e_wallets: Vec<EWallet>,
    pub transactions: Vec<Transaction>,
}

impl BackupSnapshot {
    pub fn empty() -> Self {
        Self {
            exported_at: Utc::now().naive_utc(),
            companies: Vec::new(),
            users: Vec::new(),
            treasuries: Vec::new(),
            exchange_rates: Vec::new(),
            merchants: Vec::new(),
            merchant_entries: Vec::new(),
            e_wallets: Vec::new(),
            transactions: Vec::new(),
        }
    }
}
