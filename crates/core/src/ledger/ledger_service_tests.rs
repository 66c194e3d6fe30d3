use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::*;
use crate::currency::{Currency, ExchangeDirection};
use crate::errors::{DatabaseError, Error, Result};
use crate::merchants::{
    Merchant, MerchantEntry, MerchantEntryType, MerchantRepositoryTrait, MerchantUpdate,
    NewMerchant,
};
use crate::rates::{ExchangeRateSettings, RateRepositoryTrait, RateService, RateSettingsUpdate};
use crate::transactions::{Transaction, TransactionRepositoryTrait, TransactionType};
use crate::treasuries::{NewTreasury, Treasury, TreasuryKind, TreasuryRepositoryTrait};
use crate::wallets::{EWallet, EWalletUpdate, NewEWallet, WalletRepositoryTrait};

const COMPANY: &str = "co-1";
const EMPLOYEE: &str = "emp-1";
const MAIN_TREASURY: &str = "tr-main";
const EMPLOYEE_TREASURY: &str = "tr-emp";
const WALLET: &str = "wal-1";
const MERCHANT: &str = "mer-1";

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

#[derive(Clone)]
struct State {
    treasuries: HashMap<String, Treasury>,
    wallets: HashMap<String, EWallet>,
    merchants: HashMap<String, Merchant>,
    merchant_entries: Vec<MerchantEntry>,
    transactions: Vec<Transaction>,
    rates: ExchangeRateSettings,
}

/// Store double. `commit` mirrors the storage contract: deltas are applied
/// against a scratch copy and swapped in only when every guard passes, so a
/// failed posting leaves nothing behind.
struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    fn with_balances(
        main_egp: Decimal,
        main_sdg: Decimal,
        employee_egp: Decimal,
        employee_sdg: Decimal,
        wallet_balance: Decimal,
    ) -> Arc<Self> {
        let mut treasuries = HashMap::new();
        treasuries.insert(
            MAIN_TREASURY.to_string(),
            Treasury {
                id: MAIN_TREASURY.to_string(),
                company_id: COMPANY.to_string(),
                kind: TreasuryKind::Main,
                employee_id: None,
                egp_balance: main_egp,
                sdg_balance: main_sdg,
                created_at: now(),
                updated_at: now(),
            },
        );
        treasuries.insert(
            EMPLOYEE_TREASURY.to_string(),
            Treasury {
                id: EMPLOYEE_TREASURY.to_string(),
                company_id: COMPANY.to_string(),
                kind: TreasuryKind::Employee,
                employee_id: Some(EMPLOYEE.to_string()),
                egp_balance: employee_egp,
                sdg_balance: employee_sdg,
                created_at: now(),
                updated_at: now(),
            },
        );

        let mut wallets = HashMap::new();
        wallets.insert(
            WALLET.to_string(),
            EWallet {
                id: WALLET.to_string(),
                company_id: COMPANY.to_string(),
                employee_id: EMPLOYEE.to_string(),
                phone_number: "01012345678".to_string(),
                provider: "vodafone_cash".to_string(),
                balance: wallet_balance,
                is_active: true,
                created_at: now(),
                updated_at: now(),
            },
        );

        let mut merchants = HashMap::new();
        merchants.insert(
            MERCHANT.to_string(),
            Merchant {
                id: MERCHANT.to_string(),
                company_id: COMPANY.to_string(),
                name: "Al Amal Trading".to_string(),
                phone: None,
                egp_balance: Decimal::ZERO,
                sdg_balance: Decimal::ZERO,
                is_active: true,
                created_at: now(),
                updated_at: now(),
            },
        );

        Arc::new(Self {
            state: Mutex::new(State {
                treasuries,
                wallets,
                merchants,
                merchant_entries: Vec::new(),
                transactions: Vec::new(),
                rates: ExchangeRateSettings {
                    id: "rate-1".to_string(),
                    company_id: COMPANY.to_string(),
                    sd_to_eg_rate: dec!(74),
                    eg_to_sd_rate: dec!(0.0135),
                    wholesale_rate: dec!(72.5),
                    wholesale_threshold: dec!(30000),
                    ewallet_commission: dec!(1),
                    updated_at: now(),
                },
            }),
        })
    }

    fn default_fixture() -> Arc<Self> {
        Self::with_balances(
            dec!(100000),
            dec!(500000),
            dec!(50000),
            dec!(200000),
            dec!(5000),
        )
    }

    fn treasury_balance(&self, treasury_id: &str, currency: Currency) -> Decimal {
        self.state.lock().unwrap().treasuries[treasury_id].balance(currency)
    }

    fn wallet_balance(&self, wallet_id: &str) -> Decimal {
        self.state.lock().unwrap().wallets[wallet_id].balance
    }

    fn merchant_balance(&self, merchant_id: &str, currency: Currency) -> Decimal {
        self.state.lock().unwrap().merchants[merchant_id].balance(currency)
    }

    fn transaction_count(&self) -> usize {
        self.state.lock().unwrap().transactions.len()
    }
}

fn apply_delta(state: &mut State, delta: &BalanceDelta) -> Result<()> {
    let slot = match &delta.target {
        BalanceTarget::Treasury(id) => {
            let treasury = state
                .treasuries
                .get_mut(id)
                .ok_or_else(|| Error::Database(DatabaseError::NotFound(id.clone())))?;
            match delta.currency {
                Currency::Egp => &mut treasury.egp_balance,
                Currency::Sdg => &mut treasury.sdg_balance,
            }
        }
        BalanceTarget::Merchant(id) => {
            let merchant = state
                .merchants
                .get_mut(id)
                .ok_or_else(|| Error::Database(DatabaseError::NotFound(id.clone())))?;
            match delta.currency {
                Currency::Egp => &mut merchant.egp_balance,
                Currency::Sdg => &mut merchant.sdg_balance,
            }
        }
        BalanceTarget::Wallet(id) => {
            let wallet = state
                .wallets
                .get_mut(id)
                .ok_or_else(|| Error::Database(DatabaseError::NotFound(id.clone())))?;
            &mut wallet.balance
        }
    };

    let next = *slot + delta.amount;
    if delta.guarded && next < Decimal::ZERO {
        return Err(Error::InsufficientFunds {
            entity: delta.target.describe(),
            currency: delta.currency,
            shortfall: -next,
        });
    }
    *slot = next;
    Ok(())
}

#[async_trait::async_trait]
impl LedgerRepositoryTrait for InMemoryStore {
    async fn commit(&self, posting: LedgerPosting) -> Result<Transaction> {
        let mut state = self.state.lock().unwrap();
        let mut scratch = state.clone();

        for delta in &posting.deltas {
            apply_delta(&mut scratch, delta)?;
        }

        let draft = posting.transaction;
        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            company_id: draft.company_id,
            employee_id: draft.employee_id,
            transaction_type: draft.transaction_type,
            from_currency: draft.from_currency,
            to_currency: draft.to_currency,
            from_amount: draft.from_amount,
            to_amount: draft.to_amount,
            rate: draft.rate,
            commission: draft.commission,
            receipt_number: draft.receipt_number,
            description: draft.description,
            is_wholesale: draft.is_wholesale,
            e_wallet_id: draft.e_wallet_id,
            created_at: now(),
        };
        scratch.transactions.push(transaction.clone());

        if let Some(entry) = posting.merchant_entry {
            scratch.merchant_entries.push(MerchantEntry {
                id: Uuid::new_v4().to_string(),
                merchant_id: entry.merchant_id,
                company_id: entry.company_id,
                entry_type: entry.entry_type,
                currency: entry.currency,
                amount: entry.amount,
                description: entry.description,
                created_at: now(),
            });
        }

        *state = scratch;
        Ok(transaction)
    }

    async fn reverse(&self, transaction_id: &str, deltas: Vec<BalanceDelta>) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let mut scratch = state.clone();

        for delta in &deltas {
            apply_delta(&mut scratch, delta)?;
        }
        scratch.transactions.retain(|t| t.id != transaction_id);

        *state = scratch;
        Ok(())
    }
}

#[async_trait::async_trait]
impl TransactionRepositoryTrait for InMemoryStore {
    fn get_by_id(&self, transaction_id: &str) -> Result<Transaction> {
        self.state
            .lock()
            .unwrap()
            .transactions
            .iter()
            .find(|t| t.id == transaction_id)
            .cloned()
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(transaction_id.to_string())))
    }

    fn list(
        &self,
        company_id: &str,
        type_filter: Option<TransactionType>,
    ) -> Result<Vec<Transaction>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .transactions
            .iter()
            .filter(|t| {
                t.company_id == company_id
                    && type_filter.map_or(true, |f| t.transaction_type == f)
            })
            .cloned()
            .collect())
    }

    fn find_duplicate(
        &self,
        company_id: &str,
        transaction_type: TransactionType,
        receipt_number: &str,
        from_amount: Decimal,
    ) -> Result<bool> {
        Ok(self.state.lock().unwrap().transactions.iter().any(|t| {
            t.company_id == company_id
                && t.transaction_type == transaction_type
                && t.receipt_number.as_deref() == Some(receipt_number)
                && t.from_amount == from_amount
        }))
    }
}

#[async_trait::async_trait]
impl TreasuryRepositoryTrait for InMemoryStore {
    async fn create(&self, _new_treasury: NewTreasury) -> Result<Treasury> {
        unimplemented!("not exercised by ledger tests")
    }

    fn get_by_id(&self, treasury_id: &str) -> Result<Treasury> {
        self.state
            .lock()
            .unwrap()
            .treasuries
            .get(treasury_id)
            .cloned()
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(treasury_id.to_string())))
    }

    fn get_main(&self, company_id: &str) -> Result<Treasury> {
        self.state
            .lock()
            .unwrap()
            .treasuries
            .values()
            .find(|t| t.company_id == company_id && t.kind == TreasuryKind::Main)
            .cloned()
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(company_id.to_string())))
    }

    fn find_by_employee(&self, employee_id: &str) -> Result<Option<Treasury>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .treasuries
            .values()
            .find(|t| t.employee_id.as_deref() == Some(employee_id))
            .cloned())
    }

    fn list(&self, company_id: &str) -> Result<Vec<Treasury>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .treasuries
            .values()
            .filter(|t| t.company_id == company_id)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl WalletRepositoryTrait for InMemoryStore {
    async fn create(&self, _new_wallet: NewEWallet) -> Result<EWallet> {
        unimplemented!("not exercised by ledger tests")
    }

    async fn update(&self, _wallet_update: EWalletUpdate) -> Result<EWallet> {
        unimplemented!("not exercised by ledger tests")
    }

    fn get_by_id(&self, wallet_id: &str) -> Result<EWallet> {
        self.state
            .lock()
            .unwrap()
            .wallets
            .get(wallet_id)
            .cloned()
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(wallet_id.to_string())))
    }

    fn list(&self, company_id: &str, is_active_filter: Option<bool>) -> Result<Vec<EWallet>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .wallets
            .values()
            .filter(|w| {
                w.company_id == company_id && is_active_filter.map_or(true, |a| w.is_active == a)
            })
            .cloned()
            .collect())
    }

    fn list_by_employee(&self, employee_id: &str) -> Result<Vec<EWallet>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .wallets
            .values()
            .filter(|w| w.employee_id == employee_id)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl MerchantRepositoryTrait for InMemoryStore {
    async fn create(&self, _new_merchant: NewMerchant) -> Result<Merchant> {
        unimplemented!("not exercised by ledger tests")
    }

    async fn update(&self, _merchant_update: MerchantUpdate) -> Result<Merchant> {
        unimplemented!("not exercised by ledger tests")
    }

    fn get_by_id(&self, merchant_id: &str) -> Result<Merchant> {
        self.state
            .lock()
            .unwrap()
            .merchants
            .get(merchant_id)
            .cloned()
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(merchant_id.to_string())))
    }

    fn list(&self, company_id: &str, is_active_filter: Option<bool>) -> Result<Vec<Merchant>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .merchants
            .values()
            .filter(|m| {
                m.company_id == company_id && is_active_filter.map_or(true, |a| m.is_active == a)
            })
            .cloned()
            .collect())
    }

    fn list_entries(&self, merchant_id: &str) -> Result<Vec<MerchantEntry>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .merchant_entries
            .iter()
            .filter(|e| e.merchant_id == merchant_id)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl RateRepositoryTrait for InMemoryStore {
    fn find_for_company(&self, company_id: &str) -> Result<Option<ExchangeRateSettings>> {
        let state = self.state.lock().unwrap();
        Ok((state.rates.company_id == company_id).then(|| state.rates.clone()))
    }

    async fn upsert(&self, _update: RateSettingsUpdate) -> Result<ExchangeRateSettings> {
        unimplemented!("not exercised by ledger tests")
    }
}

fn ledger_service(store: &Arc<InMemoryStore>) -> LedgerService {
    LedgerService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        Arc::new(RateService::new(store.clone())),
    )
}

fn exchange_request(amount: Decimal, receipt: Option<&str>) -> ExchangeRequest {
    ExchangeRequest {
        company_id: COMPANY.to_string(),
        employee_id: EMPLOYEE.to_string(),
        direction: ExchangeDirection::SdgToEgp,
        amount,
        receipt_number: receipt.map(String::from),
        description: None,
    }
}

#[tokio::test]
async fn exchange_applies_retail_rate_below_threshold() {
    let store = InMemoryStore::default_fixture();
    let service = ledger_service(&store);

    let tx = service
        .exchange(exchange_request(dec!(2000000), None))
        .await
        .unwrap();

    assert_eq!(tx.to_amount, Some(dec!(27027.03)));
    assert_eq!(tx.rate, Some(dec!(74)));
    assert!(!tx.is_wholesale);
    assert_eq!(
        store.treasury_balance(EMPLOYEE_TREASURY, Currency::Sdg),
        dec!(2200000)
    );
    assert_eq!(
        store.treasury_balance(EMPLOYEE_TREASURY, Currency::Egp),
        dec!(22972.97)
    );
}

#[tokio::test]
async fn exchange_switches_to_wholesale_above_threshold() {
    let store = InMemoryStore::default_fixture();
    let service = ledger_service(&store);

    let tx = service
        .exchange(exchange_request(dec!(2500000), None))
        .await
        .unwrap();

    assert!(tx.is_wholesale);
    assert_eq!(tx.rate, Some(dec!(72.5)));
    assert_eq!(tx.to_amount, Some(dec!(34482.76)));
}

#[tokio::test]
async fn egp_to_sdg_never_goes_wholesale() {
    let store = InMemoryStore::default_fixture();
    let service = ledger_service(&store);

    let tx = service
        .exchange(ExchangeRequest {
            direction: ExchangeDirection::EgpToSdg,
            ..exchange_request(dec!(10000), None)
        })
        .await
        .unwrap();

    assert!(!tx.is_wholesale);
    assert_eq!(tx.to_amount, Some(dec!(135.00)));
    assert_eq!(
        store.treasury_balance(EMPLOYEE_TREASURY, Currency::Sdg),
        dec!(199865.00)
    );
}

#[tokio::test]
async fn duplicate_receipt_is_rejected() {
    let store = InMemoryStore::default_fixture();
    let service = ledger_service(&store);

    service
        .exchange(exchange_request(dec!(100000), Some("R100")))
        .await
        .unwrap();

    let err = service
        .exchange(exchange_request(dec!(100000), Some("R100")))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::DuplicateTransaction { receipt_number } if receipt_number == "R100"
    ));
    assert_eq!(store.transaction_count(), 1);

    // Same receipt with a different amount is a distinct submission.
    service
        .exchange(exchange_request(dec!(150000), Some("R100")))
        .await
        .unwrap();
    // A fresh receipt passes.
    service
        .exchange(exchange_request(dec!(100000), Some("R101")))
        .await
        .unwrap();
}

#[tokio::test]
async fn insufficient_funds_leaves_state_untouched() {
    let store = InMemoryStore::default_fixture();
    let service = ledger_service(&store);

    // Payout would be ~54054 EGP against a 50000 EGP float.
    let err = service
        .exchange(exchange_request(dec!(4000000), None))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InsufficientFunds { .. }));
    assert_eq!(
        store.treasury_balance(EMPLOYEE_TREASURY, Currency::Egp),
        dec!(50000)
    );
    assert_eq!(
        store.treasury_balance(EMPLOYEE_TREASURY, Currency::Sdg),
        dec!(200000)
    );
    assert_eq!(store.transaction_count(), 0);
}

#[tokio::test]
async fn treasury_feed_moves_float_to_employee() {
    let store = InMemoryStore::default_fixture();
    let service = ledger_service(&store);

    let tx = service
        .feed_treasury(TreasuryMoveRequest {
            company_id: COMPANY.to_string(),
            counterparty: TreasuryCounterparty::Employee(EMPLOYEE.to_string()),
            currency: Currency::Egp,
            amount: dec!(20000),
            description: None,
        })
        .await
        .unwrap();

    assert_eq!(tx.transaction_type, TransactionType::TreasuryFeed);
    assert_eq!(tx.employee_id.as_deref(), Some(EMPLOYEE));
    assert_eq!(
        store.treasury_balance(MAIN_TREASURY, Currency::Egp),
        dec!(80000)
    );
    assert_eq!(
        store.treasury_balance(EMPLOYEE_TREASURY, Currency::Egp),
        dec!(70000)
    );
}

#[tokio::test]
async fn external_feed_only_grows_main_treasury() {
    let store = InMemoryStore::default_fixture();
    let service = ledger_service(&store);

    service
        .feed_treasury(TreasuryMoveRequest {
            company_id: COMPANY.to_string(),
            counterparty: TreasuryCounterparty::External,
            currency: Currency::Sdg,
            amount: dec!(75000),
            description: Some("bank delivery".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(
        store.treasury_balance(MAIN_TREASURY, Currency::Sdg),
        dec!(575000)
    );
    assert_eq!(
        store.treasury_balance(EMPLOYEE_TREASURY, Currency::Sdg),
        dec!(200000)
    );
}

#[tokio::test]
async fn withdraw_returns_employee_float_to_main() {
    let store = InMemoryStore::default_fixture();
    let service = ledger_service(&store);

    service
        .withdraw_treasury(TreasuryMoveRequest {
            company_id: COMPANY.to_string(),
            counterparty: TreasuryCounterparty::Employee(EMPLOYEE.to_string()),
            currency: Currency::Egp,
            amount: dec!(50000),
            description: None,
        })
        .await
        .unwrap();

    assert_eq!(
        store.treasury_balance(EMPLOYEE_TREASURY, Currency::Egp),
        dec!(0)
    );
    assert_eq!(
        store.treasury_balance(MAIN_TREASURY, Currency::Egp),
        dec!(150000)
    );

    // The float is gone now; pulling more must fail.
    let err = service
        .withdraw_treasury(TreasuryMoveRequest {
            company_id: COMPANY.to_string(),
            counterparty: TreasuryCounterparty::Employee(EMPLOYEE.to_string()),
            currency: Currency::Egp,
            amount: dec!(1),
            description: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InsufficientFunds { .. }));
}

#[tokio::test]
async fn wallet_feed_moves_main_egp_into_wallet() {
    let store = InMemoryStore::default_fixture();
    let service = ledger_service(&store);

    let tx = service
        .feed_wallet(WalletFeedRequest {
            company_id: COMPANY.to_string(),
            wallet_id: WALLET.to_string(),
            amount: dec!(2000),
            description: None,
        })
        .await
        .unwrap();

    assert_eq!(tx.transaction_type, TransactionType::WalletFeed);
    assert_eq!(tx.e_wallet_id.as_deref(), Some(WALLET));
    assert_eq!(store.wallet_balance(WALLET), dec!(7000));
    assert_eq!(
        store.treasury_balance(MAIN_TREASURY, Currency::Egp),
        dec!(98000)
    );
}

#[tokio::test]
async fn wallet_transfer_charges_commission_on_top() {
    let store = InMemoryStore::default_fixture();
    let service = ledger_service(&store);

    let tx = service
        .transfer_from_wallet(WalletTransferRequest {
            company_id: COMPANY.to_string(),
            wallet_id: WALLET.to_string(),
            amount: dec!(1000),
            receipt_number: Some("W-55".to_string()),
            description: None,
        })
        .await
        .unwrap();

    assert_eq!(tx.transaction_type, TransactionType::EWallet);
    assert_eq!(tx.commission, Some(dec!(10.00)));
    assert_eq!(tx.from_amount, dec!(1000));
    // 5000 - (1000 + 10)
    assert_eq!(store.wallet_balance(WALLET), dec!(3990.00));
}

#[tokio::test]
async fn wallet_transfer_needs_amount_plus_commission() {
    let store = InMemoryStore::with_balances(
        dec!(100000),
        dec!(500000),
        dec!(50000),
        dec!(200000),
        dec!(1000),
    );
    let service = ledger_service(&store);

    // 995 + 9.95 commission exceeds the 1000 float.
    let err = service
        .transfer_from_wallet(WalletTransferRequest {
            company_id: COMPANY.to_string(),
            wallet_id: WALLET.to_string(),
            amount: dec!(995),
            receipt_number: None,
            description: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InsufficientFunds { .. }));
    assert_eq!(store.wallet_balance(WALLET), dec!(1000));
}

#[tokio::test]
async fn duplicate_wallet_receipt_is_rejected() {
    let store = InMemoryStore::default_fixture();
    let service = ledger_service(&store);

    let request = WalletTransferRequest {
        company_id: COMPANY.to_string(),
        wallet_id: WALLET.to_string(),
        amount: dec!(500),
        receipt_number: Some("W-1".to_string()),
        description: None,
    };
    service.transfer_from_wallet(request.clone()).await.unwrap();

    let err = service.transfer_from_wallet(request).await.unwrap_err();
    assert!(matches!(err, Error::DuplicateTransaction { .. }));
}

#[tokio::test]
async fn merchant_debit_may_go_negative() {
    let store = InMemoryStore::default_fixture();
    let service = ledger_service(&store);

    let tx = service
        .record_merchant_entry(MerchantEntryRequest {
            company_id: COMPANY.to_string(),
            merchant_id: MERCHANT.to_string(),
            entry_type: MerchantEntryType::Debit,
            currency: Currency::Sdg,
            amount: dec!(500),
            description: Some("goods on credit".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(tx.transaction_type, TransactionType::MerchantEntry);
    assert_eq!(store.merchant_balance(MERCHANT, Currency::Sdg), dec!(-500));

    let entries = store.list_entries(MERCHANT).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].entry_type, MerchantEntryType::Debit);
    assert_eq!(entries[0].amount, dec!(500));
}

#[tokio::test]
async fn reversal_restores_balances_and_drops_the_record() {
    let store = InMemoryStore::default_fixture();
    let service = ledger_service(&store);

    let tx = service
        .exchange(exchange_request(dec!(100000), Some("R9")))
        .await
        .unwrap();
    assert_ne!(
        store.treasury_balance(EMPLOYEE_TREASURY, Currency::Sdg),
        dec!(200000)
    );

    service.reverse_transaction(&tx.id).await.unwrap();

    assert_eq!(
        store.treasury_balance(EMPLOYEE_TREASURY, Currency::Sdg),
        dec!(200000)
    );
    assert_eq!(
        store.treasury_balance(EMPLOYEE_TREASURY, Currency::Egp),
        dec!(50000)
    );
    assert_eq!(store.transaction_count(), 0);

    // The receipt is usable again once the record is gone.
    service
        .exchange(exchange_request(dec!(100000), Some("R9")))
        .await
        .unwrap();
}

#[tokio::test]
async fn only_exchanges_are_reversible() {
    let store = InMemoryStore::default_fixture();
    let service = ledger_service(&store);

    let tx = service
        .feed_treasury(TreasuryMoveRequest {
            company_id: COMPANY.to_string(),
            counterparty: TreasuryCounterparty::External,
            currency: Currency::Egp,
            amount: dec!(100),
            description: None,
        })
        .await
        .unwrap();

    let err = service.reverse_transaction(&tx.id).await.unwrap_err();
    assert!(matches!(err, Error::NotReversible(_)));

    let err = service.reverse_transaction("no-such-id").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn inactive_wallet_is_refused() {
    let store = InMemoryStore::default_fixture();
    {
        let mut state = store.state.lock().unwrap();
        state.wallets.get_mut(WALLET).unwrap().is_active = false;
    }
    let service = ledger_service(&store);

    let err = service
        .feed_wallet(WalletFeedRequest {
            company_id: COMPANY.to_string(),
            wallet_id: WALLET.to_string(),
            amount: dec!(100),
            description: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

mod conservation {
    use super::*;
    use proptest::prelude::*;

    fn amounts() -> impl Strategy<Value = Vec<(bool, u32)>> {
        prop::collection::vec((any::<bool>(), 1u32..5000), 1..25)
    }

    proptest! {
        // Internal float moves never create or destroy money: the sum over
        // main and employee treasuries is invariant no matter which
        // feeds/withdraws succeed or bounce off the guard.
        #[test]
        fn treasury_moves_conserve_totals(ops in amounts()) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let store = InMemoryStore::default_fixture();
                let service = ledger_service(&store);
                let total_before = store.treasury_balance(MAIN_TREASURY, Currency::Egp)
                    + store.treasury_balance(EMPLOYEE_TREASURY, Currency::Egp);

                for (feed, amount) in ops {
                    let request = TreasuryMoveRequest {
                        company_id: COMPANY.to_string(),
                        counterparty: TreasuryCounterparty::Employee(EMPLOYEE.to_string()),
                        currency: Currency::Egp,
                        amount: Decimal::from(amount),
                        description: None,
                    };
                    let result = if feed {
                        service.feed_treasury(request).await
                    } else {
                        service.withdraw_treasury(request).await
                    };
                    if let Err(err) = result {
                        let out_of_float = matches!(err, Error::InsufficientFunds { .. });
                        prop_assert!(out_of_float, "unexpected error: {:?}", err);
                    }
                }

                let total_after = store.treasury_balance(MAIN_TREASURY, Currency::Egp)
                    + store.treasury_balance(EMPLOYEE_TREASURY, Currency::Egp);
                prop_assert_eq!(total_before, total_after);
                Ok(())
            })?;
        }
    }
}
