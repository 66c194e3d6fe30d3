//! End-to-end tests driving the core orchestrators against a real SQLite
//! store: company cascade, funded exchanges, the duplicate guard, reversal
//! and the concurrency behavior of the single-writer commit path.

use chrono::Utc;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tempfile::{tempdir, TempDir};
use uuid::Uuid;

use sarraf_core::companies::{Company, CompanyRepositoryTrait, CompanyStatus};
use sarraf_core::currency::{Currency, ExchangeDirection};
use sarraf_core::errors::Error;
use sarraf_core::ledger::{
    ExchangeRequest, LedgerService, LedgerServiceTrait, MerchantEntryRequest,
    TreasuryCounterparty, TreasuryMoveRequest, WalletFeedRequest, WalletTransferRequest,
};
use sarraf_core::merchants::{MerchantEntryType, MerchantRepositoryTrait, NewMerchant};
use sarraf_core::rates::{ExchangeRateSettings, RateRepositoryTrait, RateService,
    RateSettingsUpdate};
use sarraf_core::snapshot::SnapshotRepositoryTrait;
use sarraf_core::transactions::{TransactionRepositoryTrait, TransactionType};
use sarraf_core::treasuries::{NewTreasury, Treasury, TreasuryKind, TreasuryRepositoryTrait};
use sarraf_core::users::{User, UserRepositoryTrait, UserRole};
use sarraf_core::wallets::{NewEWallet, WalletRepositoryTrait};

use sarraf_storage_sqlite::companies::CompanyRepository;
use sarraf_storage_sqlite::db::{create_pool, run_migrations, spawn_writer, DbPool};
use sarraf_storage_sqlite::events::{Collection, MutationKind, StoreNotifier};
use sarraf_storage_sqlite::ledger::LedgerRepository;
use sarraf_storage_sqlite::merchants::MerchantRepository;
use sarraf_storage_sqlite::rates::RateRepository;
use sarraf_storage_sqlite::snapshot::SnapshotRepository;
use sarraf_storage_sqlite::transactions::TransactionRepository;
use sarraf_storage_sqlite::treasuries::TreasuryRepository;
use sarraf_storage_sqlite::users::UserRepository;
use sarraf_storage_sqlite::wallets::WalletRepository;

struct Harness {
    service: Arc<LedgerService>,
    companies: Arc<CompanyRepository>,
    users: Arc<UserRepository>,
    treasuries: Arc<TreasuryRepository>,
    wallets: Arc<WalletRepository>,
    merchants: Arc<MerchantRepository>,
    transactions: Arc<TransactionRepository>,
    rates: Arc<RateRepository>,
    snapshot: SnapshotRepository,
    notifier: StoreNotifier,
    pool: Arc<DbPool>,
    _temp: TempDir,
}

async fn setup() -> Harness {
    let temp = tempdir().expect("Failed to create temp directory");
    let db_path = temp.path().join("test.db").to_string_lossy().to_string();

    let pool = create_pool(&db_path).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer((*pool).clone());
    let notifier = StoreNotifier::new();

    let companies = Arc::new(CompanyRepository::new(
        pool.clone(),
        writer.clone(),
        notifier.clone(),
    ));
    let users = Arc::new(UserRepository::new(
        pool.clone(),
        writer.clone(),
        notifier.clone(),
    ));
    let treasuries = Arc::new(TreasuryRepository::new(
        pool.clone(),
        writer.clone(),
        notifier.clone(),
    ));
    let wallets = Arc::new(WalletRepository::new(
        pool.clone(),
        writer.clone(),
        notifier.clone(),
    ));
    let merchants = Arc::new(MerchantRepository::new(
        pool.clone(),
        writer.clone(),
        notifier.clone(),
    ));
    let transactions = Arc::new(TransactionRepository::new(pool.clone()));
    let rates = Arc::new(RateRepository::new(
        pool.clone(),
        writer.clone(),
        notifier.clone(),
    ));
    let ledger = Arc::new(LedgerRepository::new(writer.clone(), notifier.clone()));
    let snapshot = SnapshotRepository::new(pool.clone());

    let rate_service = Arc::new(RateService::new(rates.clone()));
    let service = Arc::new(LedgerService::new(
        ledger,
        transactions.clone(),
        treasuries.clone(),
        wallets.clone(),
        merchants.clone(),
        rate_service,
    ));

    Harness {
        service,
        companies,
        users,
        treasuries,
        wallets,
        merchants,
        transactions,
        rates,
        snapshot,
        notifier,
        pool,
        _temp: temp,
    }
}

struct SeededTenant {
    company_id: String,
    employee_id: String,
}

/// Creates a tenant cascade, one employee with a treasury, working rates,
/// and funds the main treasury with 100,000 EGP and 500,000 SDG.
async fn seed_tenant(harness: &Harness) -> SeededTenant {
    let now = Utc::now().naive_utc();
    let company_id = Uuid::new_v4().to_string();
    let admin_id = Uuid::new_v4().to_string();
    let employee_id = Uuid::new_v4().to_string();

    let company = Company {
        id: company_id.clone(),
        name: "Khartoum Exchange".to_string(),
        username: "khartoum".to_string(),
        password_hash: "argon2-hash".to_string(),
        display_name: None,
        subscription_end: None,
        status: CompanyStatus::Active,
        created_at: now,
        updated_at: now,
    };
    let admin = User {
        id: admin_id,
        company_id: Some(company_id.clone()),
        username: "khartoum".to_string(),
        password_hash: "argon2-hash".to_string(),
        full_name: "Shop Admin".to_string(),
        role: UserRole::Admin,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    let main_treasury = Treasury {
        id: Uuid::new_v4().to_string(),
        company_id: company_id.clone(),
        kind: TreasuryKind::Main,
        employee_id: None,
        egp_balance: dec!(0),
        sdg_balance: dec!(0),
        created_at: now,
        updated_at: now,
    };
    let default_rates = ExchangeRateSettings {
        id: Uuid::new_v4().to_string(),
        company_id: company_id.clone(),
        sd_to_eg_rate: dec!(0),
        eg_to_sd_rate: dec!(0),
        wholesale_rate: dec!(0),
        wholesale_threshold: dec!(0),
        ewallet_commission: dec!(0),
        updated_at: now,
    };

    harness
        .companies
        .create_cascade(company, admin, main_treasury, default_rates)
        .await
        .unwrap();

    harness
        .rates
        .upsert(RateSettingsUpdate {
            company_id: company_id.clone(),
            sd_to_eg_rate: dec!(74),
            eg_to_sd_rate: dec!(0.0135),
            wholesale_rate: dec!(72.5),
            wholesale_threshold: dec!(30000),
            ewallet_commission: dec!(1),
        })
        .await
        .unwrap();

    let employee = User {
        id: employee_id.clone(),
        company_id: Some(company_id.clone()),
        username: "teller1".to_string(),
        password_hash: "argon2-hash".to_string(),
        full_name: "Counter Teller".to_string(),
        role: UserRole::Employee,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    let employee_treasury = Treasury {
        id: Uuid::new_v4().to_string(),
        company_id: company_id.clone(),
        kind: TreasuryKind::Employee,
        employee_id: Some(employee_id.clone()),
        egp_balance: dec!(0),
        sdg_balance: dec!(0),
        created_at: now,
        updated_at: now,
    };
    harness
        .users
        .create(employee, Some(employee_treasury))
        .await
        .unwrap();

    for (currency, amount) in [(Currency::Egp, dec!(100000)), (Currency::Sdg, dec!(500000))] {
        harness
            .service
            .feed_treasury(TreasuryMoveRequest {
                company_id: company_id.clone(),
                counterparty: TreasuryCounterparty::External,
                currency,
                amount,
                description: None,
            })
            .await
            .unwrap();
    }

    SeededTenant {
        company_id,
        employee_id,
    }
}

/// Hands `amount` EGP of float from the main treasury to the employee.
async fn fund_employee(harness: &Harness, tenant: &SeededTenant, amount: rust_decimal::Decimal) {
    harness
        .service
        .feed_treasury(TreasuryMoveRequest {
            company_id: tenant.company_id.clone(),
            counterparty: TreasuryCounterparty::Employee(tenant.employee_id.clone()),
            currency: Currency::Egp,
            amount,
            description: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn company_cascade_seeds_everything() {
    let harness = setup().await;
    let tenant = seed_tenant(&harness).await;

    let main = harness.treasuries.get_main(&tenant.company_id).unwrap();
    assert_eq!(main.kind, TreasuryKind::Main);
    assert_eq!(main.egp_balance, dec!(100000));
    assert_eq!(main.sdg_balance, dec!(500000));

    let settings = harness
        .rates
        .find_for_company(&tenant.company_id)
        .unwrap()
        .unwrap();
    assert_eq!(settings.sd_to_eg_rate, dec!(74));

    let admin = harness
        .users
        .find_active_by_username("KHARTOUM")
        .unwrap()
        .expect("case-insensitive lookup should find the admin");
    assert_eq!(admin.role, UserRole::Admin);

    let employee_treasury = harness
        .treasuries
        .find_by_employee(&tenant.employee_id)
        .unwrap()
        .unwrap();
    assert_eq!(employee_treasury.kind, TreasuryKind::Employee);
}

#[tokio::test]
async fn exchange_persists_balances_and_record() {
    let harness = setup().await;
    let tenant = seed_tenant(&harness).await;
    fund_employee(&harness, &tenant, dec!(30000)).await;

    let tx = harness
        .service
        .exchange(ExchangeRequest {
            company_id: tenant.company_id.clone(),
            employee_id: tenant.employee_id.clone(),
            direction: ExchangeDirection::SdgToEgp,
            amount: dec!(2000000),
            receipt_number: Some("R100".to_string()),
            description: None,
        })
        .await
        .unwrap();

    assert_eq!(tx.to_amount, Some(dec!(27027.03)));
    assert!(!tx.is_wholesale);

    let treasury = harness
        .treasuries
        .find_by_employee(&tenant.employee_id)
        .unwrap()
        .unwrap();
    assert_eq!(treasury.sdg_balance, dec!(2000000));
    assert_eq!(treasury.egp_balance, dec!(2972.97));

    let stored = harness.transactions.get_by_id(&tx.id).unwrap();
    assert_eq!(stored.transaction_type, TransactionType::Exchange);
    assert_eq!(stored.receipt_number.as_deref(), Some("R100"));
    assert_eq!(stored.rate, Some(dec!(74)));
}

#[tokio::test]
async fn duplicate_guard_survives_restart_of_services() {
    let harness = setup().await;
    let tenant = seed_tenant(&harness).await;
    fund_employee(&harness, &tenant, dec!(30000)).await;

    let request = ExchangeRequest {
        company_id: tenant.company_id.clone(),
        employee_id: tenant.employee_id.clone(),
        direction: ExchangeDirection::SdgToEgp,
        amount: dec!(100000),
        receipt_number: Some("R7".to_string()),
        description: None,
    };
    harness.service.exchange(request.clone()).await.unwrap();

    // The guard is backed by the store, not service memory.
    let err = harness.service.exchange(request).await.unwrap_err();
    assert!(matches!(err, Error::DuplicateTransaction { .. }));
}

#[tokio::test]
async fn duplicate_guard_matches_amounts_across_scales() {
    let harness = setup().await;
    let tenant = seed_tenant(&harness).await;
    fund_employee(&harness, &tenant, dec!(30000)).await;

    harness
        .service
        .exchange(ExchangeRequest {
            company_id: tenant.company_id.clone(),
            employee_id: tenant.employee_id.clone(),
            direction: ExchangeDirection::SdgToEgp,
            amount: dec!(500),
            receipt_number: Some("R100".to_string()),
            description: None,
        })
        .await
        .unwrap();

    // "500.00" is stored differently from "500" but is the same amount.
    let err = harness
        .service
        .exchange(ExchangeRequest {
            company_id: tenant.company_id.clone(),
            employee_id: tenant.employee_id.clone(),
            direction: ExchangeDirection::SdgToEgp,
            amount: dec!(500.00),
            receipt_number: Some("R100".to_string()),
            description: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateTransaction { .. }));
}

#[tokio::test]
async fn second_main_treasury_is_refused() {
    let harness = setup().await;
    let tenant = seed_tenant(&harness).await;

    let err = harness
        .treasuries
        .create(NewTreasury {
            company_id: tenant.company_id.clone(),
            kind: TreasuryKind::Main,
            employee_id: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    // The main treasury stays unambiguous.
    let treasuries = harness.treasuries.list(&tenant.company_id).unwrap();
    let mains = treasuries
        .iter()
        .filter(|t| t.kind == TreasuryKind::Main)
        .count();
    assert_eq!(mains, 1);
}

#[tokio::test]
async fn concurrent_exchanges_cannot_jointly_overdraw() {
    let harness = setup().await;
    let tenant = seed_tenant(&harness).await;
    // Enough for one ~27,027 EGP payout, nowhere near two.
    fund_employee(&harness, &tenant, dec!(30000)).await;

    let request = ExchangeRequest {
        company_id: tenant.company_id.clone(),
        employee_id: tenant.employee_id.clone(),
        direction: ExchangeDirection::SdgToEgp,
        amount: dec!(2000000),
        receipt_number: None,
        description: None,
    };

    let (first, second) = tokio::join!(
        harness.service.exchange(request.clone()),
        harness.service.exchange(request),
    );

    let successes = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one exchange may win the float");
    let failure = if first.is_err() { first } else { second };
    assert!(matches!(
        failure.unwrap_err(),
        Error::InsufficientFunds { .. }
    ));

    // The loser left no partial writes behind.
    let treasury = harness
        .treasuries
        .find_by_employee(&tenant.employee_id)
        .unwrap()
        .unwrap();
    assert_eq!(treasury.egp_balance, dec!(2972.97));
    assert_eq!(treasury.sdg_balance, dec!(2000000));
    assert_eq!(
        harness
            .transactions
            .list(&tenant.company_id, Some(TransactionType::Exchange))
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn reversal_is_atomic_and_frees_the_receipt() {
    let harness = setup().await;
    let tenant = seed_tenant(&harness).await;
    fund_employee(&harness, &tenant, dec!(30000)).await;

    let request = ExchangeRequest {
        company_id: tenant.company_id.clone(),
        employee_id: tenant.employee_id.clone(),
        direction: ExchangeDirection::SdgToEgp,
        amount: dec!(500000),
        receipt_number: Some("R42".to_string()),
        description: None,
    };
    let tx = harness.service.exchange(request.clone()).await.unwrap();

    let mut events = harness.notifier.subscribe();
    harness.service.reverse_transaction(&tx.id).await.unwrap();

    let event = events.recv().await.unwrap();
    assert_eq!(event.collection, Collection::Transactions);
    assert_eq!(event.kind, MutationKind::Deleted);
    assert_eq!(event.id, tx.id);

    let treasury = harness
        .treasuries
        .find_by_employee(&tenant.employee_id)
        .unwrap()
        .unwrap();
    assert_eq!(treasury.egp_balance, dec!(30000));
    assert_eq!(treasury.sdg_balance, dec!(0));
    assert!(matches!(
        harness.transactions.get_by_id(&tx.id).unwrap_err(),
        Error::Database(_)
    ));

    // Same receipt goes through again now that the record is gone.
    harness.service.exchange(request).await.unwrap();
}

#[tokio::test]
async fn wallet_flow_and_merchant_entries_persist() {
    let harness = setup().await;
    let tenant = seed_tenant(&harness).await;

    let wallet = harness
        .wallets
        .create(NewEWallet {
            company_id: tenant.company_id.clone(),
            employee_id: tenant.employee_id.clone(),
            phone_number: "01012345678".to_string(),
            provider: "vodafone_cash".to_string(),
        })
        .await
        .unwrap();

    harness
        .service
        .feed_wallet(WalletFeedRequest {
            company_id: tenant.company_id.clone(),
            wallet_id: wallet.id.clone(),
            amount: dec!(5000),
            description: None,
        })
        .await
        .unwrap();

    let tx = harness
        .service
        .transfer_from_wallet(WalletTransferRequest {
            company_id: tenant.company_id.clone(),
            wallet_id: wallet.id.clone(),
            amount: dec!(1000),
            receipt_number: Some("W-9".to_string()),
            description: None,
        })
        .await
        .unwrap();
    assert_eq!(tx.commission, Some(dec!(10.00)));

    let stored_wallet = harness.wallets.get_by_id(&wallet.id).unwrap();
    assert_eq!(stored_wallet.balance, dec!(3990.00));

    let merchant = harness
        .merchants
        .create(NewMerchant {
            company_id: tenant.company_id.clone(),
            name: "Al Amal Trading".to_string(),
            phone: None,
        })
        .await
        .unwrap();

    harness
        .service
        .record_merchant_entry(MerchantEntryRequest {
            company_id: tenant.company_id.clone(),
            merchant_id: merchant.id.clone(),
            entry_type: MerchantEntryType::Debit,
            currency: Currency::Sdg,
            amount: dec!(750),
            description: Some("goods on credit".to_string()),
        })
        .await
        .unwrap();

    let stored_merchant = harness.merchants.get_by_id(&merchant.id).unwrap();
    assert_eq!(stored_merchant.sdg_balance, dec!(-750));
    assert_eq!(harness.merchants.list_entries(&merchant.id).unwrap().len(), 1);
}

#[tokio::test]
async fn mutations_emit_store_events() {
    let harness = setup().await;
    let mut events = harness.notifier.subscribe();
    let tenant = seed_tenant(&harness).await;

    // Cascade, rate setup, employee + treasury, then two treasury feeds.
    let expected = [
        (Collection::Companies, MutationKind::Created),
        (Collection::ExchangeRates, MutationKind::Updated),
        (Collection::Users, MutationKind::Created),
        (Collection::Treasuries, MutationKind::Created),
        (Collection::Transactions, MutationKind::Created),
        (Collection::Transactions, MutationKind::Created),
    ];
    for (collection, kind) in expected {
        let event = events.recv().await.unwrap();
        assert_eq!(event.collection, collection);
        assert_eq!(event.kind, kind);
    }

    let first = events.try_recv();
    assert!(first.is_err(), "no further events expected: {:?}", first);

    harness.companies.purge(&tenant.company_id).await.unwrap();
    let event = events.recv().await.unwrap();
    assert_eq!(event.collection, Collection::Companies);
    assert_eq!(event.kind, MutationKind::Deleted);
    assert_eq!(event.id, tenant.company_id);
}

#[tokio::test]
async fn snapshot_export_covers_every_table() {
    let harness = setup().await;
    let tenant = seed_tenant(&harness).await;
    fund_employee(&harness, &tenant, dec!(10000)).await;

    let snapshot = harness.snapshot.export_all().unwrap();
    assert_eq!(snapshot.companies.len(), 1);
    assert_eq!(snapshot.users.len(), 2);
    assert_eq!(snapshot.treasuries.len(), 2);
    assert_eq!(snapshot.exchange_rates.len(), 1);
    // Two external feeds plus the employee hand-out.
    assert_eq!(snapshot.transactions.len(), 3);
}

#[tokio::test]
async fn purge_cascades_through_dependents() {
    let harness = setup().await;
    let tenant = seed_tenant(&harness).await;
    fund_employee(&harness, &tenant, dec!(10000)).await;

    harness.companies.purge(&tenant.company_id).await.unwrap();

    let snapshot = harness.snapshot.export_all().unwrap();
    assert!(snapshot.companies.is_empty());
    assert!(snapshot.users.is_empty());
    assert!(snapshot.treasuries.is_empty());
    assert!(snapshot.transactions.is_empty());
    drop(harness.pool);
}
