use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::time::timeout;

use super::ledger_model::{
    BalanceDelta, BalanceTarget, ExchangeRequest, LedgerPosting, MerchantEntryRequest,
    TreasuryCounterparty, TreasuryMoveRequest, WalletFeedRequest, WalletTransferRequest,
};
use super::ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
use crate::constants::LEDGER_COMMIT_TIMEOUT;
use crate::currency::Currency;
use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::merchants::{MerchantRepositoryTrait, NewMerchantEntry};
use crate::rates::RateServiceTrait;
use crate::transactions::{
    NewTransaction, Transaction, TransactionRepositoryTrait, TransactionType,
};
use crate::treasuries::{Treasury, TreasuryRepositoryTrait};
use crate::wallets::{EWallet, WalletRepositoryTrait};

/// The money-movement orchestrators.
///
/// Composes the rate resolver, duplicate guard, balance ledger and
/// transaction recorder into single user-facing operations. Every commit
/// goes through the ledger repository as one atomic posting.
pub struct LedgerService {
    ledger_repository: Arc<dyn LedgerRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    treasury_repository: Arc<dyn TreasuryRepositoryTrait>,
    wallet_repository: Arc<dyn WalletRepositoryTrait>,
    merchant_repository: Arc<dyn MerchantRepositoryTrait>,
    rate_service: Arc<dyn RateServiceTrait>,
}

impl LedgerService {
    pub fn new(
        ledger_repository: Arc<dyn LedgerRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        treasury_repository: Arc<dyn TreasuryRepositoryTrait>,
        wallet_repository: Arc<dyn WalletRepositoryTrait>,
        merchant_repository: Arc<dyn MerchantRepositoryTrait>,
        rate_service: Arc<dyn RateServiceTrait>,
    ) -> Self {
        Self {
            ledger_repository,
            transaction_repository,
            treasury_repository,
            wallet_repository,
            merchant_repository,
            rate_service,
        }
    }

    /// Duplicate guard: checked before any balance mutation, but only for
    /// types that carry a receipt number.
    fn ensure_not_duplicate(
        &self,
        company_id: &str,
        transaction_type: TransactionType,
        receipt_number: Option<&str>,
        from_amount: Decimal,
    ) -> Result<()> {
        let receipt = match receipt_number {
            Some(r) if !r.trim().is_empty() => r,
            _ => return Ok(()),
        };
        if !transaction_type.requires_duplicate_check() {
            return Ok(());
        }
        if self.transaction_repository.find_duplicate(
            company_id,
            transaction_type,
            receipt,
            from_amount,
        )? {
            warn!(
                "Blocked duplicate {} submission, receipt '{}'",
                transaction_type.as_str(),
                receipt
            );
            return Err(Error::DuplicateTransaction {
                receipt_number: receipt.to_string(),
            });
        }
        Ok(())
    }

    fn employee_treasury(&self, employee_id: &str) -> Result<Treasury> {
        self.treasury_repository
            .find_by_employee(employee_id)?
            .ok_or_else(|| Error::NotFound(format!("No treasury for employee {}", employee_id)))
    }

    fn active_wallet(&self, wallet_id: &str) -> Result<EWallet> {
        let wallet = not_found_as(
            self.wallet_repository.get_by_id(wallet_id),
            || format!("E-wallet {} not found", wallet_id),
        )?;
        if !wallet.is_active {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "E-wallet {} is inactive",
                wallet_id
            ))));
        }
        Ok(wallet)
    }

    /// Fast-fail sufficiency check on the current snapshot. The storage
    /// layer re-checks against fresh balances inside the commit transaction,
    /// which is the authoritative guard.
    fn ensure_sufficient(
        target: &BalanceTarget,
        currency: Currency,
        available: Decimal,
        needed: Decimal,
    ) -> Result<()> {
        if available < needed {
            return Err(Error::InsufficientFunds {
                entity: target.describe(),
                currency,
                shortfall: needed - available,
            });
        }
        Ok(())
    }

    async fn commit(&self, posting: LedgerPosting) -> Result<Transaction> {
        let transaction_type = posting.transaction.transaction_type;
        match timeout(LEDGER_COMMIT_TIMEOUT, self.ledger_repository.commit(posting)).await {
            Ok(result) => {
                if let Ok(transaction) = &result {
                    info!(
                        "Committed {} transaction {} for company {}",
                        transaction_type.as_str(),
                        transaction.id,
                        transaction.company_id
                    );
                }
                result
            }
            Err(_) => Err(Error::Unavailable(
                "Ledger commit timed out; the write may or may not have been applied".to_string(),
            )),
        }
    }
}

#[async_trait::async_trait]
impl LedgerServiceTrait for LedgerService {
    async fn exchange(&self, request: ExchangeRequest) -> Result<Transaction> {
        request.validate()?;
        self.ensure_not_duplicate(
            &request.company_id,
            TransactionType::Exchange,
            request.receipt_number.as_deref(),
            request.amount,
        )?;

        let quote =
            self.rate_service
                .resolve(&request.company_id, request.direction, request.amount)?;

        let treasury = self.employee_treasury(&request.employee_id)?;
        let target = BalanceTarget::Treasury(treasury.id.clone());
        let source = request.direction.source();
        let destination = request.direction.destination();

        Self::ensure_sufficient(
            &target,
            destination,
            treasury.balance(destination),
            quote.converted_amount,
        )?;

        debug!(
            "Exchange {} {} -> {} {} for employee {} (wholesale: {})",
            request.amount, source, quote.converted_amount, destination, request.employee_id,
            quote.is_wholesale
        );

        let posting = LedgerPosting {
            deltas: vec![
                BalanceDelta::credit(target.clone(), source, request.amount),
                BalanceDelta::guarded_debit(target, destination, quote.converted_amount),
            ],
            transaction: NewTransaction {
                company_id: request.company_id,
                employee_id: Some(request.employee_id),
                transaction_type: TransactionType::Exchange,
                from_currency: source,
                to_currency: Some(destination),
                from_amount: request.amount,
                to_amount: Some(quote.converted_amount),
                rate: Some(quote.rate),
                commission: None,
                receipt_number: request.receipt_number,
                description: request.description,
                is_wholesale: quote.is_wholesale,
                e_wallet_id: None,
            },
            merchant_entry: None,
        };
        self.commit(posting).await
    }

    async fn feed_treasury(&self, request: TreasuryMoveRequest) -> Result<Transaction> {
        request.validate()?;
        let main = self.treasury_repository.get_main(&request.company_id)?;
        let main_target = BalanceTarget::Treasury(main.id.clone());

        let (deltas, employee_id) = match &request.counterparty {
            TreasuryCounterparty::Employee(employee_id) => {
                let employee = self.employee_treasury(employee_id)?;
                Self::ensure_sufficient(
                    &main_target,
                    request.currency,
                    main.balance(request.currency),
                    request.amount,
                )?;
                (
                    vec![
                        BalanceDelta::guarded_debit(
                            main_target,
                            request.currency,
                            request.amount,
                        ),
                        BalanceDelta::credit(
                            BalanceTarget::Treasury(employee.id),
                            request.currency,
                            request.amount,
                        ),
                    ],
                    Some(employee_id.clone()),
                )
            }
            // External cash entering the shop: the main treasury grows, no
            // counterpart entity.
            TreasuryCounterparty::External => (
                vec![BalanceDelta::credit(
                    main_target,
                    request.currency,
                    request.amount,
                )],
                None,
            ),
        };

        let posting = LedgerPosting {
            deltas,
            transaction: NewTransaction {
                company_id: request.company_id,
                employee_id,
                transaction_type: TransactionType::TreasuryFeed,
                from_currency: request.currency,
                to_currency: None,
                from_amount: request.amount,
                to_amount: None,
                rate: None,
                commission: None,
                receipt_number: None,
                description: request.description,
                is_wholesale: false,
                e_wallet_id: None,
            },
            merchant_entry: None,
        };
        self.commit(posting).await
    }

    async fn withdraw_treasury(&self, request: TreasuryMoveRequest) -> Result<Transaction> {
        request.validate()?;
        let main = self.treasury_repository.get_main(&request.company_id)?;
        let main_target = BalanceTarget::Treasury(main.id.clone());

        let (deltas, employee_id) = match &request.counterparty {
            TreasuryCounterparty::Employee(employee_id) => {
                let employee = self.employee_treasury(employee_id)?;
                let employee_target = BalanceTarget::Treasury(employee.id.clone());
                Self::ensure_sufficient(
                    &employee_target,
                    request.currency,
                    employee.balance(request.currency),
                    request.amount,
                )?;
                (
                    vec![
                        BalanceDelta::guarded_debit(
                            employee_target,
                            request.currency,
                            request.amount,
                        ),
                        BalanceDelta::credit(main_target, request.currency, request.amount),
                    ],
                    Some(employee_id.clone()),
                )
            }
            // External cash leaving the shop.
            TreasuryCounterparty::External => {
                Self::ensure_sufficient(
                    &main_target,
                    request.currency,
                    main.balance(request.currency),
                    request.amount,
                )?;
                (
                    vec![BalanceDelta::guarded_debit(
                        main_target,
                        request.currency,
                        request.amount,
                    )],
                    None,
                )
            }
        };

        let posting = LedgerPosting {
            deltas,
            transaction: NewTransaction {
                company_id: request.company_id,
                employee_id,
                transaction_type: TransactionType::TreasuryWithdraw,
                from_currency: request.currency,
                to_currency: None,
                from_amount: request.amount,
                to_amount: None,
                rate: None,
                commission: None,
                receipt_number: None,
                description: request.description,
                is_wholesale: false,
                e_wallet_id: None,
            },
            merchant_entry: None,
        };
        self.commit(posting).await
    }

    async fn feed_wallet(&self, request: WalletFeedRequest) -> Result<Transaction> {
        request.validate()?;
        let wallet = self.active_wallet(&request.wallet_id)?;
        let main = self.treasury_repository.get_main(&request.company_id)?;
        let main_target = BalanceTarget::Treasury(main.id.clone());

        Self::ensure_sufficient(
            &main_target,
            Currency::Egp,
            main.balance(Currency::Egp),
            request.amount,
        )?;

        let posting = LedgerPosting {
            deltas: vec![
                BalanceDelta::guarded_debit(main_target, Currency::Egp, request.amount),
                BalanceDelta::credit(
                    BalanceTarget::Wallet(wallet.id.clone()),
                    Currency::Egp,
                    request.amount,
                ),
            ],
            transaction: NewTransaction {
                company_id: request.company_id,
                employee_id: Some(wallet.employee_id),
                transaction_type: TransactionType::WalletFeed,
                from_currency: Currency::Egp,
                to_currency: None,
                from_amount: request.amount,
                to_amount: None,
                rate: None,
                commission: None,
                receipt_number: None,
                description: request.description,
                is_wholesale: false,
                e_wallet_id: Some(wallet.id),
            },
            merchant_entry: None,
        };
        self.commit(posting).await
    }

    async fn transfer_from_wallet(&self, request: WalletTransferRequest) -> Result<Transaction> {
        request.validate()?;
        self.ensure_not_duplicate(
            &request.company_id,
            TransactionType::EWallet,
            request.receipt_number.as_deref(),
            request.amount,
        )?;

        let wallet = self.active_wallet(&request.wallet_id)?;
        let commission = self
            .rate_service
            .wallet_commission(&request.company_id, request.amount)?;
        // Commission is retained implicitly: it is recorded on the
        // transaction but credited to no balance.
        let total_debit = request.amount + commission;
        let wallet_target = BalanceTarget::Wallet(wallet.id.clone());

        Self::ensure_sufficient(&wallet_target, Currency::Egp, wallet.balance, total_debit)?;

        let posting = LedgerPosting {
            deltas: vec![BalanceDelta::guarded_debit(
                wallet_target,
                Currency::Egp,
                total_debit,
            )],
            transaction: NewTransaction {
                company_id: request.company_id,
                employee_id: Some(wallet.employee_id),
                transaction_type: TransactionType::EWallet,
                from_currency: Currency::Egp,
                to_currency: None,
                from_amount: request.amount,
                to_amount: None,
                rate: None,
                commission: Some(commission),
                receipt_number: request.receipt_number,
                description: request.description,
                is_wholesale: false,
                e_wallet_id: Some(wallet.id),
            },
            merchant_entry: None,
        };
        self.commit(posting).await
    }

    async fn record_merchant_entry(&self, request: MerchantEntryRequest) -> Result<Transaction> {
        request.validate()?;
        let merchant = not_found_as(
            self.merchant_repository.get_by_id(&request.merchant_id),
            || format!("Merchant {} not found", request.merchant_id),
        )?;

        // Merchant balances are signed; no sufficiency guard by design.
        let posting = LedgerPosting {
            deltas: vec![BalanceDelta::unguarded(
                BalanceTarget::Merchant(merchant.id.clone()),
                request.currency,
                request.entry_type.signed(request.amount),
            )],
            transaction: NewTransaction {
                company_id: request.company_id.clone(),
                employee_id: None,
                transaction_type: TransactionType::MerchantEntry,
                from_currency: request.currency,
                to_currency: None,
                from_amount: request.amount,
                to_amount: None,
                rate: None,
                commission: None,
                receipt_number: None,
                description: request.description.clone(),
                is_wholesale: false,
                e_wallet_id: None,
            },
            merchant_entry: Some(NewMerchantEntry {
                merchant_id: merchant.id,
                company_id: request.company_id,
                entry_type: request.entry_type,
                currency: request.currency,
                amount: request.amount,
                description: request.description,
            }),
        };
        self.commit(posting).await
    }

    async fn reverse_transaction(&self, transaction_id: &str) -> Result<()> {
        let transaction = not_found_as(
            self.transaction_repository.get_by_id(transaction_id),
            || format!("Transaction {} not found", transaction_id),
        )?;

        if !transaction.transaction_type.is_reversible() {
            return Err(Error::NotReversible(format!(
                "Only exchanges can be reversed, got '{}'",
                transaction.transaction_type.as_str()
            )));
        }

        let employee_id = transaction.employee_id.as_deref().ok_or_else(|| {
            Error::NotFound(format!(
                "Transaction {} has no originating employee",
                transaction_id
            ))
        })?;
        let treasury = self.employee_treasury(employee_id)?;
        let target = BalanceTarget::Treasury(treasury.id);

        let to_currency = transaction.to_currency.ok_or_else(|| {
            Error::Unexpected(format!(
                "Exchange {} is missing its destination currency",
                transaction_id
            ))
        })?;
        let to_amount = transaction.to_amount.ok_or_else(|| {
            Error::Unexpected(format!(
                "Exchange {} is missing its converted amount",
                transaction_id
            ))
        })?;

        // The original credited the source cash in and paid the converted
        // amount out; the inverse hands the source cash back and reclaims
        // the payout.
        let deltas = vec![
            BalanceDelta::credit(target.clone(), to_currency, to_amount),
            BalanceDelta::guarded_debit(
                target,
                transaction.from_currency,
                transaction.from_amount,
            ),
        ];

        info!(
            "Reversing exchange {} for company {}",
            transaction_id, transaction.company_id
        );
        match timeout(
            LEDGER_COMMIT_TIMEOUT,
            self.ledger_repository.reverse(transaction_id, deltas),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(Error::Unavailable(
                "Reversal timed out; the write may or may not have been applied".to_string(),
            )),
        }
    }
}

/// Remaps a storage-level "record not found" onto the domain taxonomy.
fn not_found_as<T>(result: Result<T>, describe: impl FnOnce() -> String) -> Result<T> {
    match result {
        Err(Error::Database(DatabaseError::NotFound(_))) => Err(Error::NotFound(describe())),
        other => other,
    }
}
