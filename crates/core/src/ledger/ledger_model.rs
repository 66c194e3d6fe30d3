use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::{Currency, ExchangeDirection};
use crate::errors::{Error, Result, ValidationError};
use crate::merchants::{MerchantEntryType, NewMerchantEntry};
use crate::transactions::NewTransaction;

/// Balance-carrying entity a delta applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "id")]
pub enum BalanceTarget {
    Treasury(String),
    Merchant(String),
    Wallet(String),
}

impl BalanceTarget {
    /// Human-readable label used in error messages.
    pub fn describe(&self) -> String {
        match self {
            BalanceTarget::Treasury(id) => format!("treasury {}", id),
            BalanceTarget::Merchant(id) => format!("merchant {}", id),
            BalanceTarget::Wallet(id) => format!("wallet {}", id),
        }
    }
}

/// One signed balance movement.
///
/// Guarded deltas may not push a balance below zero; the guard is enforced
/// against a fresh read inside the storage transaction. Treasuries and
/// wallets are guarded; merchant balances are not (merchant debt is a
/// legitimate state).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceDelta {
    pub target: BalanceTarget,
    pub currency: Currency,
    pub amount: Decimal,
    pub guarded: bool,
}

impl BalanceDelta {
    pub fn credit(target: BalanceTarget, currency: Currency, amount: Decimal) -> Self {
        Self {
            target,
            currency,
            amount,
            guarded: false,
        }
    }

    pub fn guarded_debit(target: BalanceTarget, currency: Currency, amount: Decimal) -> Self {
        Self {
            target,
            currency,
            amount: -amount,
            guarded: true,
        }
    }

    pub fn unguarded(target: BalanceTarget, currency: Currency, amount: Decimal) -> Self {
        Self {
            target,
            currency,
            amount,
            guarded: false,
        }
    }
}

/// Everything one ledger operation writes, committed as a single unit: all
/// balance deltas, the audit transaction, and (for merchant operations) the
/// append-only merchant entry.
#[derive(Debug, Clone)]
pub struct LedgerPosting {
    pub deltas: Vec<BalanceDelta>,
    pub transaction: NewTransaction,
    pub merchant_entry: Option<NewMerchantEntry>,
}

/// Counterparty of a treasury feed/withdraw.
///
/// `External` models cash entering or leaving the shop; `Employee` moves
/// float between the main treasury and an employee's treasury.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "employeeId")]
pub enum TreasuryCounterparty {
    External,
    Employee(String),
}

/// Request for a currency exchange at the counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRequest {
    pub company_id: String,
    pub employee_id: String,
    pub direction: ExchangeDirection,
    /// Amount handed over by the customer, in the source currency.
    pub amount: Decimal,
    pub receipt_number: Option<String>,
    pub description: Option<String>,
}

impl ExchangeRequest {
    pub fn validate(&self) -> Result<()> {
        require_id(&self.company_id, "companyId")?;
        require_id(&self.employee_id, "employeeId")?;
        require_positive(self.amount)
    }
}

/// Request for a treasury feed or withdraw.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasuryMoveRequest {
    pub company_id: String,
    pub counterparty: TreasuryCounterparty,
    pub currency: Currency,
    pub amount: Decimal,
    pub description: Option<String>,
}

impl TreasuryMoveRequest {
    pub fn validate(&self) -> Result<()> {
        require_id(&self.company_id, "companyId")?;
        if let TreasuryCounterparty::Employee(employee_id) = &self.counterparty {
            require_id(employee_id, "employeeId")?;
        }
        require_positive(self.amount)
    }
}

/// Request to top up an e-wallet from the main treasury.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletFeedRequest {
    pub company_id: String,
    pub wallet_id: String,
    pub amount: Decimal,
    pub description: Option<String>,
}

impl WalletFeedRequest {
    pub fn validate(&self) -> Result<()> {
        require_id(&self.company_id, "companyId")?;
        require_id(&self.wallet_id, "walletId")?;
        require_positive(self.amount)
    }
}

/// Request for an outgoing e-wallet transfer (customer withdrawal).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletTransferRequest {
    pub company_id: String,
    pub wallet_id: String,
    /// Amount sent to the customer; commission comes on top.
    pub amount: Decimal,
    pub receipt_number: Option<String>,
    pub description: Option<String>,
}

impl WalletTransferRequest {
    pub fn validate(&self) -> Result<()> {
        require_id(&self.company_id, "companyId")?;
        require_id(&self.wallet_id, "walletId")?;
        require_positive(self.amount)
    }
}

/// Request to credit or debit a merchant's running balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantEntryRequest {
    pub company_id: String,
    pub merchant_id: String,
    pub entry_type: MerchantEntryType,
    pub currency: Currency,
    pub amount: Decimal,
    pub description: Option<String>,
}

impl MerchantEntryRequest {
    pub fn validate(&self) -> Result<()> {
        require_id(&self.company_id, "companyId")?;
        require_id(&self.merchant_id, "merchantId")?;
        require_positive(self.amount)
    }
}

fn require_id(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            field.to_string(),
        )));
    }
    Ok(())
}

fn require_positive(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::Validation(ValidationError::NonPositiveAmount(
            amount,
        )));
    }
    Ok(())
}
