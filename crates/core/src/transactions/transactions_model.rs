use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::errors::{Error, Result, ValidationError};

/// Closed set of ledger transaction types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Exchange,
    EWallet,
    TreasuryFeed,
    TreasuryWithdraw,
    WalletFeed,
    WalletDeposit,
    WalletWithdrawal,
    Expense,
    MerchantEntry,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Exchange => "exchange",
            TransactionType::EWallet => "e_wallet",
            TransactionType::TreasuryFeed => "treasury_feed",
            TransactionType::TreasuryWithdraw => "treasury_withdraw",
            TransactionType::WalletFeed => "wallet_feed",
            TransactionType::WalletDeposit => "wallet_deposit",
            TransactionType::WalletWithdrawal => "wallet_withdrawal",
            TransactionType::Expense => "expense",
            TransactionType::MerchantEntry => "merchant_entry",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "exchange" => Ok(TransactionType::Exchange),
            "e_wallet" => Ok(TransactionType::EWallet),
            "treasury_feed" => Ok(TransactionType::TreasuryFeed),
            "treasury_withdraw" => Ok(TransactionType::TreasuryWithdraw),
            "wallet_feed" => Ok(TransactionType::WalletFeed),
            "wallet_deposit" => Ok(TransactionType::WalletDeposit),
            "wallet_withdrawal" => Ok(TransactionType::WalletWithdrawal),
            "expense" => Ok(TransactionType::Expense),
            "merchant_entry" => Ok(TransactionType::MerchantEntry),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown transaction type '{}'",
                other
            )))),
        }
    }

    /// Policy: only exchanges and e-wallet transfers are screened against
    /// duplicate receipt submissions.
    pub fn requires_duplicate_check(&self) -> bool {
        matches!(self, TransactionType::Exchange | TransactionType::EWallet)
    }

    /// Policy: only exchanges can be reversed.
    pub fn is_reversible(&self) -> bool {
        matches!(self, TransactionType::Exchange)
    }
}

/// The canonical audit/ledger record. Created exactly once per successful
/// operation; deleted only by reversal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub company_id: String,
    pub employee_id: Option<String>,
    pub transaction_type: TransactionType,
    pub from_currency: Currency,
    pub to_currency: Option<Currency>,
    pub from_amount: Decimal,
    pub to_amount: Option<Decimal>,
    pub rate: Option<Decimal>,
    pub commission: Option<Decimal>,
    pub receipt_number: Option<String>,
    pub description: Option<String>,
    pub is_wholesale: bool,
    pub e_wallet_id: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Draft handed to the recorder. The recorder stamps id and created_at and
/// persists the draft as given; business validation happens upstream in the
/// orchestrators.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub company_id: String,
    pub employee_id: Option<String>,
    pub transaction_type: TransactionType,
    pub from_currency: Currency,
    pub to_currency: Option<Currency>,
    pub from_amount: Decimal,
    pub to_amount: Option<Decimal>,
    pub rate: Option<Decimal>,
    pub commission: Option<Decimal>,
    pub receipt_number: Option<String>,
    pub description: Option<String>,
    pub is_wholesale: bool,
    pub e_wallet_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_round_trips_through_str() {
        for t in [
            TransactionType::Exchange,
            TransactionType::EWallet,
            TransactionType::TreasuryFeed,
            TransactionType::TreasuryWithdraw,
            TransactionType::WalletFeed,
            TransactionType::WalletDeposit,
            TransactionType::WalletWithdrawal,
            TransactionType::Expense,
            TransactionType::MerchantEntry,
        ] {
            assert_eq!(TransactionType::parse(t.as_str()).unwrap(), t);
        }
        assert!(TransactionType::parse("refund").is_err());
    }

    #[test]
    fn duplicate_check_policy_is_scoped() {
        assert!(TransactionType::Exchange.requires_duplicate_check());
        assert!(TransactionType::EWallet.requires_duplicate_check());
        assert!(!TransactionType::TreasuryFeed.requires_duplicate_check());
        assert!(!TransactionType::MerchantEntry.requires_duplicate_check());
    }

    #[test]
    fn only_exchanges_reverse() {
        assert!(TransactionType::Exchange.is_reversible());
        assert!(!TransactionType::EWallet.is_reversible());
        assert!(!TransactionType::TreasuryWithdraw.is_reversible());
    }
}
