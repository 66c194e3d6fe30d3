//! Ledger module - atomic balance postings and the money-movement
//! orchestrators (exchange, treasury moves, wallet flows, merchant entries,
//! reversal).

mod ledger_model;
mod ledger_service;
mod ledger_traits;

pub use ledger_model::{
    BalanceDelta, BalanceTarget, ExchangeRequest, LedgerPosting, MerchantEntryRequest,
    TreasuryCounterparty, TreasuryMoveRequest, WalletFeedRequest, WalletTransferRequest,
};
pub use ledger_service::LedgerService;
pub use ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};

#[cfg(test)]
mod ledger_service_tests;
