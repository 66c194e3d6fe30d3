//! Database model for transactions. Amounts and rates are stored as text.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use sarraf_core::currency::Currency;
use sarraf_core::errors::Error;
use sarraf_core::transactions::{NewTransaction, Transaction, TransactionType};

#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDb {
    pub id: String,
    pub company_id: String,
    pub employee_id: Option<String>,
    pub transaction_type: String,
    pub from_currency: String,
    pub to_currency: Option<String>,
    pub from_amount: String,
    pub to_amount: Option<String>,
    pub rate: Option<String>,
    pub commission: Option<String>,
    pub receipt_number: Option<String>,
    pub description: Option<String>,
    pub is_wholesale: bool,
    pub e_wallet_id: Option<String>,
    pub created_at: NaiveDateTime,
}

fn parse_optional(value: Option<&str>) -> Result<Option<Decimal>, Error> {
    value.map(|v| Decimal::from_str(v).map_err(Error::from)).transpose()
}

impl TryFrom<TransactionDb> for Transaction {
    type Error = Error;

    fn try_from(db: TransactionDb) -> Result<Self, Error> {
        Ok(Self {
            id: db.id,
            company_id: db.company_id,
            employee_id: db.employee_id,
            transaction_type: TransactionType::parse(&db.transaction_type)?,
            from_currency: Currency::from_str(&db.from_currency)?,
            to_currency: db
                .to_currency
                .as_deref()
                .map(Currency::from_str)
                .transpose()?,
            from_amount: Decimal::from_str(&db.from_amount)?,
            to_amount: parse_optional(db.to_amount.as_deref())?,
            rate: parse_optional(db.rate.as_deref())?,
            commission: parse_optional(db.commission.as_deref())?,
            receipt_number: db.receipt_number,
            description: db.description,
            is_wholesale: db.is_wholesale,
            e_wallet_id: db.e_wallet_id,
            created_at: db.created_at,
        })
    }
}

impl From<NewTransaction> for TransactionDb {
    fn from(domain: NewTransaction) -> Self {
        Self {
            id: String::new(),
            company_id: domain.company_id,
            employee_id: domain.employee_id,
            transaction_type: domain.transaction_type.as_str().to_string(),
            from_currency: domain.from_currency.as_str().to_string(),
            to_currency: domain.to_currency.map(|c| c.as_str().to_string()),
            from_amount: domain.from_amount.to_string(),
            to_amount: domain.to_amount.map(|d| d.to_string()),
            rate: domain.rate.map(|d| d.to_string()),
            commission: domain.commission.map(|d| d.to_string()),
            receipt_number: domain.receipt_number,
            description: domain.description,
            is_wholesale: domain.is_wholesale,
            e_wallet_id: domain.e_wallet_id,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
