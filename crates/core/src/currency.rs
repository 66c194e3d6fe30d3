//! The two cash currencies handled by an exchange shop.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, ValidationError};

/// Currency of a cash balance or movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Egp,
    Sdg,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Egp => "EGP",
            Currency::Sdg => "SDG",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EGP" => Ok(Currency::Egp),
            "SDG" => Ok(Currency::Sdg),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown currency '{}'",
                other
            )))),
        }
    }
}

/// Direction of a currency exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExchangeDirection {
    SdgToEgp,
    EgpToSdg,
}

impl ExchangeDirection {
    /// Currency the customer hands over.
    pub fn source(&self) -> Currency {
        match self {
            ExchangeDirection::SdgToEgp => Currency::Sdg,
            ExchangeDirection::EgpToSdg => Currency::Egp,
        }
    }

    /// Currency paid out to the customer.
    pub fn destination(&self) -> Currency {
        match self {
            ExchangeDirection::SdgToEgp => Currency::Egp,
            ExchangeDirection::EgpToSdg => Currency::Sdg,
        }
    }
}
