//! Bank balance and liability domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::utils::Patch;

/// A point-in-time balance report for one bank account. Append-only: the
/// "current" balance of an account is the latest-dated row for its key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankBalance {
    pub id: String,
    pub account_name: String,
    pub bank_name: String,
    pub amount: Decimal,
    pub currency: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl BankBalance {
    /// Grouping key for "latest per account": names trimmed of surrounding
    /// whitespace, compared case-sensitively.
    pub fn account_key(&self) -> (String, String) {
        (
            self.account_name.trim().to_string(),
            self.bank_name.trim().to_string(),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBankBalance {
    pub account_name: String,
    pub bank_name: String,
    pub amount: Decimal,
    pub currency: String,
    pub date: NaiveDate,
}

impl NewBankBalance {
    pub fn validate(&self) -> Result<()> {
        if self.account_name.trim().is_empty() {
            return Err(ValidationError::MissingField("accountName".to_string()).into());
        }
        if self.bank_name.trim().is_empty() {
            return Err(ValidationError::MissingField("bankName".to_string()).into());
        }
        if self.currency.trim().is_empty() {
            return Err(ValidationError::MissingField("currency".to_string()).into());
        }
        Ok(())
    }
}

/// A debt owed by the fund. A simple mutable balance, no ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Liability {
    pub id: String,
    pub name: String,
    pub current_balance: Decimal,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLiability {
    pub name: String,
    pub current_balance: Decimal,
    #[serde(default)]
    pub note: Option<String>,
}

impl NewLiability {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiabilityUpdate {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub current_balance: Option<Decimal>,
    #[serde(default)]
    pub note: Patch<String>,
}

impl LiabilityUpdate {
    pub fn apply_to(self, liability: &mut Liability) {
        if let Some(name) = self.name {
            liability.name = name;
        }
        if let Some(balance) = self.current_balance {
            liability.current_balance = balance;
        }
        liability.note = self.note.apply(liability.note.take());
        liability.updated_at = Utc::now();
    }
}
