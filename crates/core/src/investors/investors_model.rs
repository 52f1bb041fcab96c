//! Investor and capital cashflow domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::utils::Patch;

/// A capital participant in the fund.
///
/// Deposits, withdrawals, capital, and ownership percent are derived from the
/// cashflow history on demand - never stored (see `OwnershipService`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investor {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestor {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl NewInvestor {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorUpdate {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Patch<String>,
}

impl InvestorUpdate {
    pub fn apply_to(self, investor: &mut Investor) {
        if let Some(name) = self.name {
            investor.name = name;
        }
        investor.email = self.email.apply(investor.email.take());
        investor.updated_at = Utc::now();
    }
}

/// Direction of a capital cashflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CashflowType {
    Deposit,
    Withdrawal,
}

impl CashflowType {
    pub const fn as_db_str(&self) -> &'static str {
        match self {
            CashflowType::Deposit => "DEPOSIT",
            CashflowType::Withdrawal => "WITHDRAWAL",
        }
    }

    pub fn from_db_str(value: &str) -> Self {
        match value {
            "WITHDRAWAL" => CashflowType::Withdrawal,
            _ => CashflowType::Deposit,
        }
    }
}

/// One deposit or withdrawal. Amounts are strictly positive; direction is
/// carried by `flow_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorCashflow {
    pub id: String,
    pub investor_id: String,
    pub flow_type: CashflowType,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCashflow {
    pub investor_id: String,
    pub flow_type: CashflowType,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub note: Option<String>,
}

impl NewCashflow {
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(self.amount).into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowUpdate {
    pub id: String,
    #[serde(default)]
    pub flow_type: Option<CashflowType>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub note: Patch<String>,
}

impl CashflowUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(amount) = self.amount {
            if amount <= Decimal::ZERO {
                return Err(ValidationError::NonPositiveAmount(amount).into());
            }
        }
        Ok(())
    }

    pub fn apply_to(self, cashflow: &mut InvestorCashflow) {
        if let Some(flow_type) = self.flow_type {
            cashflow.flow_type = flow_type;
        }
        if let Some(amount) = self.amount {
            cashflow.amount = amount;
        }
        if let Some(date) = self.date {
            cashflow.date = date;
        }
        cashflow.note = self.note.apply(cashflow.note.take());
        cashflow.updated_at = Utc::now();
    }
}

/// One investor's derived capital position within the whole population.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorOwnership {
    pub investor_id: String,
    pub investor_name: String,
    pub total_deposits: Decimal,
    pub total_withdrawals: Decimal,
    pub capital_amount: Decimal,
    pub ownership_percent: Decimal,
}
