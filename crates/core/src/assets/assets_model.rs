//! Asset domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::utils::Patch;

/// Broad asset classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetKind {
    Property, // Real estate
    Equity,   // Private shares, startup equity
    Fund,     // Positions in other funds
    Loan,     // Credit extended by the fund
    #[default]
    Other, // Catch-all for uncategorized assets
}

impl AssetKind {
    /// Returns the database string representation (SCREAMING_SNAKE_CASE).
    pub const fn as_db_str(&self) -> &'static str {
        match self {
            AssetKind::Property => "PROPERTY",
            AssetKind::Equity => "EQUITY",
            AssetKind::Fund => "FUND",
            AssetKind::Loan => "LOAN",
            AssetKind::Other => "OTHER",
        }
    }

    pub fn from_db_str(value: &str) -> Self {
        match value {
            "PROPERTY" => AssetKind::Property,
            "EQUITY" => AssetKind::Equity,
            "FUND" => AssetKind::Fund,
            "LOAN" => AssetKind::Loan,
            _ => AssetKind::Other,
        }
    }

    pub const fn is_loan(&self) -> bool {
        matches!(self, AssetKind::Loan)
    }
}

/// Asset lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetStatus {
    #[default]
    Active,
    Sold,
}

impl AssetStatus {
    pub const fn as_db_str(&self) -> &'static str {
        match self {
            AssetStatus::Active => "ACTIVE",
            AssetStatus::Sold => "SOLD",
        }
    }

    pub fn from_db_str(value: &str) -> Self {
        match value {
            "SOLD" => AssetStatus::Sold,
            _ => AssetStatus::Active,
        }
    }
}

/// Loan lifecycle status, meaningful only for `AssetKind::Loan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    #[default]
    Performing,
    Repaid,
    Defaulted,
}

impl LoanStatus {
    pub const fn as_db_str(&self) -> &'static str {
        match self {
            LoanStatus::Performing => "PERFORMING",
            LoanStatus::Repaid => "REPAID",
            LoanStatus::Defaulted => "DEFAULTED",
        }
    }

    pub fn from_db_str(value: &str) -> Self {
        match value {
            "REPAID" => LoanStatus::Repaid,
            "DEFAULTED" => LoanStatus::Defaulted,
            _ => LoanStatus::Performing,
        }
    }
}

/// Domain model representing a holding of the fund.
///
/// `current_value` is a derived cache: it always equals the replay of the
/// asset's full event ledger and is written exclusively by the valuation
/// engine. The same goes for `status`, `sale_price`, `sale_date` and
/// `loan_status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub kind: AssetKind,
    pub status: AssetStatus,
    pub currency: String,
    pub current_value: Decimal,
    pub acquired_price: Option<Decimal>,
    pub acquired_date: NaiveDate,
    pub sale_price: Option<Decimal>,
    pub sale_date: Option<NaiveDate>,
    pub note: Option<String>,

    // Loan terms, populated only for kind = LOAN
    pub principal_amount: Option<Decimal>,
    pub interest_rate: Option<Decimal>,
    pub payment_period: Option<String>,
    pub maturity_date: Option<NaiveDate>,
    pub loan_status: Option<LoanStatus>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Asset {
    /// Base value for ledger replay: acquisition price, or zero when unknown.
    pub fn base_value(&self) -> Decimal {
        self.acquired_price.unwrap_or(Decimal::ZERO)
    }

    pub fn is_sold(&self) -> bool {
        self.status == AssetStatus::Sold
    }

    /// Realized profit once sold: sale price minus acquisition price.
    pub fn realized_pnl(&self) -> Option<Decimal> {
        match (self.sale_price, self.acquired_price) {
            (Some(sale), acquired) => Some(sale - acquired.unwrap_or(Decimal::ZERO)),
            _ => None,
        }
    }
}

/// Payload for creating an asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub name: String,
    #[serde(default)]
    pub kind: AssetKind,
    pub currency: String,
    #[serde(default)]
    pub acquired_price: Option<Decimal>,
    pub acquired_date: NaiveDate,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub principal_amount: Option<Decimal>,
    #[serde(default)]
    pub interest_rate: Option<Decimal>,
    #[serde(default)]
    pub payment_period: Option<String>,
    #[serde(default)]
    pub maturity_date: Option<NaiveDate>,
}

impl NewAsset {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if self.currency.trim().is_empty() {
            return Err(ValidationError::MissingField("currency".to_string()).into());
        }
        if self.kind.is_loan() {
            if self.principal_amount.is_none() {
                return Err(ValidationError::MissingField("principalAmount".to_string()).into());
            }
        } else if self.principal_amount.is_some()
            || self.interest_rate.is_some()
            || self.payment_period.is_some()
            || self.maturity_date.is_some()
        {
            return Err(ValidationError::LoanFieldsOnNonLoanAsset.into());
        }
        Ok(())
    }
}

/// Payload for updating an asset's caller-owned fields.
///
/// Derived fields (`current_value`, `status`, sale/loan state) are not
/// updatable here; they only change through the valuation engine. `kind` is
/// immutable because ledger arithmetic depends on it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetUpdate {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub acquired_price: Patch<Decimal>,
    #[serde(default)]
    pub acquired_date: Option<NaiveDate>,
    #[serde(default)]
    pub note: Patch<String>,
    #[serde(default)]
    pub interest_rate: Patch<Decimal>,
    #[serde(default)]
    pub payment_period: Patch<String>,
    #[serde(default)]
    pub maturity_date: Patch<NaiveDate>,
    #[serde(default)]
    pub principal_amount: Patch<Decimal>,
}

impl AssetUpdate {
    pub fn validate(&self, kind: AssetKind) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ValidationError::MissingField("name".to_string()).into());
            }
        }
        if !kind.is_loan()
            && !(self.interest_rate.is_keep()
                && self.payment_period.is_keep()
                && self.maturity_date.is_keep()
                && self.principal_amount.is_keep())
        {
            return Err(ValidationError::LoanFieldsOnNonLoanAsset.into());
        }
        Ok(())
    }

    /// Applies the caller-owned fields onto an asset.
    pub fn apply_to(self, asset: &mut Asset) {
        if let Some(name) = self.name {
            asset.name = name;
        }
        if let Some(currency) = self.currency {
            asset.currency = currency;
        }
        if let Some(date) = self.acquired_date {
            asset.acquired_date = date;
        }
        asset.acquired_price = self.acquired_price.apply(asset.acquired_price);
        asset.note = self.note.apply(asset.note.take());
        asset.interest_rate = self.interest_rate.apply(asset.interest_rate);
        asset.payment_period = self.payment_period.apply(asset.payment_period.take());
        asset.maturity_date = self.maturity_date.apply(asset.maturity_date);
        asset.principal_amount = self.principal_amount.apply(asset.principal_amount);
    }
}

/// Derived-state write for an asset, produced by ledger replay.
///
/// Applied atomically together with the event mutation that caused it.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetValuationPatch {
    pub asset_id: String,
    pub current_value: Decimal,
    pub status: AssetStatus,
    pub sale_price: Option<Decimal>,
    pub sale_date: Option<NaiveDate>,
    pub loan_status: Option<LoanStatus>,
}

impl AssetValuationPatch {
    /// Applies the derived state onto an asset.
    pub fn apply_to(&self, asset: &mut Asset) {
        asset.current_value = self.current_value;
        asset.status = self.status;
        asset.sale_price = self.sale_price;
        asset.sale_date = self.sale_date;
        asset.loan_status = self.loan_status;
    }
}
