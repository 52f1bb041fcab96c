//! Asset event domain models - one ledger entry per value-affecting fact.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::ValidationError;
use crate::utils::Patch;

/// Kind of ledger entry. The arithmetic each kind applies to the running
/// value lives in [`super::ledger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetEventType {
    Valuation,
    PaymentIn,
    PaymentOut,
    Capex,
    Note,
    Sale,
    LoanDisbursement,
    InterestAccrual,
    InterestPayment,
    PrincipalPayment,
    LoanRepayment,
    Default,
}

impl AssetEventType {
    /// Returns the database string representation (SCREAMING_SNAKE_CASE).
    pub const fn as_db_str(&self) -> &'static str {
        match self {
            AssetEventType::Valuation => "VALUATION",
            AssetEventType::PaymentIn => "PAYMENT_IN",
            AssetEventType::PaymentOut => "PAYMENT_OUT",
            AssetEventType::Capex => "CAPEX",
            AssetEventType::Note => "NOTE",
            AssetEventType::Sale => "SALE",
            AssetEventType::LoanDisbursement => "LOAN_DISBURSEMENT",
            AssetEventType::InterestAccrual => "INTEREST_ACCRUAL",
            AssetEventType::InterestPayment => "INTEREST_PAYMENT",
            AssetEventType::PrincipalPayment => "PRINCIPAL_PAYMENT",
            AssetEventType::LoanRepayment => "LOAN_REPAYMENT",
            AssetEventType::Default => "DEFAULT",
        }
    }

    /// Interest bookkeeping only makes sense on loan assets.
    pub const fn is_interest_event(&self) -> bool {
        matches!(
            self,
            AssetEventType::InterestAccrual | AssetEventType::InterestPayment
        )
    }
}

impl FromStr for AssetEventType {
    type Err = ValidationError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "VALUATION" => Ok(AssetEventType::Valuation),
            "PAYMENT_IN" => Ok(AssetEventType::PaymentIn),
            "PAYMENT_OUT" => Ok(AssetEventType::PaymentOut),
            "CAPEX" => Ok(AssetEventType::Capex),
            "NOTE" => Ok(AssetEventType::Note),
            "SALE" => Ok(AssetEventType::Sale),
            "LOAN_DISBURSEMENT" => Ok(AssetEventType::LoanDisbursement),
            "INTEREST_ACCRUAL" => Ok(AssetEventType::InterestAccrual),
            "INTEREST_PAYMENT" => Ok(AssetEventType::InterestPayment),
            "PRINCIPAL_PAYMENT" => Ok(AssetEventType::PrincipalPayment),
            "LOAN_REPAYMENT" => Ok(AssetEventType::LoanRepayment),
            "DEFAULT" => Ok(AssetEventType::Default),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown asset event type '{other}'"
            ))),
        }
    }
}

/// Domain model representing one entry in an asset's event ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetEvent {
    pub id: String,
    pub asset_id: String,
    pub event_type: AssetEventType,
    pub amount: Option<Decimal>,
    pub date: NaiveDate,
    pub note: Option<String>,

    // Loan interest tracking
    pub is_paid: Option<bool>,
    pub payment_date: Option<NaiveDate>,
    pub principal_amount: Option<Decimal>,
    pub interest_amount: Option<Decimal>,
    pub reference_period_start: Option<NaiveDate>,
    pub reference_period_end: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AssetEvent {
    /// Amount with the nullable-means-zero convention of the ledger.
    pub fn amt(&self) -> Decimal {
        self.amount.unwrap_or(Decimal::ZERO)
    }

    /// Interest carried by an accrual: explicit interest amount, falling back
    /// to the generic amount.
    pub fn interest_amt(&self) -> Decimal {
        self.interest_amount.or(self.amount).unwrap_or(Decimal::ZERO)
    }

    /// Whether this is an accrual whose interest was capitalized (not settled
    /// in cash).
    pub fn is_unpaid_accrual(&self) -> bool {
        self.event_type == AssetEventType::InterestAccrual && self.is_paid != Some(true)
    }
}

/// Payload for appending an event to an asset's ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssetEvent {
    pub asset_id: String,
    pub event_type: AssetEventType,
    #[serde(default)]
    pub amount: Option<Decimal>,
    pub date: NaiveDate,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub is_paid: Option<bool>,
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    #[serde(default)]
    pub principal_amount: Option<Decimal>,
    #[serde(default)]
    pub interest_amount: Option<Decimal>,
    #[serde(default)]
    pub reference_period_start: Option<NaiveDate>,
    #[serde(default)]
    pub reference_period_end: Option<NaiveDate>,
}

impl NewAssetEvent {
    /// Materializes the payload into a full event with identity and stamps.
    pub fn into_event(self) -> AssetEvent {
        let now = Utc::now();
        AssetEvent {
            id: Uuid::new_v4().to_string(),
            asset_id: self.asset_id,
            event_type: self.event_type,
            amount: self.amount,
            date: self.date,
            note: self.note,
            is_paid: self.is_paid,
            payment_date: self.payment_date,
            principal_amount: self.principal_amount,
            interest_amount: self.interest_amount,
            reference_period_start: self.reference_period_start,
            reference_period_end: self.reference_period_end,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Payload for editing an existing event.
///
/// Nullable fields use [`Patch`] so "not present" and "explicitly cleared"
/// stay distinguishable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetEventUpdate {
    pub id: String,
    #[serde(default)]
    pub event_type: Option<AssetEventType>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub amount: Patch<Decimal>,
    #[serde(default)]
    pub note: Patch<String>,
    #[serde(default)]
    pub is_paid: Patch<bool>,
    #[serde(default)]
    pub payment_date: Patch<NaiveDate>,
    #[serde(default)]
    pub principal_amount: Patch<Decimal>,
    #[serde(default)]
    pub interest_amount: Patch<Decimal>,
    #[serde(default)]
    pub reference_period_start: Patch<NaiveDate>,
    #[serde(default)]
    pub reference_period_end: Patch<NaiveDate>,
}

impl AssetEventUpdate {
    /// Applies the patch onto an event, refreshing its update stamp.
    pub fn apply_to(self, event: &mut AssetEvent) {
        if let Some(event_type) = self.event_type {
            event.event_type = event_type;
        }
        if let Some(date) = self.date {
            event.date = date;
        }
        event.amount = self.amount.apply(event.amount);
        event.note = self.note.apply(event.note.take());
        event.is_paid = self.is_paid.apply(event.is_paid);
        event.payment_date = self.payment_date.apply(event.payment_date);
        event.principal_amount = self.principal_amount.apply(event.principal_amount);
        event.interest_amount = self.interest_amount.apply(event.interest_amount);
        event.reference_period_start = self
            .reference_period_start
            .apply(event.reference_period_start);
        event.reference_period_end = self.reference_period_end.apply(event.reference_period_end);
        event.updated_at = Utc::now();
    }
}

/// Read-only view of what the ledger currently accepts, exposed to the
/// collaborator UI layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventValidationInfo {
    pub can_add_events: bool,
    pub min_date: NaiveDate,
    pub last_event_date: Option<NaiveDate>,
    pub last_event_type: Option<AssetEventType>,
    pub is_sold: bool,
}
