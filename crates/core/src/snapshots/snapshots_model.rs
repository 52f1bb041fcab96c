//! Period snapshot domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An immutable fund valuation at a date.
///
/// `performance_fee_rate` and `total_performance_fee` are `None` when no fee
/// was configured for the snapshot - never zero, so "no fee configured" stays
/// distinguishable from "fee computed as zero".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSnapshot {
    pub id: String,
    pub snapshot_date: NaiveDate,
    pub total_asset_value: Decimal,
    pub total_bank_balance: Decimal,
    pub total_liabilities: Decimal,
    pub nav: Decimal,
    pub performance_fee_rate: Option<Decimal>,
    pub total_performance_fee: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// One investor's allocation within a period snapshot. Created atomically
/// with its parent; one row per investor existing at snapshot time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorSnapshot {
    pub id: String,
    pub snapshot_id: String,
    pub investor_id: String,
    pub capital_amount: Decimal,
    pub ownership_percent: Decimal,
    pub performance_fee: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// A period snapshot together with its investor allocations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSnapshotWithInvestors {
    #[serde(flatten)]
    pub snapshot: PeriodSnapshot,
    pub investor_snapshots: Vec<InvestorSnapshot>,
}
