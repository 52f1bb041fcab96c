//! Database models for period snapshots.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use fundbook_core::snapshots::{InvestorSnapshot, PeriodSnapshot};

use crate::parsing::{
    fmt_date, parse_date_tolerant, parse_datetime_tolerant, parse_decimal_opt,
    parse_decimal_tolerant,
};

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::period_snapshots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PeriodSnapshotDB {
    pub id: String,
    pub snapshot_date: String,
    pub total_asset_value: String,
    pub total_bank_balance: String,
    pub total_liabilities: String,
    pub nav: String,
    pub performance_fee_rate: Option<String>,
    pub total_performance_fee: Option<String>,
    pub created_at: String,
}

impl From<PeriodSnapshotDB> for PeriodSnapshot {
    fn from(db: PeriodSnapshotDB) -> Self {
        Self {
            id: db.id,
            snapshot_date: parse_date_tolerant(&db.snapshot_date, "snapshot_date"),
            total_asset_value: parse_decimal_tolerant(&db.total_asset_value, "total_asset_value"),
            total_bank_balance: parse_decimal_tolerant(
                &db.total_bank_balance,
                "total_bank_balance",
            ),
            total_liabilities: parse_decimal_tolerant(&db.total_liabilities, "total_liabilities"),
            nav: parse_decimal_tolerant(&db.nav, "nav"),
            performance_fee_rate: parse_decimal_opt(
                db.performance_fee_rate.as_ref(),
                "performance_fee_rate",
            ),
            total_performance_fee: parse_decimal_opt(
                db.total_performance_fee.as_ref(),
                "total_performance_fee",
            ),
            created_at: parse_datetime_tolerant(&db.created_at, "created_at"),
        }
    }
}

impl From<PeriodSnapshot> for PeriodSnapshotDB {
    fn from(domain: PeriodSnapshot) -> Self {
        Self {
            id: domain.id,
            snapshot_date: fmt_date(domain.snapshot_date),
            total_asset_value: domain.total_asset_value.to_string(),
            total_bank_balance: domain.total_bank_balance.to_string(),
            total_liabilities: domain.total_liabilities.to_string(),
            nav: domain.nav.to_string(),
            performance_fee_rate: domain.performance_fee_rate.map(|d| d.to_string()),
            total_performance_fee: domain.total_performance_fee.map(|d| d.to_string()),
            created_at: domain.created_at.to_rfc3339(),
        }
    }
}

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::investor_snapshots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvestorSnapshotDB {
    pub id: String,
    pub snapshot_id: String,
    pub investor_id: String,
    pub capital_amount: String,
    pub ownership_percent: String,
    pub performance_fee: Option<String>,
    pub created_at: String,
}

impl From<InvestorSnapshotDB> for InvestorSnapshot {
    fn from(db: InvestorSnapshotDB) -> Self {
        Self {
            id: db.id,
            snapshot_id: db.snapshot_id,
            investor_id: db.investor_id,
            capital_amount: parse_decimal_tolerant(&db.capital_amount, "capital_amount"),
            ownership_percent: parse_decimal_tolerant(&db.ownership_percent, "ownership_percent"),
            performance_fee: parse_decimal_opt(db.performance_fee.as_ref(), "performance_fee"),
            created_at: parse_datetime_tolerant(&db.created_at, "created_at"),
        }
    }
}

impl From<InvestorSnapshot> for InvestorSnapshotDB {
    fn from(domain: InvestorSnapshot) -> Self {
        Self {
            id: domain.id,
            snapshot_id: domain.snapshot_id,
            investor_id: domain.investor_id,
            capital_amount: domain.capital_amount.to_string(),
            ownership_percent: domain.ownership_percent.to_string(),
            performance_fee: domain.performance_fee.map(|d| d.to_string()),
            created_at: domain.created_at.to_rfc3339(),
        }
    }
}
