//! Database models for asset events.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use fundbook_core::events::{AssetEvent, AssetEventType};

use crate::parsing::{
    fmt_date, fmt_date_opt, parse_date_opt, parse_date_tolerant, parse_datetime_tolerant,
    parse_decimal_opt,
};

/// Database model for one ledger entry.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::asset_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AssetEventDB {
    pub id: String,
    pub asset_id: String,
    pub event_type: String,
    pub amount: Option<String>,
    pub date: String,
    pub note: Option<String>,
    pub is_paid: Option<bool>,
    pub payment_date: Option<String>,
    pub principal_amount: Option<String>,
    pub interest_amount: Option<String>,
    pub reference_period_start: Option<String>,
    pub reference_period_end: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<AssetEventDB> for AssetEvent {
    fn from(db: AssetEventDB) -> Self {
        // An unknown stored type would have been rejected at write time;
        // treat it as a NOTE so replay stays total.
        let event_type = AssetEventType::from_str(&db.event_type).unwrap_or_else(|e| {
            log::error!("Stored event {} has a bad type: {}", db.id, e);
            AssetEventType::Note
        });

        Self {
            id: db.id,
            asset_id: db.asset_id,
            event_type,
            amount: parse_decimal_opt(db.amount.as_ref(), "amount"),
            date: parse_date_tolerant(&db.date, "date"),
            note: db.note,
            is_paid: db.is_paid,
            payment_date: parse_date_opt(db.payment_date.as_ref(), "payment_date"),
            principal_amount: parse_decimal_opt(db.principal_amount.as_ref(), "principal_amount"),
            interest_amount: parse_decimal_opt(db.interest_amount.as_ref(), "interest_amount"),
            reference_period_start: parse_date_opt(
                db.reference_period_start.as_ref(),
                "reference_period_start",
            ),
            reference_period_end: parse_date_opt(
                db.reference_period_end.as_ref(),
                "reference_period_end",
            ),
            created_at: parse_datetime_tolerant(&db.created_at, "created_at"),
            updated_at: parse_datetime_tolerant(&db.updated_at, "updated_at"),
        }
    }
}

impl From<AssetEvent> for AssetEventDB {
    fn from(domain: AssetEvent) -> Self {
        Self {
            id: domain.id,
            asset_id: domain.asset_id,
            event_type: domain.event_type.as_db_str().to_string(),
            amount: domain.amount.map(|d| d.to_string()),
            date: fmt_date(domain.date),
            note: domain.note,
            is_paid: domain.is_paid,
            payment_date: fmt_date_opt(domain.payment_date),
            principal_amount: domain.principal_amount.map(|d| d.to_string()),
            interest_amount: domain.interest_amount.map(|d| d.to_string()),
            reference_period_start: fmt_date_opt(domain.reference_period_start),
            reference_period_end: fmt_date_opt(domain.reference_period_end),
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }
}
