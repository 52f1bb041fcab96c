//! Database models for assets.

use chrono::Utc;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fundbook_core::assets::{Asset, AssetKind, AssetStatus, LoanStatus, NewAsset};

use crate::parsing::{
    fmt_date, fmt_date_opt, parse_date_opt, parse_date_tolerant, parse_datetime_tolerant,
    parse_decimal_opt, parse_decimal_tolerant,
};

/// Database model for assets. Decimals and dates are stored as text.
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
#[diesel(table_name = crate::schema::assets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AssetDB {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub status: String,
    pub currency: String,
    pub current_value: String,
    pub acquired_price: Option<String>,
    pub acquired_date: String,
    pub sale_price: Option<String>,
    pub sale_date: Option<String>,
    pub note: Option<String>,
    pub principal_amount: Option<String>,
    pub interest_rate: Option<String>,
    pub payment_period: Option<String>,
    pub maturity_date: Option<String>,
    pub loan_status: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<AssetDB> for Asset {
    fn from(db: AssetDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            kind: AssetKind::from_db_str(&db.kind),
            status: AssetStatus::from_db_str(&db.status),
            currency: db.currency,
            current_value: parse_decimal_tolerant(&db.current_value, "current_value"),
            acquired_price: parse_decimal_opt(db.acquired_price.as_ref(), "acquired_price"),
            acquired_date: parse_date_tolerant(&db.acquired_date, "acquired_date"),
            sale_price: parse_decimal_opt(db.sale_price.as_ref(), "sale_price"),
            sale_date: parse_date_opt(db.sale_date.as_ref(), "sale_date"),
            note: db.note,
            principal_amount: parse_decimal_opt(db.principal_amount.as_ref(), "principal_amount"),
            interest_rate: parse_decimal_opt(db.interest_rate.as_ref(), "interest_rate"),
            payment_period: db.payment_period,
            maturity_date: parse_date_opt(db.maturity_date.as_ref(), "maturity_date"),
            loan_status: db.loan_status.as_deref().map(LoanStatus::from_db_str),
            created_at: parse_datetime_tolerant(&db.created_at, "created_at"),
            updated_at: parse_datetime_tolerant(&db.updated_at, "updated_at"),
        }
    }
}

impl From<Asset> for AssetDB {
    fn from(domain: Asset) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            kind: domain.kind.as_db_str().to_string(),
            status: domain.status.as_db_str().to_string(),
            currency: domain.currency,
            current_value: domain.current_value.to_string(),
            acquired_price: domain.acquired_price.map(|d| d.to_string()),
            acquired_date: fmt_date(domain.acquired_date),
            sale_price: domain.sale_price.map(|d| d.to_string()),
            sale_date: fmt_date_opt(domain.sale_date),
            note: domain.note,
            principal_amount: domain.principal_amount.map(|d| d.to_string()),
            interest_rate: domain.interest_rate.map(|d| d.to_string()),
            payment_period: domain.payment_period,
            maturity_date: fmt_date_opt(domain.maturity_date),
            loan_status: domain.loan_status.map(|s| s.as_db_str().to_string()),
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }
}

impl From<NewAsset> for AssetDB {
    fn from(domain: NewAsset) -> Self {
        let now = Utc::now().to_rfc3339();
        // An asset starts at its acquisition price; the ledger takes over
        // from there.
        let initial_value = domain.acquired_price.unwrap_or(Decimal::ZERO);
        let loan_status = domain
            .kind
            .is_loan()
            .then(|| LoanStatus::Performing.as_db_str().to_string());

        Self {
            id: Uuid::new_v4().to_string(),
            name: domain.name,
            kind: domain.kind.as_db_str().to_string(),
            status: AssetStatus::Active.as_db_str().to_string(),
            currency: domain.currency,
            current_value: initial_value.to_string(),
            acquired_price: domain.acquired_price.map(|d| d.to_string()),
            acquired_date: fmt_date(domain.acquired_date),
            sale_price: None,
            sale_date: None,
            note: domain.note,
            principal_amount: domain.principal_amount.map(|d| d.to_string()),
            interest_rate: domain.interest_rate.map(|d| d.to_string()),
            payment_period: domain.payment_period,
            maturity_date: fmt_date_opt(domain.maturity_date),
            loan_status,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
