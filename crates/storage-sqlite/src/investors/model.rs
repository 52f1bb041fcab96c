//! Database models for investors and their capital cashflows.

use chrono::Utc;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fundbook_core::investors::{
    CashflowType, Investor, InvestorCashflow, NewCashflow, NewInvestor,
};

use crate::parsing::{fmt_date, parse_date_tolerant, parse_datetime_tolerant, parse_decimal_tolerant};

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
#[diesel(table_name = crate::schema::investors)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvestorDB {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<InvestorDB> for Investor {
    fn from(db: InvestorDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            email: db.email,
            created_at: parse_datetime_tolerant(&db.created_at, "created_at"),
            updated_at: parse_datetime_tolerant(&db.updated_at, "updated_at"),
        }
    }
}

impl From<Investor> for InvestorDB {
    fn from(domain: Investor) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            email: domain.email,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }
}

impl From<NewInvestor> for InvestorDB {
    fn from(domain: NewInvestor) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            name: domain.name,
            email: domain.email,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

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
#[diesel(table_name = crate::schema::investor_cashflows)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvestorCashflowDB {
    pub id: String,
    pub investor_id: String,
    pub flow_type: String,
    pub amount: String,
    pub date: String,
    pub note: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<InvestorCashflowDB> for InvestorCashflow {
    fn from(db: InvestorCashflowDB) -> Self {
        Self {
            id: db.id,
            investor_id: db.investor_id,
            flow_type: CashflowType::from_db_str(&db.flow_type),
            amount: parse_decimal_tolerant(&db.amount, "amount"),
            date: parse_date_tolerant(&db.date, "date"),
            note: db.note,
            created_at: parse_datetime_tolerant(&db.created_at, "created_at"),
            updated_at: parse_datetime_tolerant(&db.updated_at, "updated_at"),
        }
    }
}

impl From<InvestorCashflow> for InvestorCashflowDB {
    fn from(domain: InvestorCashflow) -> Self {
        Self {
            id: domain.id,
            investor_id: domain.investor_id,
            flow_type: domain.flow_type.as_db_str().to_string(),
            amount: domain.amount.to_string(),
            date: fmt_date(domain.date),
            note: domain.note,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }
}

impl From<NewCashflow> for InvestorCashflowDB {
    fn from(domain: NewCashflow) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            investor_id: domain.investor_id,
            flow_type: domain.flow_type.as_db_str().to_string(),
            amount: domain.amount.to_string(),
            date: fmt_date(domain.date),
            note: domain.note,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
