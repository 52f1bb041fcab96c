//! Database models for bank balances and liabilities.

use chrono::Utc;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fundbook_core::banking::{BankBalance, Liability, NewBankBalance, NewLiability};

use crate::parsing::{fmt_date, parse_date_tolerant, parse_datetime_tolerant, parse_decimal_tolerant};

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
#[diesel(table_name = crate::schema::bank_balances)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BankBalanceDB {
    pub id: String,
    pub account_name: String,
    pub bank_name: String,
    pub amount: String,
    pub currency: String,
    pub date: String,
    pub created_at: String,
}

impl From<BankBalanceDB> for BankBalance {
    fn from(db: BankBalanceDB) -> Self {
        Self {
            id: db.id,
            account_name: db.account_name,
            bank_name: db.bank_name,
            amount: parse_decimal_tolerant(&db.amount, "amount"),
            currency: db.currency,
            date: parse_date_tolerant(&db.date, "date"),
            created_at: parse_datetime_tolerant(&db.created_at, "created_at"),
        }
    }
}

impl From<NewBankBalance> for BankBalanceDB {
    fn from(domain: NewBankBalance) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            account_name: domain.account_name,
            bank_name: domain.bank_name,
            amount: domain.amount.to_string(),
            currency: domain.currency,
            date: fmt_date(domain.date),
            created_at: Utc::now().to_rfc3339(),
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
#[diesel(table_name = crate::schema::liabilities)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LiabilityDB {
    pub id: String,
    pub name: String,
    pub current_balance: String,
    pub note: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<LiabilityDB> for Liability {
    fn from(db: LiabilityDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            current_balance: parse_decimal_tolerant(&db.current_balance, "current_balance"),
            note: db.note,
            created_at: parse_datetime_tolerant(&db.created_at, "created_at"),
            updated_at: parse_datetime_tolerant(&db.updated_at, "updated_at"),
        }
    }
}

impl From<Liability> for LiabilityDB {
    fn from(domain: Liability) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            current_balance: domain.current_balance.to_string(),
            note: domain.note,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }
}

impl From<NewLiability> for LiabilityDB {
    fn from(domain: NewLiability) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            name: domain.name,
            current_balance: domain.current_balance.to_string(),
            note: domain.note,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
