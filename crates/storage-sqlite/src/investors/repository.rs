use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use fundbook_core::investors::{
    CashflowRepositoryTrait, CashflowUpdate, Investor, InvestorCashflow, InvestorRepositoryTrait,
    InvestorUpdate, NewCashflow, NewInvestor,
};
use fundbook_core::{Error, Result};

use super::model::{InvestorCashflowDB, InvestorDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{investor_cashflows, investors};
use async_trait::async_trait;

/// Repository for managing investor rows.
pub struct InvestorRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl InvestorRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn load_investor(conn: &mut SqliteConnection, investor_id: &str) -> Result<Investor> {
    let investor_db = investors::table
        .select(InvestorDB::as_select())
        .find(investor_id)
        .first::<InvestorDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| Error::not_found(format!("Investor {investor_id}")))?;
    Ok(Investor::from(investor_db))
}

#[async_trait]
impl InvestorRepositoryTrait for InvestorRepository {
    fn get_investor(&self, investor_id: &str) -> Result<Investor> {
        let mut conn = get_connection(&self.pool)?;
        load_investor(&mut conn, investor_id)
    }

    fn get_investors(&self) -> Result<Vec<Investor>> {
        let mut conn = get_connection(&self.pool)?;
        let investors_db = investors::table
            .select(InvestorDB::as_select())
            .order(investors::name.asc())
            .load::<InvestorDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(investors_db.into_iter().map(Investor::from).collect())
    }

    async fn create_investor(&self, new_investor: NewInvestor) -> Result<Investor> {
        let investor_db: InvestorDB = new_investor.into();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Investor> {
                let inserted = diesel::insert_into(investors::table)
                    .values(&investor_db)
                    .get_result::<InvestorDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Investor::from(inserted))
            })
            .await
    }

    async fn update_investor(&self, update: InvestorUpdate) -> Result<Investor> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Investor> {
                let mut investor = load_investor(conn, &update.id)?;
                let investor_id = investor.id.clone();
                update.apply_to(&mut investor);

                let investor_db: InvestorDB = investor.into();
                let updated = diesel::update(investors::table.find(investor_id))
                    .set(&investor_db)
                    .get_result::<InvestorDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Investor::from(updated))
            })
            .await
    }

    async fn delete_investor(&self, investor_id: &str) -> Result<()> {
        let investor_id = investor_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                // The cashflow history goes with the investor.
                diesel::delete(
                    investor_cashflows::table
                        .filter(investor_cashflows::investor_id.eq(&investor_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                diesel::delete(investors::table.find(&investor_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}

/// Repository for managing capital cashflow rows.
pub struct CashflowRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CashflowRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn load_cashflow(conn: &mut SqliteConnection, cashflow_id: &str) -> Result<InvestorCashflow> {
    let cashflow_db = investor_cashflows::table
        .select(InvestorCashflowDB::as_select())
        .find(cashflow_id)
        .first::<InvestorCashflowDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| Error::not_found(format!("Cashflow {cashflow_id}")))?;
    Ok(InvestorCashflow::from(cashflow_db))
}

#[async_trait]
impl CashflowRepositoryTrait for CashflowRepository {
    fn get_cashflow(&self, cashflow_id: &str) -> Result<InvestorCashflow> {
        let mut conn = get_connection(&self.pool)?;
        load_cashflow(&mut conn, cashflow_id)
    }

    fn get_cashflows(&self) -> Result<Vec<InvestorCashflow>> {
        let mut conn = get_connection(&self.pool)?;
        let cashflows_db = investor_cashflows::table
            .select(InvestorCashflowDB::as_select())
            .order(investor_cashflows::date.asc())
            .load::<InvestorCashflowDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(cashflows_db
            .into_iter()
            .map(InvestorCashflow::from)
            .collect())
    }

    fn get_cashflows_for_investor(&self, investor_id: &str) -> Result<Vec<InvestorCashflow>> {
        let mut conn = get_connection(&self.pool)?;
        let cashflows_db = investor_cashflows::table
            .filter(investor_cashflows::investor_id.eq(investor_id))
            .select(InvestorCashflowDB::as_select())
            .order(investor_cashflows::date.asc())
            .load::<InvestorCashflowDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(cashflows_db
            .into_iter()
            .map(InvestorCashflow::from)
            .collect())
    }

    async fn create_cashflow(&self, new_cashflow: NewCashflow) -> Result<InvestorCashflow> {
        let cashflow_db: InvestorCashflowDB = new_cashflow.into();

        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<InvestorCashflow> {
                    let inserted = diesel::insert_into(investor_cashflows::table)
                        .values(&cashflow_db)
                        .get_result::<InvestorCashflowDB>(conn)
                        .map_err(StorageError::from)?;
                    Ok(InvestorCashflow::from(inserted))
                },
            )
            .await
    }

    async fn update_cashflow(&self, update: CashflowUpdate) -> Result<InvestorCashflow> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<InvestorCashflow> {
                    let mut cashflow = load_cashflow(conn, &update.id)?;
                    let cashflow_id = cashflow.id.clone();
                    update.apply_to(&mut cashflow);

                    let cashflow_db: InvestorCashflowDB = cashflow.into();
                    let updated = diesel::update(investor_cashflows::table.find(cashflow_id))
                        .set(&cashflow_db)
                        .get_result::<InvestorCashflowDB>(conn)
                        .map_err(StorageError::from)?;
                    Ok(InvestorCashflow::from(updated))
                },
            )
            .await
    }

    async fn delete_cashflow(&self, cashflow_id: &str) -> Result<()> {
        let cashflow_id = cashflow_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let affected = diesel::delete(investor_cashflows::table.find(&cashflow_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::not_found(format!("Cashflow {cashflow_id}")));
                }
                Ok(())
            })
            .await
    }
}
