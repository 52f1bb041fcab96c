use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use fundbook_core::banking::{
    BankBalance, BankBalanceRepositoryTrait, Liability, LiabilityRepositoryTrait, LiabilityUpdate,
    NewBankBalance, NewLiability,
};
use fundbook_core::{Error, Result};

use super::model::{BankBalanceDB, LiabilityDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{bank_balances, liabilities};
use async_trait::async_trait;

/// Repository for the append-only bank balance history.
pub struct BankBalanceRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BankBalanceRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl BankBalanceRepositoryTrait for BankBalanceRepository {
    fn get_balance(&self, balance_id: &str) -> Result<BankBalance> {
        let mut conn = get_connection(&self.pool)?;
        let balance_db = bank_balances::table
            .select(BankBalanceDB::as_select())
            .find(balance_id)
            .first::<BankBalanceDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::not_found(format!("Bank balance {balance_id}")))?;
        Ok(BankBalance::from(balance_db))
    }

    fn get_balances(&self) -> Result<Vec<BankBalance>> {
        let mut conn = get_connection(&self.pool)?;
        let balances_db = bank_balances::table
            .select(BankBalanceDB::as_select())
            .order((bank_balances::date.asc(), bank_balances::created_at.asc()))
            .load::<BankBalanceDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(balances_db.into_iter().map(BankBalance::from).collect())
    }

    async fn create_balance(&self, new_balance: NewBankBalance) -> Result<BankBalance> {
        let balance_db: BankBalanceDB = new_balance.into();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<BankBalance> {
                let inserted = diesel::insert_into(bank_balances::table)
                    .values(&balance_db)
                    .get_result::<BankBalanceDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(BankBalance::from(inserted))
            })
            .await
    }

    async fn delete_balance(&self, balance_id: &str) -> Result<()> {
        let balance_id = balance_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let affected = diesel::delete(bank_balances::table.find(&balance_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::not_found(format!("Bank balance {balance_id}")));
                }
                Ok(())
            })
            .await
    }
}

/// Repository for managing liability rows.
pub struct LiabilityRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl LiabilityRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn load_liability(conn: &mut SqliteConnection, liability_id: &str) -> Result<Liability> {
    let liability_db = liabilities::table
        .select(LiabilityDB::as_select())
        .find(liability_id)
        .first::<LiabilityDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| Error::not_found(format!("Liability {liability_id}")))?;
    Ok(Liability::from(liability_db))
}

#[async_trait]
impl LiabilityRepositoryTrait for LiabilityRepository {
    fn get_liability(&self, liability_id: &str) -> Result<Liability> {
        let mut conn = get_connection(&self.pool)?;
        load_liability(&mut conn, liability_id)
    }

    fn get_liabilities(&self) -> Result<Vec<Liability>> {
        let mut conn = get_connection(&self.pool)?;
        let liabilities_db = liabilities::table
            .select(LiabilityDB::as_select())
            .order(liabilities::name.asc())
            .load::<LiabilityDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(liabilities_db.into_iter().map(Liability::from).collect())
    }

    async fn create_liability(&self, new_liability: NewLiability) -> Result<Liability> {
        let liability_db: LiabilityDB = new_liability.into();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Liability> {
                let inserted = diesel::insert_into(liabilities::table)
                    .values(&liability_db)
                    .get_result::<LiabilityDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Liability::from(inserted))
            })
            .await
    }

    async fn update_liability(&self, update: LiabilityUpdate) -> Result<Liability> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Liability> {
                let mut liability = load_liability(conn, &update.id)?;
                let liability_id = liability.id.clone();
                update.apply_to(&mut liability);

                let liability_db: LiabilityDB = liability.into();
                let updated = diesel::update(liabilities::table.find(liability_id))
                    .set(&liability_db)
                    .get_result::<LiabilityDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Liability::from(updated))
            })
            .await
    }

    async fn delete_liability(&self, liability_id: &str) -> Result<()> {
        let liability_id = liability_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let affected = diesel::delete(liabilities::table.find(&liability_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::not_found(format!("Liability {liability_id}")));
                }
                Ok(())
            })
            .await
    }
}
