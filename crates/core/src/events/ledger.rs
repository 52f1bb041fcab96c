//! Pure replay of an asset's event ledger.
//!
//! Given a base value and the ledger in ascending date order (ties broken by
//! insertion order), these functions produce the asset's derived state.
//! Deterministic, no I/O: the persisted `current_value` is only ever a cache
//! of what [`replay`] returns, which is what makes edit/delete recomputation
//! safe.

use rust_decimal::Decimal;

use super::events_model::{AssetEvent, AssetEventType};
use crate::assets::{AssetKind, AssetStatus, AssetValuationPatch, LoanStatus};

/// Full derived state of an asset after replaying its ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerOutcome {
    pub current_value: Decimal,
    pub status: AssetStatus,
    pub sale_price: Option<Decimal>,
    pub sale_date: Option<chrono::NaiveDate>,
    pub loan_status: Option<LoanStatus>,
}

impl LedgerOutcome {
    pub fn into_patch(self, asset_id: String) -> AssetValuationPatch {
        AssetValuationPatch {
            asset_id,
            current_value: self.current_value,
            status: self.status,
            sale_price: self.sale_price,
            sale_date: self.sale_date,
            loan_status: self.loan_status,
        }
    }
}

/// Replays the ledger from `base` and returns the final value.
pub fn replay(kind: AssetKind, base: Decimal, events: &[AssetEvent]) -> Decimal {
    let mut value = base;
    // Cumulative interest ever capitalized on this loan; interest payments
    // are credited against this pool and never below a value of zero.
    let mut accrued_unpaid = Decimal::ZERO;

    for event in events {
        value = step(kind, value, &mut accrued_unpaid, event);
    }
    value
}

fn step(
    kind: AssetKind,
    value: Decimal,
    accrued_unpaid: &mut Decimal,
    event: &AssetEvent,
) -> Decimal {
    match event.event_type {
        AssetEventType::Valuation | AssetEventType::LoanDisbursement => event.amt(),
        AssetEventType::PaymentIn | AssetEventType::Capex => value + event.amt(),
        AssetEventType::PaymentOut | AssetEventType::PrincipalPayment => value - event.amt().abs(),
        AssetEventType::Note => value,
        AssetEventType::Sale | AssetEventType::LoanRepayment | AssetEventType::Default => {
            Decimal::ZERO
        }
        AssetEventType::InterestAccrual => {
            // Interest bookkeeping applies to loans only; on other kinds the
            // event is rejected at write time and inert during replay.
            if !kind.is_loan() || event.is_paid == Some(true) {
                // Cash-settled interest lands in bank balances, outside this
                // engine's scope.
                value
            } else {
                let interest = event.interest_amt();
                *accrued_unpaid += interest;
                value + interest
            }
        }
        AssetEventType::InterestPayment => {
            if !kind.is_loan() {
                value
            } else {
                let credit = event.amt().abs().min(*accrued_unpaid);
                (value - credit).max(Decimal::ZERO)
            }
        }
    }
}

/// Replays the ledger and derives the status side effects in one pass:
/// a SALE closes the asset and records price/date, loan terminal events set
/// the loan status. Append, update, and delete all go through this single
/// implementation, so the arithmetic cannot drift between write paths.
pub fn derive_state(kind: AssetKind, base: Decimal, events: &[AssetEvent]) -> LedgerOutcome {
    let mut status = AssetStatus::Active;
    let mut sale_price = None;
    let mut sale_date = None;
    let mut loan_status = None;

    for event in events {
        match event.event_type {
            AssetEventType::Sale => {
                status = AssetStatus::Sold;
                sale_price = event.amount;
                sale_date = Some(event.date);
            }
            AssetEventType::LoanRepayment if kind.is_loan() => {
                loan_status = Some(LoanStatus::Repaid);
            }
            AssetEventType::Default if kind.is_loan() => {
                loan_status = Some(LoanStatus::Defaulted);
            }
            _ => {}
        }
    }

    LedgerOutcome {
        current_value: replay(kind, base, events),
        status,
        sale_price,
        sale_date,
        loan_status: if kind.is_loan() {
            loan_status.or(Some(LoanStatus::Performing))
        } else {
            None
        },
    }
}

/// Restores ledger order after an edit: ascending date, stable within a day
/// (insertion order preserved).
pub fn sort_events(events: &mut [AssetEvent]) {
    events.sort_by_key(|event| event.date);
}
