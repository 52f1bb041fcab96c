//! NAV aggregation result models.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::assets::AssetKind;

/// Point-in-time fund valuation with reporting breakdowns.
///
/// Identity: `nav = total_asset_value + total_bank_balance - total_liabilities`.
/// Each breakdown independently sums to its total.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavSummary {
    pub total_asset_value: Decimal,
    pub total_bank_balance: Decimal,
    pub total_liabilities: Decimal,
    pub nav: Decimal,
    pub asset_breakdown: Vec<AssetKindBreakdown>,
    pub bank_breakdown: Vec<CurrencyBreakdown>,
    pub liability_breakdown: Vec<LiabilityBreakdown>,
}

/// Active-asset value grouped by asset kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetKindBreakdown {
    pub kind: AssetKind,
    pub total_value: Decimal,
    pub asset_count: u32,
}

/// Latest bank balances grouped by currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyBreakdown {
    pub currency: String,
    pub total_amount: Decimal,
    pub account_count: u32,
}

/// One liability's contribution to the total.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiabilityBreakdown {
    pub name: String,
    pub balance: Decimal,
}
