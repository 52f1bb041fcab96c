//! Tolerant parsing for values stored as SQLite text.
//!
//! Reads never fail on a malformed stored value: parse errors are logged and
//! fall back to a neutral value, so one corrupt row cannot take down a whole
//! listing.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a stored decimal, falling back through f64 for scientific notation.
pub fn parse_decimal_tolerant(value_str: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value_str) {
        Ok(d) => d,
        Err(e_decimal) => match f64::from_str(value_str) {
            Ok(f_val) => match Decimal::from_f64(f_val) {
                Some(dec_val) => dec_val,
                None => {
                    log::error!(
                        "Failed to convert {} '{}' (parsed as f64: {}) to Decimal.",
                        field_name,
                        value_str,
                        f_val
                    );
                    Decimal::ZERO
                }
            },
            Err(e_f64) => {
                log::error!(
                    "Failed to parse {} '{}': as Decimal (err: {}), and as f64 (err: {}). Falling back to ZERO.",
                    field_name, value_str, e_decimal, e_f64
                );
                Decimal::ZERO
            }
        },
    }
}

pub fn parse_decimal_opt(value: Option<&String>, field_name: &str) -> Option<Decimal> {
    value.map(|s| parse_decimal_tolerant(s, field_name))
}

/// Parses a stored business date (`%Y-%m-%d`).
pub fn parse_date_tolerant(value_str: &str, field_name: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value_str, "%Y-%m-%d").unwrap_or_else(|e| {
        log::error!("Failed to parse {} '{}': {}", field_name, value_str, e);
        Utc::now().date_naive()
    })
}

pub fn parse_date_opt(value: Option<&String>, field_name: &str) -> Option<NaiveDate> {
    value.map(|s| parse_date_tolerant(s, field_name))
}

/// Parses a stored RFC 3339 audit stamp.
pub fn parse_datetime_tolerant(value_str: &str, field_name: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|e| {
            log::error!("Failed to parse {} '{}': {}", field_name, value_str, e);
            Utc::now()
        })
}

/// Formats a business date for storage.
pub fn fmt_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn fmt_date_opt(date: Option<NaiveDate>) -> Option<String> {
    date.map(fmt_date)
}
