use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone};
use rust_decimal::{Decimal, prelude::FromPrimitive, prelude::ToPrimitive};
use sqlx::{Row, sqlite::SqliteRow};

use crate::models::{Holding, Transaction, User};

pub fn parse_i64_from_row(row: &SqliteRow, column: &str) -> Result<i64> {
    row.try_get::<i64, _>(column)
        .with_context(|| format!("Failed to parse i64 from column '{}'", column))
}

pub fn parse_string_from_row(row: &SqliteRow, column: &str) -> Result<String> {
    row.try_get::<String, _>(column)
        .with_context(|| format!("Failed to parse String from column '{}'", column))
}

pub fn parse_f64_from_row(row: &SqliteRow, column: &str) -> Result<f64> {
    let value: f64 = row
        .try_get(column)
        .with_context(|| format!("Failed to parse f64 from column '{}'", column))?;
    Ok(value)
}

pub fn parse_decimal_from_row(row: &SqliteRow, column: &str) -> Result<Decimal> {
    let value = parse_f64_from_row(row, column)?;
    Decimal::from_f64(value)
        .with_context(|| format!("Failed to convert f64 to Decimal for column '{}'", column))
}

pub fn parse_datetime_from_row(row: &SqliteRow, column: &str) -> Result<DateTime<Local>> {
    let timestamp: i64 = row
        .try_get(column)
        .with_context(|| format!("Failed to parse timestamp from column '{}'", column))?;
    Local.timestamp_opt(timestamp, 0).single().with_context(|| {
        format!(
            "Failed to convert timestamp to DateTime for column '{}'",
            column
        )
    })
}

/// Decimals are stored as REAL rounded to 4 dp.
pub fn decimal_to_f64(value: &Decimal) -> Result<f64> {
    value
        .round_dp(4)
        .to_f64()
        .with_context(|| format!("Failed to convert Decimal '{}' to f64", value))
}

pub fn parse_user(row: &SqliteRow) -> Result<User> {
    let id = parse_i64_from_row(row, "id")?;
    let username = parse_string_from_row(row, "username")?;
    let password_hash = parse_string_from_row(row, "password_hash")?;
    let cash = parse_decimal_from_row(row, "cash")?;

    Ok(User::new(id, username, password_hash, cash))
}

pub fn parse_holding(row: &SqliteRow) -> Result<Holding> {
    let user_id = parse_i64_from_row(row, "user_id")?;
    let symbol = parse_string_from_row(row, "symbol")?;
    let shares = parse_i64_from_row(row, "shares")?;
    let total_cost = parse_decimal_from_row(row, "total_cost")?;

    Ok(Holding::new(user_id, symbol, shares, total_cost))
}

pub fn parse_transaction(row: &SqliteRow) -> Result<Transaction> {
    let id = parse_i64_from_row(row, "id")?;
    let user_id = parse_i64_from_row(row, "user_id")?;
    let symbol = parse_string_from_row(row, "symbol")?;
    let shares = parse_i64_from_row(row, "shares")?;
    let price = parse_decimal_from_row(row, "price")?;
    let transaction_date = parse_datetime_from_row(row, "transaction_date")?;

    Ok(Transaction::new(
        id,
        user_id,
        symbol,
        shares,
        price,
        transaction_date,
    ))
}
