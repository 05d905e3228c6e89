use anyhow::Result;
use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use sqlx::Sqlite;

use super::utils::decimal_to_f64;

pub async fn insert_user(
    username: &str,
    password_hash: &str,
    cash: &Decimal,
    tx: &mut sqlx::Transaction<'_, Sqlite>,
) -> Result<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO users
        (username, password_hash, cash)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(decimal_to_f64(cash)?)
    .execute(&mut **tx)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn update_user_cash(
    user_id: i64,
    cash: &Decimal,
    tx: &mut sqlx::Transaction<'_, Sqlite>,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE users SET cash = ?
        WHERE id = ?
        "#,
    )
    .bind(decimal_to_f64(cash)?)
    .bind(user_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub async fn insert_transaction(
    user_id: i64,
    symbol: &str,
    shares: i64,
    price: &Decimal,
    transaction_date: &DateTime<Local>,
    tx: &mut sqlx::Transaction<'_, Sqlite>,
) -> Result<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO transactions
        (user_id, symbol, shares, price, transaction_date)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(symbol)
    .bind(shares)
    .bind(decimal_to_f64(price)?)
    .bind(transaction_date.timestamp())
    .execute(&mut **tx)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn insert_holding(
    user_id: i64,
    symbol: &str,
    shares: i64,
    total_cost: &Decimal,
    tx: &mut sqlx::Transaction<'_, Sqlite>,
) -> Result<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO holdings
        (user_id, symbol, shares, total_cost)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(symbol)
    .bind(shares)
    .bind(decimal_to_f64(total_cost)?)
    .execute(&mut **tx)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn update_holding(
    user_id: i64,
    symbol: &str,
    shares: i64,
    total_cost: &Decimal,
    tx: &mut sqlx::Transaction<'_, Sqlite>,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE holdings SET shares = ?, total_cost = ?
        WHERE user_id = ? AND symbol = ?
        "#,
    )
    .bind(shares)
    .bind(decimal_to_f64(total_cost)?)
    .bind(user_id)
    .bind(symbol)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub async fn delete_holding(
    user_id: i64,
    symbol: &str,
    tx: &mut sqlx::Transaction<'_, Sqlite>,
) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM holdings
        WHERE user_id = ? AND symbol = ?
        "#,
    )
    .bind(user_id)
    .bind(symbol)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
