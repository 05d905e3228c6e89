use anyhow::{Context, Result};
use sqlx::{Pool, Sqlite};

use crate::models::{Holding, Transaction, User};

use super::utils::{parse_holding, parse_transaction, parse_user};

pub async fn get_user_by_username(
    username: &str,
    connection: &Pool<Sqlite>,
) -> Result<Option<User>> {
    let row = sqlx::query(
        r#"
        SELECT * FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(connection)
    .await
    .with_context(|| format!("Failed to load user '{}'", username))?;

    row.as_ref().map(parse_user).transpose()
}

pub async fn get_user_by_id(user_id: i64, connection: &Pool<Sqlite>) -> Result<User> {
    let row = sqlx::query(
        r#"
        SELECT * FROM users
        WHERE id = ?
        "#,
    )
    .bind(user_id)
    .fetch_one(connection)
    .await
    .with_context(|| format!("Failed to load user {}", user_id))?;

    parse_user(&row)
}

/// Same lookup as [`get_user_by_id`], but inside an open transaction so the
/// balance read and the subsequent writes commit as one unit.
pub async fn get_user(user_id: i64, tx: &mut sqlx::Transaction<'_, Sqlite>) -> Result<User> {
    let row = sqlx::query(
        r#"
        SELECT * FROM users
        WHERE id = ?
        "#,
    )
    .bind(user_id)
    .fetch_one(&mut **tx)
    .await
    .with_context(|| format!("Failed to load user {}", user_id))?;

    parse_user(&row)
}

pub async fn get_holding(
    user_id: i64,
    symbol: &str,
    tx: &mut sqlx::Transaction<'_, Sqlite>,
) -> Result<Option<Holding>> {
    let row = sqlx::query(
        r#"
        SELECT * FROM holdings
        WHERE user_id = ? AND symbol = ?
        "#,
    )
    .bind(user_id)
    .bind(symbol)
    .fetch_optional(&mut **tx)
    .await
    .with_context(|| format!("Failed to load holding {} for user {}", symbol, user_id))?;

    row.as_ref().map(parse_holding).transpose()
}

pub async fn get_holdings(user_id: i64, connection: &Pool<Sqlite>) -> Result<Vec<Holding>> {
    let rows = sqlx::query(
        r#"
        SELECT * FROM holdings
        WHERE user_id = ?
        ORDER BY symbol
        "#,
    )
    .bind(user_id)
    .fetch_all(connection)
    .await
    .with_context(|| format!("Failed to load holdings for user {}", user_id))?;

    rows.iter().map(parse_holding).collect()
}

pub async fn get_transactions(user_id: i64, connection: &Pool<Sqlite>) -> Result<Vec<Transaction>> {
    let rows = sqlx::query(
        r#"
        SELECT * FROM transactions
        WHERE user_id = ?
        ORDER BY id
        "#,
    )
    .bind(user_id)
    .fetch_all(connection)
    .await
    .with_context(|| format!("Failed to load transactions for user {}", user_id))?;

    rows.iter().map(parse_transaction).collect()
}
