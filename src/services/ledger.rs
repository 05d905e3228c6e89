use std::sync::{Arc, LazyLock};

use anyhow::{Context, Result};
use chrono::Local;
use derive_getters::Getters;
use derive_new::new;
use log::{info, warn};
use regex::Regex;
use rust_decimal::Decimal;
use sqlx::{Pool, Sqlite};
use thiserror::Error;

use crate::{
    api::QuoteProvider,
    db::{read, write},
    models::{Portfolio, Quote, Transaction},
};

static SYMBOL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9.\-]{0,9}$").expect("symbol pattern is valid"));

/// Rejection raised by the transaction engine. Every variant maps to an
/// HTTP-like status category via [`TradeError::status`]; a rejected order
/// leaves the ledger untouched.
#[derive(Debug, Error)]
pub enum TradeError {
    #[error("invalid symbol")]
    InvalidSymbol,
    #[error("invalid number of shares")]
    InvalidShares,
    #[error("insufficient funds")]
    InsufficientFunds,
    #[error("no holding for that symbol")]
    NoSuchHolding,
    #[error("not enough shares owned")]
    InsufficientShares,
    #[error("quote unavailable")]
    QuoteUnavailable,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl TradeError {
    pub fn status(&self) -> u16 {
        match self {
            TradeError::Storage(_) => 500,
            _ => 400,
        }
    }
}

/// A trade order: normalized symbol plus a whole number of shares.
#[derive(Clone, Debug, Getters, new)]
pub struct TradeRequest {
    symbol: String,
    shares: i64,
}

impl TradeRequest {
    /// Builds a request from raw form input. The symbol is trimmed and
    /// upper-cased; the share count must parse to an integer >= 1.
    pub fn parse(symbol: &str, shares: &str) -> Result<Self, TradeError> {
        let symbol = symbol.trim().to_uppercase();
        if !SYMBOL_PATTERN.is_match(&symbol) {
            return Err(TradeError::InvalidSymbol);
        }

        let shares = shares
            .trim()
            .parse::<i64>()
            .map_err(|_| TradeError::InvalidShares)?;
        if shares < 1 {
            return Err(TradeError::InvalidShares);
        }

        Ok(Self { symbol, shares })
    }
}

#[derive(Clone, Debug, Getters, new)]
pub struct TradeReceipt {
    symbol: String,
    shares: i64,
    price: Decimal,
    total: Decimal,
}

/// The transaction engine. Prices orders through the quote provider and
/// applies each buy/sell to the ledger as a single database transaction:
/// history row, cash balance and aggregated holding commit together or not
/// at all.
pub struct LedgerService {
    connection: Pool<Sqlite>,
    quotes: Arc<dyn QuoteProvider>,
}

impl LedgerService {
    pub fn new(connection: Pool<Sqlite>, quotes: Arc<dyn QuoteProvider>) -> Self {
        Self { connection, quotes }
    }

    pub async fn quote(&self, symbol: &str) -> Result<Quote, TradeError> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(TradeError::InvalidSymbol);
        }

        match self.quotes.lookup(&symbol).await {
            Ok(Some(quote)) => Ok(quote),
            Ok(None) => Err(TradeError::InvalidSymbol),
            Err(err) => {
                warn!("Quote lookup for {} failed: {:#}", symbol, err);
                Err(TradeError::InvalidSymbol)
            }
        }
    }

    pub async fn buy(
        &self,
        user_id: i64,
        request: &TradeRequest,
    ) -> Result<TradeReceipt, TradeError> {
        let symbol = request.symbol().trim().to_uppercase();
        let shares = *request.shares();
        if symbol.is_empty() {
            return Err(TradeError::InvalidSymbol);
        }

        let quote = self.quote(&symbol).await?;
        if shares < 1 {
            return Err(TradeError::InvalidShares);
        }

        let price = *quote.price();
        let total = price * Decimal::from(shares);

        let mut tx = self
            .connection
            .begin()
            .await
            .context("Failed to begin transaction")?;

        let user = read::get_user(user_id, &mut tx).await?;
        if total > *user.cash() {
            return Err(TradeError::InsufficientFunds);
        }

        let now = Local::now();
        write::insert_transaction(user_id, &symbol, shares, &price, &now, &mut tx).await?;
        write::update_user_cash(user_id, &(*user.cash() - total), &mut tx).await?;

        match read::get_holding(user_id, &symbol, &mut tx).await? {
            None => {
                write::insert_holding(user_id, &symbol, shares, &total, &mut tx).await?;
            }
            Some(holding) => {
                write::update_holding(
                    user_id,
                    &symbol,
                    holding.shares() + shares,
                    &(*holding.total_cost() + total),
                    &mut tx,
                )
                .await?;
            }
        }

        tx.commit().await.context("Failed to commit buy")?;

        info!("User {} bought {} {} at {}", user_id, shares, symbol, price);
        Ok(TradeReceipt::new(symbol, shares, price, total))
    }

    pub async fn sell(
        &self,
        user_id: i64,
        request: &TradeRequest,
    ) -> Result<TradeReceipt, TradeError> {
        let symbol = request.symbol().trim().to_uppercase();
        let shares = *request.shares();
        if symbol.is_empty() {
            return Err(TradeError::InvalidSymbol);
        }
        if shares < 1 {
            return Err(TradeError::InvalidShares);
        }

        let mut tx = self
            .connection
            .begin()
            .await
            .context("Failed to begin transaction")?;

        let user = read::get_user(user_id, &mut tx).await?;
        let holding = read::get_holding(user_id, &symbol, &mut tx)
            .await?
            .ok_or(TradeError::NoSuchHolding)?;

        if shares > *holding.shares() {
            return Err(TradeError::InsufficientShares);
        }

        let quote = match self.quotes.lookup(&symbol).await {
            Ok(Some(quote)) => quote,
            Ok(None) => return Err(TradeError::QuoteUnavailable),
            Err(err) => {
                warn!("Quote lookup for {} failed: {:#}", symbol, err);
                return Err(TradeError::QuoteUnavailable);
            }
        };

        let price = *quote.price();
        let total = price * Decimal::from(shares);
        let remaining = holding.shares() - shares;

        if remaining == 0 {
            write::delete_holding(user_id, &symbol, &mut tx).await?;
        } else {
            // The remaining cost basis is marked to the sale price, not
            // reduced proportionally.
            let remaining_cost = Decimal::from(remaining) * price;
            write::update_holding(user_id, &symbol, remaining, &remaining_cost, &mut tx).await?;
        }

        write::update_user_cash(user_id, &(*user.cash() + total), &mut tx).await?;

        let now = Local::now();
        write::insert_transaction(user_id, &symbol, -shares, &price, &now, &mut tx).await?;

        tx.commit().await.context("Failed to commit sell")?;

        info!("User {} sold {} {} at {}", user_id, shares, symbol, price);
        Ok(TradeReceipt::new(symbol, shares, price, total))
    }

    pub async fn portfolio(&self, user_id: i64) -> Result<Portfolio> {
        let user = read::get_user_by_id(user_id, &self.connection).await?;
        let holdings = read::get_holdings(user_id, &self.connection).await?;

        Ok(Portfolio::new(*user.cash(), holdings))
    }

    pub async fn history(&self, user_id: i64) -> Result<Vec<Transaction>> {
        read::get_transactions(user_id, &self.connection).await
    }
}
