use std::{collections::HashMap, sync::Arc};

use anyhow::{Result, bail};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use tempfile::TempDir;

use crate::{api::QuoteProvider, db, models::Quote, services::LedgerService};

/// Quote provider with a fixed price map. Unknown symbols return `Ok(None)`.
pub struct MockQuotes {
    prices: HashMap<String, Decimal>,
    failing: bool,
}

impl MockQuotes {
    pub fn new(prices: &[(&str, Decimal)]) -> Self {
        Self {
            prices: prices
                .iter()
                .map(|(symbol, price)| (symbol.to_string(), *price))
                .collect(),
            failing: false,
        }
    }

    /// A provider whose every lookup fails, as if the service were down.
    pub fn failing() -> Self {
        Self {
            prices: HashMap::new(),
            failing: true,
        }
    }
}

#[async_trait]
impl QuoteProvider for MockQuotes {
    async fn lookup(&self, symbol: &str) -> Result<Option<Quote>> {
        if self.failing {
            bail!("provider offline");
        }

        Ok(self.prices.get(symbol).map(|price| {
            Quote::new(
                symbol.to_string(),
                format!("{} Inc", symbol),
                *price,
            )
        }))
    }
}

pub struct TestLedger {
    pub ledger: LedgerService,
    pub connection: SqlitePool,
    // Keeps the database file alive for the duration of the test.
    _dir: TempDir,
}

pub async fn setup(prices: &[(&str, Decimal)]) -> Result<TestLedger> {
    setup_with(Arc::new(MockQuotes::new(prices))).await
}

pub async fn setup_with(quotes: Arc<dyn QuoteProvider>) -> Result<TestLedger> {
    let dir = TempDir::new()?;
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("ledger.db"))
        .create_if_missing(true);
    let connection = SqlitePool::connect_with(options).await?;

    db::init::initialize(&connection).await?;

    Ok(TestLedger {
        ledger: LedgerService::new(connection.clone(), quotes),
        connection,
        _dir: dir,
    })
}

pub async fn seed_user(connection: &SqlitePool, username: &str, cash: Decimal) -> Result<i64> {
    let mut tx = connection.begin().await?;
    let id = db::write::insert_user(username, "not-a-real-hash", &cash, &mut tx).await?;
    tx.commit().await?;

    Ok(id)
}
