use std::{env, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use paper_broker::{
    api::FmpQuotes,
    cli::{self, Cli},
    db,
    services::{AccountService, LedgerService},
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| String::from("ledger.db"));
    let db_connect_options = SqliteConnectOptions::new()
        .filename(&database_url)
        .create_if_missing(true);
    let connection = SqlitePool::connect_with(db_connect_options).await?;

    db::init::initialize(&connection).await?;

    let api_key = env::var("FMP_API_KEY").context("FMP_API_KEY not set")?;
    let quotes = Arc::new(FmpQuotes::new(api_key));

    let starting_cash = match env::var("STARTING_CASH") {
        Ok(value) => value
            .parse::<Decimal>()
            .with_context(|| format!("Invalid STARTING_CASH '{}'", value))?,
        Err(_) => dec!(10000),
    };

    let accounts = AccountService::new(connection.clone(), starting_cash);
    let ledger = LedgerService::new(connection, quotes);

    cli::run(cli, &accounts, &ledger).await
}
