use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use crate::{
    models::User,
    services::{AccountService, LedgerService, TradeRequest},
};

#[derive(Debug, Parser)]
#[command(name = "paper-broker", about = "A paper-trading portfolio ledger")]
pub struct Cli {
    /// Account to act as; the password is prompted
    #[arg(short, long, global = true)]
    pub username: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new account with the starting cash balance
    Register { username: String },
    /// Look up the current price for a symbol
    Quote { symbol: String },
    /// Buy shares at the current price
    Buy { symbol: String, shares: String },
    /// Sell shares from an existing holding
    Sell { symbol: String, shares: String },
    /// Show cash and current holdings
    Portfolio,
    /// Show every recorded trade, oldest first
    History,
}

pub async fn run(cli: Cli, accounts: &AccountService, ledger: &LedgerService) -> Result<()> {
    match cli.command {
        Command::Register { username } => {
            let password = rpassword::prompt_password("Password: ")?;
            let confirmation = rpassword::prompt_password("Confirm password: ")?;
            let user = accounts.register(&username, &password, &confirmation).await?;
            println!(
                "Registered {} with {} in cash",
                user.username(),
                usd(user.cash())
            );
        }
        Command::Quote { symbol } => {
            login(cli.username.as_deref(), accounts).await?;
            let quote = ledger.quote(&symbol).await?;
            println!(
                "{} ({}): {}",
                quote.name(),
                quote.symbol(),
                usd(quote.price())
            );
        }
        Command::Buy { symbol, shares } => {
            let user = login(cli.username.as_deref(), accounts).await?;
            let request = TradeRequest::parse(&symbol, &shares)?;
            let receipt = ledger.buy(*user.id(), &request).await?;
            println!(
                "Bought {} {} at {} for {}",
                receipt.shares(),
                receipt.symbol(),
                usd(receipt.price()),
                usd(receipt.total())
            );
        }
        Command::Sell { symbol, shares } => {
            let user = login(cli.username.as_deref(), accounts).await?;
            let request = TradeRequest::parse(&symbol, &shares)?;
            let receipt = ledger.sell(*user.id(), &request).await?;
            println!(
                "Sold {} {} at {} for {}",
                receipt.shares(),
                receipt.symbol(),
                usd(receipt.price()),
                usd(receipt.total())
            );
        }
        Command::Portfolio => {
            let user = login(cli.username.as_deref(), accounts).await?;
            let portfolio = ledger.portfolio(*user.id()).await?;
            for holding in portfolio.holdings() {
                println!(
                    "{:<8} {:>8} shares {:>14}",
                    holding.symbol(),
                    holding.shares(),
                    usd(holding.total_cost())
                );
            }
            println!("{:<8} {:>23}", "CASH", usd(portfolio.cash()));
            println!("{:<8} {:>23}", "TOTAL", usd(&portfolio.grand_total()));
        }
        Command::History => {
            let user = login(cli.username.as_deref(), accounts).await?;
            for transaction in ledger.history(*user.id()).await? {
                println!(
                    "{}  {:<4} {:>6} {:<8} at {}",
                    transaction.transaction_date().format("%Y-%m-%d %H:%M:%S"),
                    transaction.side().to_str(),
                    transaction.shares().abs(),
                    transaction.symbol(),
                    usd(transaction.price())
                );
            }
        }
    }

    Ok(())
}

async fn login(username: Option<&str>, accounts: &AccountService) -> Result<User> {
    let username = username.context("must provide username (--username)")?;
    let password = rpassword::prompt_password("Password: ")?;
    let user = accounts.authenticate(username, &password).await?;

    Ok(user)
}

/// Formats an amount as US dollars with thousands separators, e.g. `$7,400.00`.
pub fn usd(amount: &Decimal) -> String {
    let rounded = amount.round_dp(2);
    let text = rounded.abs().to_string();
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut grouped = String::new();
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    format!("{}${}.{:0<2}", sign, grouped, frac)
}
