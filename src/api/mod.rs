pub mod fmp;
pub mod fmp_dto;
pub mod utils;

pub use fmp::FmpQuotes;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::Quote;

/// Source of current prices for ticker symbols.
///
/// `Ok(None)` means the provider does not know the symbol; `Err` means the
/// provider itself failed (network, malformed payload).
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn lookup(&self, symbol: &str) -> Result<Option<Quote>>;
}
