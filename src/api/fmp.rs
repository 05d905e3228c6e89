use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use super::{
    QuoteProvider,
    fmp_dto::FmpQuoteDto,
    utils::{make_request, parse_response_array},
};
use crate::models::Quote;

const BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Quote lookup backed by the Financial Modeling Prep quote endpoint.
#[derive(Clone, Debug)]
pub struct FmpQuotes {
    client: Client,
    api_key: String,
}

impl FmpQuotes {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl QuoteProvider for FmpQuotes {
    async fn lookup(&self, symbol: &str) -> Result<Option<Quote>> {
        let endpoint = format!("quote/{}?", symbol);
        let result = make_request(&self.client, BASE_URL, &endpoint, &self.api_key).await?;

        let quotes = parse_response_array::<FmpQuoteDto>(result)?;

        Ok(quotes.into_iter().next().map(FmpQuoteDto::into_quote))
    }
}
