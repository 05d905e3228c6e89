use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::Quote;

#[derive(Debug, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct FmpQuoteDto {
    symbol: String,
    name: String,
    price: Decimal,
    change_percentage: Decimal,
    change: Decimal,
    volume: i64,
    day_low: Decimal,
    day_high: Decimal,
    exchange: String,
    open: Decimal,
    previous_close: Decimal,
    timestamp: i64,
}

impl FmpQuoteDto {
    pub fn into_quote(self) -> Quote {
        Quote::new(self.symbol, self.name, self.price)
    }
}
