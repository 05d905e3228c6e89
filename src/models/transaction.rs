use chrono::{DateTime, Local};
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

/// One recorded trade. Positive shares are a buy, negative a sell; rows are
/// append-only and never mutated.
#[derive(Clone, Debug, Getters, new)]
pub struct Transaction {
    id: i64,
    user_id: i64,
    symbol: String,
    shares: i64,
    price: Decimal,
    transaction_date: DateTime<Local>,
}

impl Transaction {
    pub fn side(&self) -> TradeSide {
        if self.shares < 0 {
            TradeSide::Sell
        } else {
            TradeSide::Buy
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn to_str(&self) -> &str {
        match self {
            TradeSide::Buy => "Buy",
            TradeSide::Sell => "Sell",
        }
    }
}
