use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

use super::Holding;

/// Snapshot of a user's cash balance and open holdings, ordered by symbol.
#[derive(Clone, Debug, Getters, new)]
pub struct Portfolio {
    cash: Decimal,
    holdings: Vec<Holding>,
}

impl Portfolio {
    /// Cash plus the cost basis of every open holding.
    pub fn grand_total(&self) -> Decimal {
        self.holdings
            .iter()
            .fold(self.cash, |sum, holding| sum + *holding.total_cost())
    }
}
