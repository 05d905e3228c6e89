use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

/// A user's aggregated position in one symbol. `total_cost` is the running
/// cost basis, not market value.
#[derive(Clone, Debug, Getters, new)]
pub struct Holding {
    user_id: i64,
    symbol: String,
    shares: i64,
    total_cost: Decimal,
}
