use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

#[derive(Clone, Debug, Getters, new)]
pub struct User {
    id: i64,
    username: String,
    password_hash: String,
    cash: Decimal,
}
