pub mod holding;
pub mod portfolio;
pub mod quote;
pub mod transaction;
pub mod user;

pub use holding::Holding;
pub use portfolio::Portfolio;
pub use quote::Quote;
pub use transaction::{TradeSide, Transaction};
pub use user::User;
