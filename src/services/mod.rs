pub mod accounts;
pub mod ledger;

pub use accounts::{AccountService, AuthError};
pub use ledger::{LedgerService, TradeError, TradeReceipt, TradeRequest};
