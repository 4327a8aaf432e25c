mod core;
pub mod backend;
mod config;
mod engine;

pub use crate::core::{Account, AccountId, Amount, Ledger, LedgerError, LedgerResult};
pub use crate::core::{TransactionKind, TransactionRecord};
pub use crate::core::{account, amount, error, ledger, transaction};
pub use crate::backend::{BackendError, JsonStore, LedgerStore};
pub use crate::config::{AppConfig, DEFAULT_LEDGER_FILE};
pub use crate::engine::Bank;
