pub mod account;
pub mod amount;
pub mod error;
pub mod ledger;
pub mod transaction;

pub use account::{Account, AccountId};
pub use amount::Amount;
pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;
pub use transaction::{TransactionKind, TransactionRecord};
