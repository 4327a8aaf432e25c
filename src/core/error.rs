use thiserror::Error;

use crate::backend::BackendError;
use crate::core::account::AccountId;
use crate::core::amount::Amount;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Occurs when creating an account under an identifier
    /// that is already present on the ledger.
    #[error("account {0} already exists")]
    DuplicateAccount(AccountId),
    /// Occurs when attempting to reference an account
    /// by an identifier which does not exist on the ledger.
    #[error("no such account: {0}")]
    AccountNotFound(AccountId),
    /// Occurs when an operation is given an amount outside its
    /// accepted range: a negative opening balance, or a deposit
    /// or withdrawal that is not strictly positive.
    #[error("invalid amount: {0}")]
    InvalidAmount(Amount),
    /// Occurs when a withdrawal asks for more than the account holds.
    /// The in-memory and persisted state are left untouched.
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Amount, available: Amount },
    /// Occurs when the ledger document cannot be written (or read for a
    /// reason other than not existing yet). The triggering mutation has
    /// been rolled back by the time this is returned.
    #[error(transparent)]
    Persistence(#[from] BackendError),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
