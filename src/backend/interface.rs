use thiserror::Error;

use crate::core::Ledger;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to access ledger file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode ledger: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BackendError>;

/// Durable storage for the whole ledger. One document, replaced wholesale
/// on every save.
pub trait LedgerStore {
    /// Read the persisted ledger. A document that does not exist yet, or
    /// that cannot be parsed, yields an empty ledger; only I/O failures of
    /// another kind (e.g. permission denied) are errors.
    fn load(&self) -> Result<Ledger>;

    /// Overwrite the persisted document with the given ledger.
    fn save(&self, ledger: &Ledger) -> Result<()>;
}
