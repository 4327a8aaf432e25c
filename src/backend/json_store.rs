use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::fs;

use log::warn;

use crate::backend::interface::{LedgerStore, Result};
use crate::core::Ledger;

/// Flat-file store: the whole ledger as one pretty-printed JSON document.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl AsRef<Path>) -> JsonStore {
        return JsonStore { path: path.as_ref().to_owned() };
    }

    pub fn path(&self) -> &Path {
        return &self.path;
    }
}

impl LedgerStore for JsonStore {
    fn load(&self) -> Result<Ledger> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Ledger::new()),
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_str(&contents) {
            Ok(ledger) => Ok(ledger),
            Err(err) => {
                warn!(
                    "ledger file {} is unreadable, starting empty: {}",
                    self.path.display(),
                    err
                );
                Ok(Ledger::new())
            }
        }
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        let serialized = serde_json::to_string_pretty(ledger)?;

        // Write a sibling file and rename over the original, so a reader
        // never sees a half-written document.
        let staging = self.path.with_extension("tmp");
        fs::write(&staging, serialized)?;
        fs::rename(&staging, &self.path)?;
        return Ok(());
    }
}
