use log::{debug, warn};

use crate::backend::{BackendError, LedgerStore};
use crate::core::account::Account;
use crate::core::amount::Amount;
use crate::core::error::LedgerResult;
use crate::core::ledger::Ledger;
use crate::core::transaction::TransactionRecord;

/// The engine owning the ledger and its store. Every mutation runs through
/// here: invariants are checked by the ledger, then the whole document is
/// saved. If the save fails the in-memory change is rolled back, so memory
/// and disk never diverge. Reads never touch the store.
pub struct Bank<S: LedgerStore> {
    ledger: Ledger,
    store: S,
}

impl<S: LedgerStore> Bank<S> {
    pub fn open(store: S) -> Result<Bank<S>, BackendError> {
        let ledger = store.load()?;
        debug!("loaded ledger with {} account(s)", ledger.len());
        return Ok(Bank { ledger, store });
    }

    pub fn create_account(
        &mut self,
        id: &str,
        holder_name: &str,
        initial_balance: Amount,
    ) -> LedgerResult<()> {
        let snapshot = self.ledger.snapshot(id);
        self.ledger.open_account(id, holder_name, initial_balance)?;
        self.commit(id, snapshot)?;
        return Ok(());
    }

    pub fn deposit(&mut self, id: &str, amount: Amount) -> LedgerResult<Amount> {
        let snapshot = self.ledger.snapshot(id);
        let new_balance = self.ledger.deposit(id, amount)?;
        self.commit(id, snapshot)?;
        return Ok(new_balance);
    }

    pub fn withdraw(&mut self, id: &str, amount: Amount) -> LedgerResult<Amount> {
        let snapshot = self.ledger.snapshot(id);
        let new_balance = self.ledger.withdraw(id, amount)?;
        self.commit(id, snapshot)?;
        return Ok(new_balance);
    }

    pub fn balance(&self, id: &str) -> LedgerResult<Amount> {
        return self.ledger.balance(id);
    }

    pub fn history(&self, id: &str) -> LedgerResult<&[TransactionRecord]> {
        return self.ledger.history(id);
    }

    pub fn accounts(&self) -> impl Iterator<Item = (&str, &Account)> {
        return self.ledger.accounts();
    }

    fn commit(&mut self, id: &str, snapshot: Option<Account>) -> LedgerResult<()> {
        match self.store.save(&self.ledger) {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!("save failed, rolling back change to account {}: {}", id, err);
                self.ledger.restore(id, snapshot);
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Bank;
    use crate::backend::{BackendError, JsonStore, LedgerStore, Result};
    use crate::core::{Amount, Ledger, LedgerError, TransactionKind};

    use std::cell::Cell;
    use std::io;

    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    fn cents(c: i64) -> Amount {
        Amount::from_cents(c)
    }

    /// Store double that counts saves and can be told to start failing.
    struct FlakyStore {
        saves: Cell<usize>,
        fail_after: usize,
    }

    impl FlakyStore {
        fn reliable() -> FlakyStore {
            FlakyStore { saves: Cell::new(0), fail_after: usize::MAX }
        }

        fn failing_after(fail_after: usize) -> FlakyStore {
            FlakyStore { saves: Cell::new(0), fail_after }
        }
    }

    impl LedgerStore for FlakyStore {
        fn load(&self) -> Result<Ledger> {
            Ok(Ledger::new())
        }

        fn save(&self, _ledger: &Ledger) -> Result<()> {
            let attempted = self.saves.get() + 1;
            self.saves.set(attempted);
            if attempted > self.fail_after {
                return Err(BackendError::Io(io::Error::new(
                    io::ErrorKind::Other,
                    "disk on fire",
                )));
            }
            Ok(())
        }
    }

    #[fixture]
    fn workdir() -> TempDir {
        TempDir::new().unwrap()
    }

    #[rstest]
    fn mutations_survive_a_restart(workdir: TempDir) {
        let path = workdir.path().join("ledger.json");

        let mut bank = Bank::open(JsonStore::new(&path)).unwrap();
        bank.create_account("A1", "Alice", cents(10000)).unwrap();
        bank.deposit("A1", cents(5000)).unwrap();
        bank.withdraw("A1", cents(2500)).unwrap();
        drop(bank);

        let reopened = Bank::open(JsonStore::new(&path)).unwrap();
        assert_eq!(reopened.balance("A1").unwrap(), cents(12500));
        assert_eq!(reopened.history("A1").unwrap().len(), 3);
    }

    #[rstest]
    fn rejected_operations_do_not_touch_the_document(workdir: TempDir) {
        let path = workdir.path().join("ledger.json");

        let mut bank = Bank::open(JsonStore::new(&path)).unwrap();
        bank.create_account("A1", "Alice", cents(10000)).unwrap();
        assert!(bank.withdraw("A1", cents(99999)).is_err());
        drop(bank);

        let reopened = Bank::open(JsonStore::new(&path)).unwrap();
        assert_eq!(reopened.balance("A1").unwrap(), cents(10000));
        assert_eq!(reopened.history("A1").unwrap().len(), 1);
    }

    #[test]
    fn reads_never_save() {
        let mut bank = Bank::open(FlakyStore::reliable()).unwrap();
        bank.create_account("A1", "Alice", cents(10000)).unwrap();
        let saves_after_create = bank.store.saves.get();

        bank.balance("A1").unwrap();
        bank.history("A1").unwrap();
        let _ = bank.accounts().count();

        assert_eq!(bank.store.saves.get(), saves_after_create);
    }

    #[test]
    fn failed_save_rolls_back_a_deposit() {
        let mut bank = Bank::open(FlakyStore::failing_after(1)).unwrap();
        bank.create_account("A1", "Alice", cents(10000)).unwrap();

        let result = bank.deposit("A1", cents(5000));

        assert!(matches!(result, Err(LedgerError::Persistence(..))));
        assert_eq!(bank.balance("A1").unwrap(), cents(10000));
        assert_eq!(bank.history("A1").unwrap().len(), 1);
    }

    #[test]
    fn failed_save_rolls_back_a_withdrawal() {
        let mut bank = Bank::open(FlakyStore::failing_after(1)).unwrap();
        bank.create_account("A1", "Alice", cents(10000)).unwrap();

        let result = bank.withdraw("A1", cents(2500));

        assert!(matches!(result, Err(LedgerError::Persistence(..))));
        assert_eq!(bank.balance("A1").unwrap(), cents(10000));
        assert_eq!(bank.history("A1").unwrap().len(), 1);
    }

    #[test]
    fn failed_save_removes_a_newly_created_account() {
        let mut bank = Bank::open(FlakyStore::failing_after(0)).unwrap();

        let result = bank.create_account("A1", "Alice", cents(10000));

        assert!(matches!(result, Err(LedgerError::Persistence(..))));
        assert!(matches!(bank.balance("A1"), Err(LedgerError::AccountNotFound(..))));
    }

    #[test]
    fn validation_failures_do_not_attempt_a_save() {
        let mut bank = Bank::open(FlakyStore::reliable()).unwrap();
        bank.create_account("A1", "Alice", cents(10000)).unwrap();
        let saves_before = bank.store.saves.get();

        assert!(bank.deposit("A1", cents(0)).is_err());
        assert!(bank.withdraw("A1", cents(99999)).is_err());
        assert!(bank.deposit("ghost", cents(100)).is_err());
        assert!(bank.create_account("A1", "Mallory", cents(0)).is_err());

        assert_eq!(bank.store.saves.get(), saves_before);
    }

    #[test]
    fn initial_deposit_record_is_written_for_zero_balances() {
        let mut bank = Bank::open(FlakyStore::reliable()).unwrap();
        bank.create_account("B2", "Bob", Amount::ZERO).unwrap();

        let history = bank.history("B2").unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].kind(), TransactionKind::InitialDeposit);
        assert_eq!(history[0].amount(), Amount::ZERO);
    }
}
