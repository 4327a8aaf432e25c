use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::account::{Account, AccountId};
use crate::core::amount::Amount;
use crate::core::error::{LedgerError, LedgerResult};
use crate::core::transaction::TransactionRecord;

type AccountMap = BTreeMap<AccountId, Account>;

/// The repository: every account on file, keyed by identifier. Serializes
/// transparently as the persisted document's top-level object. A `BTreeMap`
/// keeps the document ordering stable across save cycles.
#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    accounts: AccountMap,
}

impl Ledger {
    pub fn new() -> Ledger {
        return Ledger { accounts: BTreeMap::new() };
    }

    pub fn open_account(
        &mut self,
        id: &str,
        holder_name: &str,
        initial_balance: Amount,
    ) -> LedgerResult<()> {
        if self.accounts.contains_key(id) {
            return Err(LedgerError::DuplicateAccount(id.to_owned()));
        }
        if initial_balance.is_negative() {
            return Err(LedgerError::InvalidAmount(initial_balance));
        }

        self.accounts.insert(id.to_owned(), Account::open(holder_name, initial_balance));
        return Ok(());
    }

    pub fn deposit(&mut self, id: &str, amount: Amount) -> LedgerResult<Amount> {
        let account = self.account_mut(id)?;
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount(amount));
        }

        account.credit(amount);
        return Ok(account.balance());
    }

    pub fn withdraw(&mut self, id: &str, amount: Amount) -> LedgerResult<Amount> {
        let account = self.account_mut(id)?;
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount(amount));
        }
        if amount > account.balance() {
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available: account.balance(),
            });
        }

        account.debit(amount);
        return Ok(account.balance());
    }

    pub fn balance(&self, id: &str) -> LedgerResult<Amount> {
        return Ok(self.account(id)?.balance());
    }

    pub fn history(&self, id: &str) -> LedgerResult<&[TransactionRecord]> {
        return Ok(self.account(id)?.history());
    }

    pub fn accounts(&self) -> impl Iterator<Item = (&str, &Account)> {
        return self.accounts.iter().map(|(id, account)| (id.as_str(), account));
    }

    pub fn len(&self) -> usize {
        return self.accounts.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.accounts.is_empty();
    }

    fn account(&self, id: &str) -> LedgerResult<&Account> {
        return self.accounts.get(id).ok_or_else(|| LedgerError::AccountNotFound(id.to_owned()));
    }

    fn account_mut(&mut self, id: &str) -> LedgerResult<&mut Account> {
        return self
            .accounts
            .get_mut(id)
            .ok_or_else(|| LedgerError::AccountNotFound(id.to_owned()));
    }

    /// Copy of an account's state, taken by the engine before a mutation
    /// so a failed save can be undone. `None` means the id was absent.
    pub(crate) fn snapshot(&self, id: &str) -> Option<Account> {
        return self.accounts.get(id).cloned();
    }

    pub(crate) fn restore(&mut self, id: &str, snapshot: Option<Account>) {
        match snapshot {
            Some(account) => {
                self.accounts.insert(id.to_owned(), account);
            }
            None => {
                self.accounts.remove(id);
            }
        }
    }
}
