use serde::{Deserialize, Serialize};

use crate::core::amount::Amount;
use crate::core::transaction::{TransactionKind, TransactionRecord};

/// Identifier chosen by the caller at account creation, e.g. an account
/// number. It doubles as the key in the persisted document, so it is not
/// repeated as a field here.
pub type AccountId = String;

/// One ledger entry: a named balance plus its append-only history.
/// Mutation happens only through the crate's ledger operations; callers
/// outside the crate get shared references and copies.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "name")]
    holder_name: String,
    balance: Amount,
    #[serde(rename = "transactions")]
    history: Vec<TransactionRecord>,
}

impl Account {
    pub(crate) fn open(holder_name: &str, initial_balance: Amount) -> Account {
        let opening_record =
            TransactionRecord::new(TransactionKind::InitialDeposit, initial_balance);
        return Account {
            holder_name: holder_name.to_owned(),
            balance: initial_balance,
            history: vec![opening_record],
        };
    }

    pub fn holder_name(&self) -> &str {
        return &self.holder_name;
    }

    pub fn balance(&self) -> Amount {
        return self.balance;
    }

    pub fn history(&self) -> &[TransactionRecord] {
        return &self.history;
    }

    pub(crate) fn credit(&mut self, amount: Amount) {
        self.balance += amount;
        self.history.push(TransactionRecord::new(TransactionKind::Deposit, amount));
    }

    pub(crate) fn debit(&mut self, amount: Amount) {
        self.balance -= amount;
        self.history.push(TransactionRecord::new(TransactionKind::Withdrawal, amount));
    }
}
