use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::amount::Amount;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum TransactionKind {
    InitialDeposit,
    Deposit,
    Withdrawal,
}

/// One immutable entry in an account's history. Persisted as a structured
/// `{kind, amount, timestamp}` object; documents written by older versions
/// of the tool hold pre-rendered label strings instead, and those still
/// deserialize (with no timestamp).
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct TransactionRecord {
    kind: TransactionKind,
    amount: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<DateTime<Utc>>,
}

const LEGACY_LABELS: [(&str, TransactionKind); 3] = [
    ("Initial deposit: ", TransactionKind::InitialDeposit),
    ("Deposited: ", TransactionKind::Deposit),
    ("Withdrew: ", TransactionKind::Withdrawal),
];

impl TransactionRecord {
    pub fn new(kind: TransactionKind, amount: Amount) -> TransactionRecord {
        TransactionRecord { kind, amount, timestamp: Some(Utc::now()) }
    }

    pub fn kind(&self) -> TransactionKind {
        return self.kind;
    }

    pub fn amount(&self) -> Amount {
        return self.amount;
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        return self.timestamp;
    }

    fn parse_legacy(text: &str) -> Option<TransactionRecord> {
        for (label, kind) in LEGACY_LABELS {
            if let Some(rest) = text.strip_prefix(label) {
                let amount = rest.strip_prefix('$').unwrap_or(rest).parse().ok()?;
                return Some(TransactionRecord { kind, amount, timestamp: None });
            }
        }
        return None;
    }
}

impl std::fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.kind {
            TransactionKind::InitialDeposit => "Initial deposit",
            TransactionKind::Deposit => "Deposited",
            TransactionKind::Withdrawal => "Withdrew",
        };
        write!(f, "{}: {}", label, self.amount)
    }
}

impl<'de> Deserialize<'de> for TransactionRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Structured {
                kind: TransactionKind,
                amount: Amount,
                #[serde(default)]
                timestamp: Option<DateTime<Utc>>,
            },
            Legacy(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Structured { kind, amount, timestamp } => {
                Ok(TransactionRecord { kind, amount, timestamp })
            }
            Repr::Legacy(text) => TransactionRecord::parse_legacy(&text).ok_or_else(|| {
                serde::de::Error::custom(format!("unrecognised transaction label: {:?}", text))
            }),
        }
    }
}
