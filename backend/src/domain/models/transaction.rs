//! Domain model for a transaction.
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

/// A single income or expense record.
///
/// `occurred_on` is the user-supplied attribution date and `recorded_at` is
/// the insertion timestamp; the two are independent. A record entered today
/// may be dated in the past or future. Records are created and deleted,
/// never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Owning user; immutable after creation
    pub owner: String,
    pub title: String,
    /// Always positive; the sign is carried by `kind`
    pub amount: Decimal,
    pub occurred_on: NaiveDate,
    pub icon: Option<String>,
    pub description: String,
    /// Insertion timestamp, monotonically ordered per store; recency
    /// ranking only, never period filtering
    pub recorded_at: DateTime<Utc>,
    pub kind: TransactionKind,
}

impl Transaction {
    /// Generate a fresh opaque record ID.
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_str() {
        assert_eq!(TransactionKind::parse("income"), Some(TransactionKind::Income));
        assert_eq!(TransactionKind::parse("expense"), Some(TransactionKind::Expense));
        assert_eq!(TransactionKind::parse(TransactionKind::Income.as_str()), Some(TransactionKind::Income));
        assert_eq!(TransactionKind::parse("transfer"), None);
        assert_eq!(TransactionKind::parse("Income"), None);
    }

    #[test]
    fn test_generate_id_is_unique() {
        let a = Transaction::generate_id();
        let b = Transaction::generate_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36); // canonical hyphenated UUID
    }
}
