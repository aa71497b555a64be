//! SQLite-backed repository for transaction records.
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::Row;

use super::DbConnection;
use crate::domain::models::transaction::{Transaction, TransactionKind};

#[derive(Clone)]
pub struct TransactionRepository {
    db: DbConnection,
}

impl TransactionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a new record.
    pub async fn store(&self, transaction: &Transaction) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions
                (id, owner, kind, title, amount, occurred_on, icon, description, recorded_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&transaction.id)
        .bind(&transaction.owner)
        .bind(transaction.kind.as_str())
        .bind(&transaction.title)
        .bind(transaction.amount.to_string())
        .bind(transaction.occurred_on.format("%Y-%m-%d").to_string())
        .bind(&transaction.icon)
        .bind(&transaction.description)
        .bind(transaction.recorded_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;

        Ok(())
    }

    /// Full history for one owner and kind, in insertion order.
    pub async fn list_by_owner(
        &self,
        owner: &str,
        kind: TransactionKind,
    ) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner, kind, title, amount, occurred_on, icon, description, recorded_at
            FROM transactions
            WHERE owner = ? AND kind = ?
            ORDER BY ROWID ASC
            "#,
        )
        .bind(owner)
        .bind(kind.as_str())
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(row_to_transaction).collect()
    }

    /// Delete one record scoped to its owner and kind. Returns whether a
    /// row matched.
    pub async fn delete(&self, owner: &str, kind: TransactionKind, id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM transactions
            WHERE id = ? AND owner = ? AND kind = ?
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(kind.as_str())
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_transaction(row: &sqlx::sqlite::SqliteRow) -> Result<Transaction> {
    let kind_raw: String = row.get("kind");
    let kind = TransactionKind::parse(&kind_raw)
        .ok_or_else(|| anyhow!("unknown transaction kind in store: {}", kind_raw))?;

    let amount_raw: String = row.get("amount");
    let amount = Decimal::from_str(&amount_raw)?;

    let occurred_raw: String = row.get("occurred_on");
    let occurred_on = NaiveDate::parse_from_str(&occurred_raw, "%Y-%m-%d")?;

    let recorded_raw: String = row.get("recorded_at");
    let recorded_at = DateTime::parse_from_rfc3339(&recorded_raw)?.with_timezone(&Utc);

    Ok(Transaction {
        id: row.get("id"),
        owner: row.get("owner"),
        title: row.get("title"),
        amount,
        occurred_on,
        icon: row.get("icon"),
        description: row.get("description"),
        recorded_at,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    async fn setup_repository() -> TransactionRepository {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        TransactionRepository::new(db)
    }

    fn record(owner: &str, kind: TransactionKind, title: &str, amount: Decimal) -> Transaction {
        Transaction {
            id: Transaction::generate_id(),
            owner: owner.to_string(),
            title: title.to_string(),
            amount,
            occurred_on: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            icon: Some("💰".to_string()),
            description: "test record".to_string(),
            recorded_at: Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap(),
            kind,
        }
    }

    #[tokio::test]
    async fn test_store_and_list_round_trip() {
        let repository = setup_repository().await;
        let transaction = record("user-1", TransactionKind::Income, "Salary", dec!(5000.50));

        repository
            .store(&transaction)
            .await
            .expect("Failed to store transaction");

        let listed = repository
            .list_by_owner("user-1", TransactionKind::Income)
            .await
            .expect("Failed to list transactions");

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], transaction);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let repository = setup_repository().await;

        for title in ["First", "Second", "Third"] {
            repository
                .store(&record("user-1", TransactionKind::Expense, title, dec!(1)))
                .await
                .expect("Failed to store transaction");
        }

        let listed = repository
            .list_by_owner("user-1", TransactionKind::Expense)
            .await
            .expect("Failed to list transactions");

        let titles: Vec<&str> = listed.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn test_list_scopes_by_owner_and_kind() {
        let repository = setup_repository().await;

        repository
            .store(&record("user-1", TransactionKind::Income, "Mine", dec!(10)))
            .await
            .expect("Failed to store transaction");
        repository
            .store(&record("user-1", TransactionKind::Expense, "Mine too", dec!(5)))
            .await
            .expect("Failed to store transaction");
        repository
            .store(&record("user-2", TransactionKind::Income, "Someone else's", dec!(99)))
            .await
            .expect("Failed to store transaction");

        let incomes = repository
            .list_by_owner("user-1", TransactionKind::Income)
            .await
            .expect("Failed to list transactions");
        assert_eq!(incomes.len(), 1);
        assert_eq!(incomes[0].title, "Mine");

        let expenses = repository
            .list_by_owner("user-1", TransactionKind::Expense)
            .await
            .expect("Failed to list transactions");
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].title, "Mine too");
    }

    #[tokio::test]
    async fn test_delete_scoping() {
        let repository = setup_repository().await;
        let transaction = record("user-1", TransactionKind::Income, "Salary", dec!(100));

        repository
            .store(&transaction)
            .await
            .expect("Failed to store transaction");

        // Wrong owner, then wrong kind: neither may match
        let deleted = repository
            .delete("user-2", TransactionKind::Income, &transaction.id)
            .await
            .expect("Delete query failed");
        assert!(!deleted);

        let deleted = repository
            .delete("user-1", TransactionKind::Expense, &transaction.id)
            .await
            .expect("Delete query failed");
        assert!(!deleted);

        let deleted = repository
            .delete("user-1", TransactionKind::Income, &transaction.id)
            .await
            .expect("Delete query failed");
        assert!(deleted);

        let listed = repository
            .list_by_owner("user-1", TransactionKind::Income)
            .await
            .expect("Failed to list transactions");
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_amount_precision_survives_storage() {
        let repository = setup_repository().await;

        // Values that are not exactly representable as binary floats
        for (i, raw) in ["0.1", "0.2", "1234567.89", "0.001"].iter().enumerate() {
            let mut transaction = record(
                "user-1",
                TransactionKind::Expense,
                &format!("Precise {}", i),
                Decimal::from_str(raw).unwrap(),
            );
            transaction.id = Transaction::generate_id();
            repository
                .store(&transaction)
                .await
                .expect("Failed to store transaction");
        }

        let listed = repository
            .list_by_owner("user-1", TransactionKind::Expense)
            .await
            .expect("Failed to list transactions");

        let amounts: Vec<String> = listed.iter().map(|t| t.amount.to_string()).collect();
        assert_eq!(amounts, vec!["0.1", "0.2", "1234567.89", "0.001"]);
    }
}
