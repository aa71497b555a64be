//! Transaction service domain logic for the finance tracker.
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::errors::DomainError;
use crate::domain::models::transaction::{Transaction, TransactionKind};
use crate::storage::{DbConnection, TransactionRepository};

/// Input for creating a record, already scoped to its owner.
#[derive(Debug, Clone)]
pub struct AddTransactionCommand {
    pub owner: String,
    pub kind: TransactionKind,
    pub title: String,
    pub amount: Decimal,
    pub occurred_on: NaiveDate,
    pub icon: Option<String>,
    pub description: String,
}

#[derive(Clone)]
pub struct TransactionService {
    repository: TransactionRepository,
}

impl TransactionService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            repository: TransactionRepository::new(db),
        }
    }

    /// Validate and store a new record. The attribution date is taken as
    /// given (past and future dates are both legitimate); the insertion
    /// timestamp is assigned here.
    pub async fn add_transaction(
        &self,
        command: AddTransactionCommand,
    ) -> Result<Transaction, DomainError> {
        if command.title.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "title must not be empty".to_string(),
            ));
        }
        if command.amount <= Decimal::ZERO {
            return Err(DomainError::InvalidInput(
                "amount must be positive".to_string(),
            ));
        }

        let transaction = Transaction {
            id: Transaction::generate_id(),
            owner: command.owner,
            title: command.title,
            amount: command.amount,
            occurred_on: command.occurred_on,
            icon: command.icon,
            description: command.description,
            recorded_at: Utc::now(),
            kind: command.kind,
        };

        self.repository.store(&transaction).await?;
        info!(
            "Stored {} {} for owner {}",
            transaction.kind.as_str(),
            transaction.id,
            transaction.owner
        );

        Ok(transaction)
    }

    /// Full history for one owner and kind, most recently entered first.
    pub async fn list_transactions(
        &self,
        owner: &str,
        kind: TransactionKind,
    ) -> Result<Vec<Transaction>, DomainError> {
        let mut records = self.repository.list_by_owner(owner, kind).await?;
        records.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(records)
    }

    /// Delete one record scoped to its owner. A record belonging to another
    /// user reports not-found, never that it exists.
    pub async fn delete_transaction(
        &self,
        owner: &str,
        kind: TransactionKind,
        id: &str,
    ) -> Result<(), DomainError> {
        let deleted = self.repository.delete(owner, kind, id).await?;
        if !deleted {
            return Err(DomainError::NotFound(kind.as_str()));
        }

        info!("Deleted {} {} for owner {}", kind.as_str(), id, owner);
        Ok(())
    }
}
