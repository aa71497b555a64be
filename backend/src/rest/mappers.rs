//! Mappers from domain models to the shared API DTOs.
use shared::{TransactionDto, TransactionKind as DtoKind, UserDto};

use crate::domain::models::transaction::{Transaction, TransactionKind};
use crate::domain::models::user::User;

pub fn transaction_to_dto(transaction: &Transaction) -> TransactionDto {
    TransactionDto {
        id: transaction.id.clone(),
        title: transaction.title.clone(),
        amount: transaction.amount,
        date: transaction.occurred_on,
        icon: transaction.icon.clone(),
        description: transaction.description.clone(),
        kind: kind_to_dto(transaction.kind),
        recorded_at: transaction.recorded_at.to_rfc3339(),
    }
}

pub fn kind_to_dto(kind: TransactionKind) -> DtoKind {
    match kind {
        TransactionKind::Income => DtoKind::Income,
        TransactionKind::Expense => DtoKind::Expense,
    }
}

pub fn user_to_dto(user: &User) -> UserDto {
    UserDto {
        id: user.id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        created_at: user.created_at.to_rfc3339(),
    }
}
