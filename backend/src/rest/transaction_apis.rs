//! # REST API for Income and Expense Records
//!
//! Add, list, delete, and CSV-download endpoints, all scoped to the
//! bearer-token user. Income and expense share handlers parameterized by
//! kind; the routes stay separate so the API mirrors the two collections.
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use tracing::info;

use shared::{AddTransactionRequest, AddTransactionResponse, MessageResponse, TransactionDto};

use crate::domain::models::transaction::TransactionKind;
use crate::domain::transaction_service::AddTransactionCommand;
use crate::rest::{error_response, mappers, require_user};
use crate::AppState;

fn kind_label(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "Income",
        TransactionKind::Expense => "Expense",
    }
}

pub async fn add_income(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<AddTransactionRequest>,
) -> Response {
    add_transaction(state, headers, TransactionKind::Income, request).await
}

pub async fn add_expense(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<AddTransactionRequest>,
) -> Response {
    add_transaction(state, headers, TransactionKind::Expense, request).await
}

pub async fn list_income(State(state): State<AppState>, headers: HeaderMap) -> Response {
    list_transactions(state, headers, TransactionKind::Income).await
}

pub async fn list_expense(State(state): State<AppState>, headers: HeaderMap) -> Response {
    list_transactions(state, headers, TransactionKind::Expense).await
}

pub async fn delete_income(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    delete_transaction(state, headers, TransactionKind::Income, id).await
}

pub async fn delete_expense(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    delete_transaction(state, headers, TransactionKind::Expense, id).await
}

pub async fn download_income(State(state): State<AppState>, headers: HeaderMap) -> Response {
    download_transactions(state, headers, TransactionKind::Income).await
}

pub async fn download_expense(State(state): State<AppState>, headers: HeaderMap) -> Response {
    download_transactions(state, headers, TransactionKind::Expense).await
}

async fn add_transaction(
    state: AppState,
    headers: HeaderMap,
    kind: TransactionKind,
    request: AddTransactionRequest,
) -> Response {
    info!("POST /api/{}/add - title: {}", kind.as_str(), request.title);

    let user = match require_user(&state, &headers).await {
        Ok(user) => user,
        Err(response) => return response,
    };

    let command = AddTransactionCommand {
        owner: user.id,
        kind,
        title: request.title,
        amount: request.amount,
        occurred_on: request.date,
        icon: request.icon,
        description: request.description.unwrap_or_default(),
    };

    match state.transaction_service.add_transaction(command).await {
        Ok(transaction) => (
            StatusCode::CREATED,
            Json(AddTransactionResponse {
                message: format!("{} added successfully", kind_label(kind)),
                transaction: mappers::transaction_to_dto(&transaction),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

async fn list_transactions(state: AppState, headers: HeaderMap, kind: TransactionKind) -> Response {
    info!("GET /api/{}", kind.as_str());

    let user = match require_user(&state, &headers).await {
        Ok(user) => user,
        Err(response) => return response,
    };

    match state.transaction_service.list_transactions(&user.id, kind).await {
        Ok(records) => {
            let dtos: Vec<TransactionDto> =
                records.iter().map(mappers::transaction_to_dto).collect();
            (StatusCode::OK, Json(dtos)).into_response()
        }
        Err(e) => error_response(e),
    }
}

async fn delete_transaction(
    state: AppState,
    headers: HeaderMap,
    kind: TransactionKind,
    id: String,
) -> Response {
    info!("DELETE /api/{}/{}", kind.as_str(), id);

    let user = match require_user(&state, &headers).await {
        Ok(user) => user,
        Err(response) => return response,
    };

    match state
        .transaction_service
        .delete_transaction(&user.id, kind, &id)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: format!("{} deleted successfully", kind_label(kind)),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

async fn download_transactions(
    state: AppState,
    headers: HeaderMap,
    kind: TransactionKind,
) -> Response {
    info!("GET /api/{}/download", kind.as_str());

    let user = match require_user(&state, &headers).await {
        Ok(user) => user,
        Err(response) => return response,
    };

    let records = match state.transaction_service.list_transactions(&user.id, kind).await {
        Ok(records) => records,
        Err(e) => return error_response(e),
    };

    match state
        .export_service
        .export_csv(kind, &records, Utc::now().date_naive())
    {
        Ok(export) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename={}", export.filename),
                ),
            ],
            export.bytes,
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
