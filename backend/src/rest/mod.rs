//! # REST API Interface Layer
//!
//! HTTP endpoints for the finance tracker. This layer handles request and
//! response serialization, bearer-token resolution, and the translation of
//! domain errors into HTTP status codes. No business logic lives here.

pub mod auth_apis;
pub mod dashboard_apis;
pub mod mappers;
pub mod transaction_apis;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use tracing::error;

use shared::MessageResponse;

use crate::domain::errors::DomainError;
use crate::domain::models::user::User;
use crate::AppState;

/// Translate a domain error into an HTTP response. Internal failures are
/// logged in full and surfaced as a generic message.
pub(crate) fn error_response(err: DomainError) -> Response {
    let (status, message) = match err {
        DomainError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
        DomainError::NotFound(what) => {
            (StatusCode::NOT_FOUND, format!("{} not found", what))
        }
        DomainError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        DomainError::Internal(e) => {
            error!("Internal error: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong".to_string(),
            )
        }
    };

    (status, Json(MessageResponse { message })).into_response()
}

/// Resolve the `Authorization: Bearer <token>` header to a user, or
/// produce the 401 response to return as-is.
pub(crate) async fn require_user(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<User, Response> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match token {
        Some(token) => state
            .auth_service
            .authenticate(token)
            .await
            .map_err(error_response),
        None => Err((
            StatusCode::UNAUTHORIZED,
            Json(MessageResponse {
                message: "missing bearer token".to_string(),
            }),
        )
            .into_response()),
    }
}
