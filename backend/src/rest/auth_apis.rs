//! # REST API for Authentication
//!
//! Signup, login, and current-user endpoints.
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use tracing::info;

use shared::{AuthResponse, LoginRequest, MeResponse, SignupRequest};

use crate::rest::{error_response, mappers, require_user};
use crate::AppState;

/// Create a new account and open a session for it.
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Response {
    info!("POST /api/auth/signup - email: {}", request.email);

    match state
        .auth_service
        .signup(&request.name, &request.email, &request.password)
        .await
    {
        Ok((user, session)) => (
            StatusCode::CREATED,
            Json(AuthResponse {
                token: session.token,
                user: mappers::user_to_dto(&user),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Exchange credentials for a session token.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Response {
    info!("POST /api/auth/login - email: {}", request.email);

    match state.auth_service.login(&request.email, &request.password).await {
        Ok((user, session)) => (
            StatusCode::OK,
            Json(AuthResponse {
                token: session.token,
                user: mappers::user_to_dto(&user),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Return the user attached to the bearer token.
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> Response {
    info!("GET /api/auth/me");

    let user = match require_user(&state, &headers).await {
        Ok(user) => user,
        Err(response) => return response,
    };

    (
        StatusCode::OK,
        Json(MeResponse {
            user: mappers::user_to_dto(&user),
        }),
    )
        .into_response()
}
