//! # REST API for the Dashboard and Reports
//!
//! Summary, period report, and income-source breakdown endpoints. All
//! aggregation happens in the domain reporting engine; these handlers only
//! shuttle results into DTOs.
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use shared::{
    DashboardResponse, IncomeSliceDto, IncomeSourcesResponse, PeriodReportResponse,
    SeriesPointDto,
};

use crate::rest::{error_response, mappers, require_user};
use crate::AppState;

/// Query parameters for the period report endpoint. Month is 1-12.
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub year: i32,
    pub month: Option<u32>,
}

/// All-time totals plus the most recently entered transactions.
pub async fn get_dashboard(State(state): State<AppState>, headers: HeaderMap) -> Response {
    info!("GET /api/dashboard");

    let user = match require_user(&state, &headers).await {
        Ok(user) => user,
        Err(response) => return response,
    };

    match state.dashboard_service.summary(&user.id).await {
        Ok(summary) => (
            StatusCode::OK,
            Json(DashboardResponse {
                total_income: summary.totals.total_income,
                total_expense: summary.totals.total_expense,
                balance: summary.totals.balance,
                recent_transactions: summary
                    .recent_transactions
                    .iter()
                    .map(mappers::transaction_to_dto)
                    .collect(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Totals, matching transactions, and a daily series for one period.
pub async fn get_period_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PeriodQuery>,
) -> Response {
    info!(
        "GET /api/reports/period - year: {}, month: {:?}",
        query.year, query.month
    );

    let user = match require_user(&state, &headers).await {
        Ok(user) => user,
        Err(response) => return response,
    };

    match state
        .dashboard_service
        .period_report(&user.id, query.year, query.month)
        .await
    {
        Ok(report) => (
            StatusCode::OK,
            Json(PeriodReportResponse {
                year: report.year,
                month: report.month,
                total_income: report.totals.total_income,
                total_expense: report.totals.total_expense,
                balance: report.totals.balance,
                transactions: report
                    .transactions
                    .iter()
                    .map(mappers::transaction_to_dto)
                    .collect(),
                series: report
                    .series
                    .iter()
                    .map(|bucket| SeriesPointDto {
                        date: bucket.date,
                        label: bucket.label.clone(),
                        income: bucket.income,
                        expense: bucket.expense,
                    })
                    .collect(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Income entries attributed to the last 60 days, one slice per record.
pub async fn get_income_sources(State(state): State<AppState>, headers: HeaderMap) -> Response {
    info!("GET /api/reports/income-sources");

    let user = match require_user(&state, &headers).await {
        Ok(user) => user,
        Err(response) => return response,
    };

    match state
        .dashboard_service
        .income_sources(&user.id, Utc::now().date_naive())
        .await
    {
        Ok(breakdown) => (
            StatusCode::OK,
            Json(IncomeSourcesResponse {
                window_days: breakdown.window_days,
                total: breakdown.total,
                sources: breakdown
                    .sources
                    .iter()
                    .map(|t| IncomeSliceDto {
                        title: t.title.clone(),
                        amount: t.amount,
                        icon: t.icon.clone(),
                    })
                    .collect(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initialize_test_state;
    use axum::http::header;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use shared::AddTransactionRequest;

    async fn setup_authed() -> (AppState, HeaderMap) {
        let state = initialize_test_state().await;
        let (_user, session) = state
            .auth_service
            .signup("Ada", "ada@example.com", "correct horse battery")
            .await
            .expect("Failed to sign up test user");

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            format!("Bearer {}", session.token).parse().unwrap(),
        );
        (state, headers)
    }

    async fn seed_income(state: &AppState, headers: &HeaderMap, title: &str) {
        let request = AddTransactionRequest {
            title: title.to_string(),
            amount: dec!(100),
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            icon: None,
            description: None,
        };
        let response = crate::rest::transaction_apis::add_income(
            State(state.clone()),
            headers.clone(),
            Json(request),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_dashboard_requires_token() {
        let (state, _headers) = setup_authed().await;

        let response = get_dashboard(State(state), HeaderMap::new()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_dashboard_returns_summary() {
        let (state, headers) = setup_authed().await;
        seed_income(&state, &headers, "Salary").await;

        let response = get_dashboard(State(state), headers).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_period_report_rejects_bad_month() {
        let (state, headers) = setup_authed().await;

        let query = PeriodQuery {
            year: 2024,
            month: Some(13),
        };
        let response = get_period_report(State(state), headers, Query(query)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_period_report_ok() {
        let (state, headers) = setup_authed().await;
        seed_income(&state, &headers, "Salary").await;

        let query = PeriodQuery {
            year: 2024,
            month: Some(1),
        };
        let response = get_period_report(State(state), headers, Query(query)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_income_sources_ok() {
        let (state, headers) = setup_authed().await;
        seed_income(&state, &headers, "Salary").await;

        let response = get_income_sources(State(state), headers).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
