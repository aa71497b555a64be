use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of transaction, carried explicitly on every record that crosses the
/// API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// A single income or expense record as served by the API.
///
/// Amounts are exact decimals and serialize as JSON strings (e.g. "5000.50")
/// so no precision is lost in transit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDto {
    pub id: String,
    /// Non-empty display label
    pub title: String,
    /// Positive decimal amount, currency-agnostic
    pub amount: Decimal,
    /// Calendar date the transaction is attributed to (YYYY-MM-DD),
    /// user-supplied and independent of when it was entered
    pub date: NaiveDate,
    /// Opaque display token (glyph or image key)
    pub icon: Option<String>,
    #[serde(default)]
    pub description: String,
    pub kind: TransactionKind,
    /// RFC 3339 insertion timestamp; used only for "recent" ranking
    pub recorded_at: String,
}

/// Request to create a new income or expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddTransactionRequest {
    pub title: String,
    pub amount: Decimal,
    /// Attribution date (YYYY-MM-DD); may be in the past or future
    pub date: NaiveDate,
    pub icon: Option<String>,
    pub description: Option<String>,
}

/// Response after creating a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddTransactionResponse {
    pub message: String,
    pub transaction: TransactionDto,
}

/// Generic message envelope, used for deletes and error bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Request for creating a new account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request for logging in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The authenticated user, without credential material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// Response after signup or login: a bearer token plus the user it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserDto,
}

/// Response for GET /api/auth/me.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeResponse {
    pub user: UserDto,
}

/// All-time totals plus the most recently entered transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub recent_transactions: Vec<TransactionDto>,
}

/// One day's worth of aggregated activity in a report chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPointDto {
    pub date: NaiveDate,
    /// Short display key, e.g. "15 Jan"
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Report over a calendar year, optionally narrowed to one month (1-12).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodReportResponse {
    pub year: i32,
    pub month: Option<u32>,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    /// Matching transactions, most recently entered first
    pub transactions: Vec<TransactionDto>,
    /// Daily buckets in ascending chronological order
    pub series: Vec<SeriesPointDto>,
}

/// One slice of the income-source breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeSliceDto {
    pub title: String,
    pub amount: Decimal,
    pub icon: Option<String>,
}

/// Income breakdown over a rolling window of recent days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeSourcesResponse {
    pub window_days: u32,
    pub total: Decimal,
    pub sources: Vec<IncomeSliceDto>,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TransactionKind::Income).unwrap(), "\"income\"");
        assert_eq!(serde_json::to_string(&TransactionKind::Expense).unwrap(), "\"expense\"");

        let parsed: TransactionKind = serde_json::from_str("\"expense\"").unwrap();
        assert_eq!(parsed, TransactionKind::Expense);
    }

    #[test]
    fn test_transaction_dto_round_trip() {
        let dto = TransactionDto {
            id: "d3b07384-d9a0-4c9b-8f3a-9c1e2f4a5b6c".to_string(),
            title: "Salary".to_string(),
            amount: Decimal::from_str("5000.50").unwrap(),
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            icon: Some("💰".to_string()),
            description: String::new(),
            kind: TransactionKind::Income,
            recorded_at: "2024-01-10T09:30:00+00:00".to_string(),
        };

        let json = serde_json::to_string(&dto).unwrap();
        // Amounts travel as strings so decimal precision survives the wire
        assert!(json.contains("\"5000.50\""));
        assert!(json.contains("\"2024-01-10\""));

        let back: TransactionDto = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dto);
    }

    #[test]
    fn test_add_request_description_defaults_empty() {
        let json = r#"{"title":"Rent","amount":"1200","date":"2024-01-15","icon":null,"description":null}"#;
        let request: AddTransactionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.title, "Rent");
        assert_eq!(request.description, None);
        assert_eq!(request.amount, Decimal::from_str("1200").unwrap());
    }

    #[test]
    fn test_kind_as_str() {
        assert_eq!(TransactionKind::Income.as_str(), "income");
        assert_eq!(TransactionKind::Expense.as_str(), "expense");
    }
}
