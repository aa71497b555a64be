//! # Domain Layer
//!
//! Business logic for the finance tracker. The reporting module is the
//! aggregation engine every summary flows through; the services around it
//! orchestrate storage, validation, and credentials.

pub mod auth_service;
pub mod dashboard_service;
pub mod errors;
pub mod export_service;
pub mod models;
pub mod reporting;
pub mod transaction_service;

pub use auth_service::AuthService;
pub use dashboard_service::DashboardService;
pub use errors::DomainError;
pub use export_service::ExportService;
pub use transaction_service::TransactionService;
