//! CSV export for a user's income or expense history.
//!
//! The engine produces flat rows; this service only serializes them and
//! names the attachment. Rows are emitted chronologically by attribution
//! date so the file reads like a statement.
use chrono::NaiveDate;
use tracing::info;

use crate::domain::errors::DomainError;
use crate::domain::models::transaction::{Transaction, TransactionKind};
use crate::domain::reporting;

/// A generated CSV attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    pub fn export_csv(
        &self,
        kind: TransactionKind,
        records: &[Transaction],
        today: NaiveDate,
    ) -> Result<CsvExport, DomainError> {
        let mut records = records.to_vec();
        records.sort_by(|a, b| a.occurred_on.cmp(&b.occurred_on));

        let rows = reporting::export_rows(&records);

        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in &rows {
            writer.serialize(row).map_err(anyhow::Error::from)?;
        }
        let bytes = writer.into_inner().map_err(anyhow::Error::from)?;

        let filename = format!("{}_{}.csv", kind.as_str(), today.format("%Y%m%d"));
        info!("Generated {} with {} rows", filename, rows.len());

        Ok(CsvExport { filename, bytes })
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}
