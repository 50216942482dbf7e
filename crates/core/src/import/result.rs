//! Batch outcome and the report shown to the operator.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

use super::row::{ApplicationImportRow, RowOutcome};

/// Every row of one batch keyed by its 1-based row number, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationImportResult {
    rows: BTreeMap<usize, ApplicationImportRow>,
}

impl ApplicationImportResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a processed row under its row number.
    pub(crate) fn insert(&mut self, row: ApplicationImportRow) {
        self.rows.insert(row.row_number, row);
    }

    pub fn get(&self, row_number: usize) -> Option<&ApplicationImportRow> {
        self.rows.get(&row_number)
    }

    /// Rows in file order.
    pub fn rows(&self) -> impl Iterator<Item = &ApplicationImportRow> {
        self.rows.values()
    }

    pub fn row_numbers(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.keys().copied()
    }

    pub fn failed_rows(&self) -> impl Iterator<Item = &ApplicationImportRow> {
        self.rows().filter(|row| row.is_failure())
    }

    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn succeeded(&self) -> usize {
        self.rows().filter(|row| row.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.failed_rows().count()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Build the operator-facing summary.
    pub fn report(&self) -> ImportReport {
        ImportReport {
            total: self.total(),
            succeeded: self.succeeded(),
            failed: self.failed(),
            rows: self.rows().map(RowReport::from).collect(),
        }
    }

    /// CSV holding `headers` (when non-empty) followed by the raw cells of
    /// every failed row, so the operator can fix and re-upload only those.
    ///
    /// Returns `None` when no row failed.
    pub fn retry_csv(&self, headers: &[String]) -> Result<Option<String>, CoreError> {
        if self.failed() == 0 {
            return Ok(None);
        }

        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        if headers.iter().any(|h| !h.trim().is_empty()) {
            writer
                .write_record(headers)
                .map_err(|e| CoreError::Internal(format!("Failed to write CSV header: {e}")))?;
        }
        for row in self.failed_rows() {
            writer.write_record(&row.cells).map_err(|e| {
                CoreError::Internal(format!("Failed to write CSV row {}: {e}", row.row_number))
            })?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| CoreError::Internal(format!("Failed to flush CSV: {e}")))?;
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| CoreError::Internal(format!("Retry CSV is not UTF-8: {e}")))
    }
}

/// Report text for a row that never reached the catalog. Only the importer
/// inserts rows, and it resolves each one first.
const UNPROCESSED: &str = "row was not processed";

/// Counts plus one line per row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub rows: Vec<RowReport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Created,
    Failed,
}

/// One report line: the original cells plus either the new application or
/// the error text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowReport {
    pub row_number: usize,
    pub cells: Vec<String>,
    pub status: RowStatus,
    pub application_id: Option<DbId>,
    pub error: Option<String>,
}

impl From<&ApplicationImportRow> for RowReport {
    fn from(row: &ApplicationImportRow) -> Self {
        let (status, application_id, error) = match &row.outcome {
            RowOutcome::Pending => (
                RowStatus::Failed,
                None,
                Some(UNPROCESSED.to_string()),
            ),
            RowOutcome::Created { application } => {
                (RowStatus::Created, Some(application.id), None)
            }
            RowOutcome::Failed { error } => (RowStatus::Failed, None, Some(error.clone())),
        };
        Self {
            row_number: row.row_number,
            cells: row.cells.clone(),
            status,
            application_id,
            error,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
