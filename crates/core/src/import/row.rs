//! Per-row import records and the row mapper.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

use super::mapping::{ApplicationImportMapping, ImportField};

/// A mapping that cannot be applied to the uploaded rows.
///
/// The mapping form is built from the same file it is applied to, so these
/// are configuration errors that abort the whole batch rather than a row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("row {row} has {width} columns but the mapping reads column {column}")]
    ColumnOutOfRange {
        row: usize,
        column: usize,
        width: usize,
    },
}

impl From<MappingError> for CoreError {
    fn from(err: MappingError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

/// Field values of one row after the mapping has been applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplicationRowData {
    pub client: String,
    pub project: String,
    pub runtime: String,
    pub pool: String,
    pub domains: String,
    pub framework: String,
    pub database: String,
    pub database_name: String,
    pub database_user: String,
    pub doc_root: String,
    pub repository: String,
    pub branch: String,
}

impl ApplicationRowData {
    pub fn get(&self, field: ImportField) -> &str {
        match field {
            ImportField::Client => &self.client,
            ImportField::Project => &self.project,
            ImportField::Runtime => &self.runtime,
            ImportField::Pool => &self.pool,
            ImportField::Domains => &self.domains,
            ImportField::Framework => &self.framework,
            ImportField::Database => &self.database,
            ImportField::DatabaseName => &self.database_name,
            ImportField::DatabaseUser => &self.database_user,
            ImportField::DocRoot => &self.doc_root,
            ImportField::Repository => &self.repository,
            ImportField::Branch => &self.branch,
        }
    }

    fn slot(&mut self, field: ImportField) -> &mut String {
        match field {
            ImportField::Client => &mut self.client,
            ImportField::Project => &mut self.project,
            ImportField::Runtime => &mut self.runtime,
            ImportField::Pool => &mut self.pool,
            ImportField::Domains => &mut self.domains,
            ImportField::Framework => &mut self.framework,
            ImportField::Database => &mut self.database,
            ImportField::DatabaseName => &mut self.database_name,
            ImportField::DatabaseUser => &mut self.database_user,
            ImportField::DocRoot => &mut self.doc_root,
            ImportField::Repository => &mut self.repository,
            ImportField::Branch => &mut self.branch,
        }
    }
}

/// The application a successful row produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportedApplication {
    pub id: DbId,
    pub client_id: DbId,
    pub project_id: DbId,
    pub environment_id: DbId,
    pub database_id: DbId,
    pub runtime_id: DbId,
    pub pool_id: DbId,
    pub framework_id: DbId,
    /// Attached domains in the order the row listed them.
    pub domain_ids: Vec<DbId>,
}

/// Where a row stands in the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowOutcome {
    /// Mapped but not yet resolved.
    #[default]
    Pending,
    Created {
        application: ImportedApplication,
    },
    Failed {
        error: String,
    },
}

/// One spreadsheet row moving through the import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationImportRow {
    /// 1-based position among the data rows (header excluded).
    pub row_number: usize,
    /// The raw cells as uploaded, kept for the correction report.
    pub cells: Vec<String>,
    pub data: ApplicationRowData,
    pub outcome: RowOutcome,
}

impl ApplicationImportRow {
    pub fn application(&self) -> Option<&ImportedApplication> {
        match &self.outcome {
            RowOutcome::Created { application } => Some(application),
            _ => None,
        }
    }

    /// The failure text, or `""` if the row has not failed.
    pub fn error_message(&self) -> &str {
        match &self.outcome {
            RowOutcome::Failed { error } => error,
            _ => "",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, RowOutcome::Created { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, RowOutcome::Failed { .. })
    }

    pub(crate) fn fail(&mut self, error: impl Into<String>) {
        self.outcome = RowOutcome::Failed {
            error: error.into(),
        };
    }

    pub(crate) fn succeed(&mut self, application: ImportedApplication) {
        self.outcome = RowOutcome::Created { application };
    }
}

/// Apply `mapping` to one raw row.
///
/// Column rules copy the cell at their index, literal rules copy their value.
/// The result is always fully populated and [`RowOutcome::Pending`].
pub fn map_row(
    mapping: &ApplicationImportMapping,
    row_number: usize,
    cells: &[String],
) -> Result<ApplicationImportRow, MappingError> {
    let mut data = ApplicationRowData::default();

    for (field, rule) in mapping.rules() {
        let value = rule.apply(cells).ok_or(MappingError::ColumnOutOfRange {
            row: row_number,
            column: rule.column().unwrap_or_default(),
            width: cells.len(),
        })?;
        *data.slot(field) = value.to_string();
    }

    Ok(ApplicationImportRow {
        row_number,
        cells: cells.to_vec(),
        data,
        outcome: RowOutcome::Pending,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
