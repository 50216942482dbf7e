//! Handlers for bulk CSV application import.
//!
//! An import is two requests: the upload stages the file and returns what
//! the mapping form needs (header candidates, width, a preview); applying a
//! mapping then runs the whole batch and reports per-row outcomes.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use stackdesk_core::import::{
    has_header_labels, ApplicationImportMapping, ApplicationImporter, ImportReport,
};
use stackdesk_core::tabular::{parse_csv, FileId, TableSummary, TabularStore};
use stackdesk_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

use super::require_environment;

/// Multipart field carrying the CSV file.
const FILE_FIELD: &str = "file";

/// Response for a staged upload.
#[derive(Debug, Serialize)]
pub struct UploadResult {
    pub file_id: FileId,
    #[serde(flatten)]
    pub summary: TableSummary,
}

/// Request body for applying a mapping to a staged upload.
#[derive(Debug, Deserialize)]
pub struct ApplyMappingRequest {
    pub mapping: ApplicationImportMapping,
    /// Column labels as shown in the form. Any non-blank label means the
    /// first row of the file is a header and is not imported.
    #[serde(default)]
    pub headers: Vec<String>,
}

/// Outcome of one applied batch.
#[derive(Debug, Serialize)]
pub struct ApplyResult {
    pub environment_id: DbId,
    #[serde(flatten)]
    pub report: ImportReport,
    /// Failed rows as CSV for correction and re-upload, when any failed.
    pub retry_csv: Option<String>,
}

// ── Upload ───────────────────────────────────────────────────────────

/// POST /api/v1/environments/{id}/imports
///
/// Stage the multipart `file` field and summarise it for the mapping form.
pub async fn upload(
    State(state): State<AppState>,
    Path(environment_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<UploadResult>>)> {
    require_environment(&state, environment_id).await?;

    let mut bytes = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        bytes = Some(
            field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?,
        );
        break;
    }

    let bytes = bytes.ok_or_else(|| {
        AppError::BadRequest(format!("Missing '{FILE_FIELD}' field in multipart upload"))
    })?;

    let rows = parse_csv(&bytes)?;
    let summary = TableSummary::from_rows(&rows);
    if summary.is_blank() {
        return Err(AppError::BadRequest("Uploaded file contains no rows".into()));
    }

    let file_id = state.uploads.for_environment(environment_id).save(&bytes).await?;

    tracing::info!(
        environment_id,
        %file_id,
        rows = summary.row_count,
        columns = summary.column_count,
        "Import file uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UploadResult { file_id, summary },
        }),
    ))
}

// ── Apply ────────────────────────────────────────────────────────────

/// POST /api/v1/environments/{id}/imports/{file_id}/apply
///
/// Run the staged file through the importer with the submitted mapping.
/// Only files uploaded to the same environment are found. The staged file is discarded once the batch has been processed; a
/// rejected mapping leaves it in place so the form can be resubmitted.
pub async fn apply(
    State(state): State<AppState>,
    Path((environment_id, file_id)): Path<(DbId, String)>,
    Json(input): Json<ApplyMappingRequest>,
) -> AppResult<Json<DataResponse<ApplyResult>>> {
    let file_id = FileId::parse(&file_id)?;
    require_environment(&state, environment_id).await?;

    let store = state.uploads.for_environment(environment_id);
    let rows = store.read(file_id).await?;
    let has_header = has_header_labels(&input.headers);

    let importer = ApplicationImporter::new(state.catalog.clone());
    let result = importer
        .import_rows(environment_id, &rows, &input.mapping, has_header)
        .await?;

    if let Err(e) = store.delete(file_id).await {
        tracing::warn!(%file_id, error = %e, "Failed to discard staged import file");
    }

    let retry_csv = result.retry_csv(&input.headers)?;

    Ok(Json(DataResponse {
        data: ApplyResult {
            environment_id,
            report: result.report(),
            retry_csv,
        },
    }))
}

// ── Discard ──────────────────────────────────────────────────────────

/// DELETE /api/v1/environments/{id}/imports/{file_id}
pub async fn discard(
    State(state): State<AppState>,
    Path((environment_id, file_id)): Path<(DbId, String)>,
) -> AppResult<StatusCode> {
    let file_id = FileId::parse(&file_id)?;
    require_environment(&state, environment_id).await?;
    state
        .uploads
        .for_environment(environment_id)
        .delete(file_id)
        .await?;
    tracing::info!(environment_id, %file_id, "Import file discarded");
    Ok(StatusCode::NO_CONTENT)
}
