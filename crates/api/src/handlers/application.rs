//! Handlers for applications.

use axum::extract::{Path, State};
use axum::Json;
use stackdesk_core::error::CoreError;
use stackdesk_core::types::DbId;
use stackdesk_db::models::application::ApplicationWithDomains;
use stackdesk_db::repositories::ApplicationRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

use super::require_environment;

/// GET /api/v1/environments/{id}/applications
pub async fn list_by_environment(
    State(state): State<AppState>,
    Path(environment_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ApplicationWithDomains>>>> {
    require_environment(&state, environment_id).await?;
    let applications = ApplicationRepo::list_by_environment(&state.pool, environment_id).await?;
    Ok(Json(DataResponse { data: applications }))
}

/// GET /api/v1/applications/{id}
///
/// Target of the links in an import report.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ApplicationWithDomains>>> {
    let application = ApplicationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Application",
            id,
        }))?;
    let domain_ids = ApplicationRepo::domain_ids(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: ApplicationWithDomains {
            application,
            domain_ids,
        },
    }))
}
