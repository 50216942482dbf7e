//! Handlers for the `/environments` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use stackdesk_core::types::DbId;
use stackdesk_db::models::environment::{CreateEnvironment, Environment};
use stackdesk_db::repositories::EnvironmentRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

use super::require_environment;

/// POST /api/v1/environments
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateEnvironment>,
) -> AppResult<(StatusCode, Json<DataResponse<Environment>>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("Environment name must not be empty".into()));
    }
    let environment = EnvironmentRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: environment })))
}

/// GET /api/v1/environments
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Environment>>>> {
    let environments = EnvironmentRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: environments }))
}

/// GET /api/v1/environments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Environment>>> {
    let environment = require_environment(&state, id).await?;
    Ok(Json(DataResponse { data: environment }))
}
