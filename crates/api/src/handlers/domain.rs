//! Handlers for the `/domains` resource.

use axum::extract::State;
use axum::Json;
use stackdesk_core::import::FreeDomain;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/domains/unattached
///
/// Domains not attached to any application, for the single-application form.
pub async fn list_unattached(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<FreeDomain>>>> {
    let domains = state.catalog.domains.list_unattached().await?;
    Ok(Json(DataResponse { data: domains }))
}
