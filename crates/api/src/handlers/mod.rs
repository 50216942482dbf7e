//! Request handlers.
//!
//! Handlers delegate to the importer in `stackdesk_core` and the
//! repositories in `stackdesk_db`, mapping errors via [`AppError`](crate::error::AppError).

pub mod application;
pub mod domain;
pub mod environment;
pub mod import;

use stackdesk_core::error::CoreError;
use stackdesk_core::types::DbId;
use stackdesk_db::models::environment::Environment;
use stackdesk_db::repositories::EnvironmentRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Load the environment or fail with 404.
pub(crate) async fn require_environment(state: &AppState, id: DbId) -> AppResult<Environment> {
    EnvironmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Environment",
            id,
        }))
}
