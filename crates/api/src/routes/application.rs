use axum::routing::get;
use axum::Router;

use crate::handlers::application;
use crate::state::AppState;

/// Routes mounted at `/applications`.
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(application::get_by_id))
}
