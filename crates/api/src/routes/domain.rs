use axum::routing::get;
use axum::Router;

use crate::handlers::domain;
use crate::state::AppState;

/// Routes mounted at `/domains`.
pub fn router() -> Router<AppState> {
    Router::new().route("/unattached", get(domain::list_unattached))
}
