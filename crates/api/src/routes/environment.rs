//! Route definitions for environments and the imports scoped to them.
//!
//! Mounted at `/environments`.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{application, environment, import};
use crate::state::AppState;

/// Routes mounted at `/environments`.
///
/// ```text
/// GET    /                                -> list
/// POST   /                                -> create
/// GET    /{id}                            -> get_by_id
/// GET    /{id}/applications               -> list_by_environment
/// POST   /{id}/imports                    -> upload
/// DELETE /{id}/imports/{file_id}          -> discard
/// POST   /{id}/imports/{file_id}/apply    -> apply
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(environment::list).post(environment::create))
        .route("/{id}", get(environment::get_by_id))
        .route("/{id}/applications", get(application::list_by_environment))
        .route("/{id}/imports", post(import::upload))
        .route("/{id}/imports/{file_id}", delete(import::discard))
        .route("/{id}/imports/{file_id}/apply", post(import::apply))
}
