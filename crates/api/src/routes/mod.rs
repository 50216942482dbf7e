pub mod application;
pub mod domain;
pub mod environment;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /environments                                   list, create
/// /environments/{id}                              get
/// /environments/{id}/applications                 list applications
/// /environments/{id}/imports                      upload CSV (multipart)
/// /environments/{id}/imports/{file_id}            discard upload (DELETE)
/// /environments/{id}/imports/{file_id}/apply      apply mapping (POST)
///
/// /applications/{id}                              get with domains
///
/// /domains/unattached                             free domains
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/environments", environment::router())
        .nest("/applications", application::router())
        .nest("/domains", domain::router())
}
