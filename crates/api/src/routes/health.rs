//! Liveness endpoint, mounted at the root rather than under `/api/v1`.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
///
/// `status` is `"ok"` only when both dependencies an import needs are
/// usable: Postgres for the catalog and the staging directory for uploads.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub staging_ready: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let db_healthy = stackdesk_db::health_check(&state.pool).await.is_ok();
    let staging_ready = match state.uploads.ensure_root().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Staging directory unavailable");
            false
        }
    };

    Json(HealthReport {
        status: if db_healthy && staging_ready { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        staging_ready,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
