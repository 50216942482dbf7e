use std::sync::Arc;

use stackdesk_core::import::ImportCatalog;

use crate::config::ServerConfig;
use crate::staging::UploadStaging;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: stackdesk_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Collaborators the importer resolves rows through.
    pub catalog: ImportCatalog,
    /// Staging area for uploaded CSV files, one directory per environment.
    pub uploads: UploadStaging,
}
