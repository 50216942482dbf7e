//! Application model.
//!
//! Inserts go through [`NewApplication`](stackdesk_core::import::NewApplication),
//! shared with the importer.

use serde::Serialize;
use sqlx::FromRow;
use stackdesk_core::types::{DbId, Timestamp};

/// A row from the `applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Application {
    pub id: DbId,
    pub client_id: DbId,
    pub project_id: DbId,
    pub environment_id: DbId,
    pub database_id: DbId,
    pub runtime_id: DbId,
    pub pool_id: DbId,
    pub framework_id: DbId,
    pub repository: Option<String>,
    pub branch: Option<String>,
    pub db_name: Option<String>,
    pub db_user: Option<String>,
    pub doc_root: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An application with its attached domain ids in display order.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationWithDomains {
    #[serde(flatten)]
    pub application: Application,
    pub domain_ids: Vec<DbId>,
}
