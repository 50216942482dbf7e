//! Named catalog entities: clients, projects, runtimes, pools, frameworks
//! and databases.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stackdesk_core::types::{DbId, Timestamp};

/// Which named catalog table an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Client,
    Project,
    Runtime,
    Pool,
    Framework,
    Database,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 6] = [
        Self::Client,
        Self::Project,
        Self::Runtime,
        Self::Pool,
        Self::Framework,
        Self::Database,
    ];

    /// Backing table name. Only ever interpolated from this closed set.
    pub fn table(self) -> &'static str {
        match self {
            Self::Client => "clients",
            Self::Project => "projects",
            Self::Runtime => "runtimes",
            Self::Pool => "pools",
            Self::Framework => "frameworks",
            Self::Database => "databases",
        }
    }
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}

/// A row from any of the named catalog tables.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CatalogEntry {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
