//! Repository for the named catalog tables (see [`CatalogKind`]).

use sqlx::PgPool;
use stackdesk_core::types::DbId;

use crate::models::catalog::{CatalogEntry, CatalogKind};

/// Column list shared across queries.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Resolve-or-create and lookups for clients, projects, runtimes, pools,
/// frameworks and databases.
pub struct CatalogRepo;

impl CatalogRepo {
    /// Return the id of the entry called `name`, inserting it if absent.
    ///
    /// A single `ON CONFLICT` upsert, so two importers racing on the same
    /// name both end up with the one row.
    pub async fn resolve_or_create(
        pool: &PgPool,
        kind: CatalogKind,
        name: &str,
    ) -> Result<DbId, sqlx::Error> {
        let query = format!(
            "INSERT INTO {table} (name) VALUES ($1) \
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING id",
            table = kind.table()
        );
        let (id,): (DbId,) = sqlx::query_as(&query).bind(name).fetch_one(pool).await?;
        Ok(id)
    }

    /// Find an entry by exact name.
    pub async fn find_by_name(
        pool: &PgPool,
        kind: CatalogKind,
        name: &str,
    ) -> Result<Option<CatalogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {table} WHERE name = $1",
            table = kind.table()
        );
        sqlx::query_as::<_, CatalogEntry>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List every entry of `kind` ordered by name.
    pub async fn list(pool: &PgPool, kind: CatalogKind) -> Result<Vec<CatalogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {table} ORDER BY name",
            table = kind.table()
        );
        sqlx::query_as::<_, CatalogEntry>(&query).fetch_all(pool).await
    }
}
