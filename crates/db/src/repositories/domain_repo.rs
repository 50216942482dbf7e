//! Repository for the `domains` table.

use sqlx::PgPool;
use stackdesk_core::types::DbId;

use crate::models::domain::Domain;

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides resolve-or-create and free-domain listing for domains.
pub struct DomainRepo;

impl DomainRepo {
    /// Return the id of the domain called `name`, inserting it if absent.
    pub async fn resolve_or_create(pool: &PgPool, name: &str) -> Result<DbId, sqlx::Error> {
        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO domains (name) VALUES ($1) \
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING id",
        )
        .bind(name)
        .fetch_one(pool)
        .await?;
        Ok(id)
    }

    /// Domains not attached to any application, ordered by name.
    pub async fn list_unattached(pool: &PgPool) -> Result<Vec<Domain>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM domains d \
             WHERE NOT EXISTS ( \
                 SELECT 1 FROM application_domains ad WHERE ad.domain_id = d.id \
             ) \
             ORDER BY name"
        );
        sqlx::query_as::<_, Domain>(&query).fetch_all(pool).await
    }
}
