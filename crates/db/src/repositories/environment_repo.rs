//! Repository for the `environments` table.

use sqlx::PgPool;
use stackdesk_core::types::DbId;

use crate::models::environment::{CreateEnvironment, Environment};

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for environments.
pub struct EnvironmentRepo;

impl EnvironmentRepo {
    /// Insert a new environment, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateEnvironment,
    ) -> Result<Environment, sqlx::Error> {
        let query = format!("INSERT INTO environments (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Environment>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Environment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM environments WHERE id = $1");
        sqlx::query_as::<_, Environment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all environments ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Environment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM environments ORDER BY name");
        sqlx::query_as::<_, Environment>(&query).fetch_all(pool).await
    }
}
