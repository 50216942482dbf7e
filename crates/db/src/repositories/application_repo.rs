//! Repository for the `applications` and `application_domains` tables.

use sqlx::{PgPool, Postgres, Transaction};
use stackdesk_core::import::NewApplication;
use stackdesk_core::types::DbId;

use crate::models::application::{Application, ApplicationWithDomains};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, client_id, project_id, environment_id, database_id, runtime_id, pool_id, \
    framework_id, repository, branch, db_name, db_user, doc_root, created_at, updated_at";

/// Provides create and lookup operations for applications.
pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Insert an application and its ordered domain links in one transaction.
    pub async fn create(pool: &PgPool, input: &NewApplication) -> Result<Application, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO applications \
                (client_id, project_id, environment_id, database_id, runtime_id, pool_id, \
                 framework_id, repository, branch, db_name, db_user, doc_root) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );
        let application = sqlx::query_as::<_, Application>(&insert_query)
            .bind(input.client_id)
            .bind(input.project_id)
            .bind(input.environment_id)
            .bind(input.database_id)
            .bind(input.runtime_id)
            .bind(input.pool_id)
            .bind(input.framework_id)
            .bind(&input.repository)
            .bind(&input.branch)
            .bind(&input.db_name)
            .bind(&input.db_user)
            .bind(&input.doc_root)
            .fetch_one(&mut *tx)
            .await?;

        Self::attach_domains_inner(&mut tx, application.id, &input.domain_ids).await?;

        tx.commit().await?;
        Ok(application)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Application>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = $1");
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Domain ids attached to an application, in display order.
    pub async fn domain_ids(pool: &PgPool, application_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT domain_id FROM application_domains \
             WHERE application_id = $1 ORDER BY position",
        )
        .bind(application_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Applications in an environment, newest first, with their domains.
    pub async fn list_by_environment(
        pool: &PgPool,
        environment_id: DbId,
    ) -> Result<Vec<ApplicationWithDomains>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM applications \
             WHERE environment_id = $1 ORDER BY created_at DESC, id DESC"
        );
        let applications = sqlx::query_as::<_, Application>(&query)
            .bind(environment_id)
            .fetch_all(pool)
            .await?;

        let mut result = Vec::with_capacity(applications.len());
        for application in applications {
            let domain_ids = Self::domain_ids(pool, application.id).await?;
            result.push(ApplicationWithDomains {
                application,
                domain_ids,
            });
        }
        Ok(result)
    }

    async fn attach_domains_inner(
        tx: &mut Transaction<'_, Postgres>,
        application_id: DbId,
        domain_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        for (position, domain_id) in domain_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO application_domains (application_id, domain_id, position) \
                 VALUES ($1, $2, $3)",
            )
            .bind(application_id)
            .bind(domain_id)
            .bind(position as i32)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}
