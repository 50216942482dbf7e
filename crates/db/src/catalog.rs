//! Postgres-backed implementations of the importer's collaborator traits.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use stackdesk_core::import::{
    ApplicationStore, CatalogError, DomainResolver, FreeDomain, ImportCatalog, ImportedApplication,
    NameResolver, NewApplication,
};
use stackdesk_core::types::DbId;

use crate::models::catalog::CatalogKind;
use crate::repositories::{ApplicationRepo, CatalogRepo, DomainRepo};

fn storage(err: sqlx::Error) -> CatalogError {
    CatalogError::Storage(err.to_string())
}

/// Resolves names against one catalog table.
#[derive(Clone)]
pub struct PgNameResolver {
    pool: PgPool,
    kind: CatalogKind,
}

impl PgNameResolver {
    pub fn new(pool: PgPool, kind: CatalogKind) -> Self {
        Self { pool, kind }
    }
}

#[async_trait]
impl NameResolver for PgNameResolver {
    async fn resolve_or_create(&self, name: &str) -> Result<DbId, CatalogError> {
        CatalogRepo::resolve_or_create(&self.pool, self.kind, name)
            .await
            .map_err(storage)
    }
}

#[derive(Clone)]
pub struct PgDomainResolver {
    pool: PgPool,
}

impl PgDomainResolver {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DomainResolver for PgDomainResolver {
    async fn resolve_or_create(&self, name: &str) -> Result<DbId, CatalogError> {
        DomainRepo::resolve_or_create(&self.pool, name)
            .await
            .map_err(storage)
    }

    async fn list_unattached(&self) -> Result<Vec<FreeDomain>, CatalogError> {
        let domains = DomainRepo::list_unattached(&self.pool)
            .await
            .map_err(storage)?;
        Ok(domains.into_iter().map(FreeDomain::from).collect())
    }
}

#[derive(Clone)]
pub struct PgApplicationStore {
    pool: PgPool,
}

impl PgApplicationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn create(&self, input: &NewApplication) -> Result<ImportedApplication, CatalogError> {
        let application = ApplicationRepo::create(&self.pool, input)
            .await
            .map_err(storage)?;
        Ok(ImportedApplication {
            id: application.id,
            client_id: application.client_id,
            project_id: application.project_id,
            environment_id: application.environment_id,
            database_id: application.database_id,
            runtime_id: application.runtime_id,
            pool_id: application.pool_id,
            framework_id: application.framework_id,
            domain_ids: input.domain_ids.clone(),
        })
    }
}

/// Wire every importer collaborator to `pool`.
pub fn pg_import_catalog(pool: &PgPool) -> ImportCatalog {
    let names = |kind| Arc::new(PgNameResolver::new(pool.clone(), kind));
    ImportCatalog {
        clients: names(CatalogKind::Client),
        projects: names(CatalogKind::Project),
        runtimes: names(CatalogKind::Runtime),
        pools: names(CatalogKind::Pool),
        frameworks: names(CatalogKind::Framework),
        databases: names(CatalogKind::Database),
        domains: Arc::new(PgDomainResolver::new(pool.clone())),
        applications: Arc::new(PgApplicationStore::new(pool.clone())),
    }
}
