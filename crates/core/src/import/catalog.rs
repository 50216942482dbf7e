//! Collaborator interfaces the importer resolves references through.
//!
//! The importer never reaches for a database handle; every lookup and write
//! goes through one of these traits, bundled in an [`ImportCatalog`] and
//! handed to [`ApplicationImporter::new`](super::importer::ApplicationImporter::new).

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::types::DbId;

use super::row::ImportedApplication;

/// Failure reported by a catalog collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// The backing store failed (connection, constraint, ...).
    #[error("storage error: {0}")]
    Storage(String),
}

/// Resolves a catalog entity by name, creating it when absent.
#[async_trait]
pub trait NameResolver: Send + Sync {
    /// Return the id of the entity called `name`, creating it if needed.
    async fn resolve_or_create(&self, name: &str) -> Result<DbId, CatalogError>;
}

/// A domain not attached to any application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreeDomain {
    pub id: DbId,
    pub name: String,
}

/// Domain lookups. Bulk import may attach domains that are already in use;
/// [`list_unattached`](DomainResolver::list_unattached) serves the
/// single-application form, which only offers free domains.
#[async_trait]
pub trait DomainResolver: Send + Sync {
    async fn resolve_or_create(&self, name: &str) -> Result<DbId, CatalogError>;

    async fn list_unattached(&self) -> Result<Vec<FreeDomain>, CatalogError>;
}

/// Everything needed to persist one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
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
    /// Domains to attach, in display order.
    pub domain_ids: Vec<DbId>,
}

/// Persists applications.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn create(&self, input: &NewApplication) -> Result<ImportedApplication, CatalogError>;
}

/// The full set of collaborators one import batch runs against.
#[derive(Clone)]
pub struct ImportCatalog {
    pub clients: Arc<dyn NameResolver>,
    pub projects: Arc<dyn NameResolver>,
    pub runtimes: Arc<dyn NameResolver>,
    pub pools: Arc<dyn NameResolver>,
    pub frameworks: Arc<dyn NameResolver>,
    pub databases: Arc<dyn NameResolver>,
    pub domains: Arc<dyn DomainResolver>,
    pub applications: Arc<dyn ApplicationStore>,
}

/// `None` for blank strings, the value unchanged otherwise.
///
/// Optional application columns are stored as `NULL` rather than `''`.
pub fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
