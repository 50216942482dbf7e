//! Resolution and creation of applications from mapped rows.
//!
//! Rows are processed one at a time in file order. Each row resolves its
//! references in a fixed order (client, project, runtime, pool, framework,
//! database, domains), then persists the application. The first failure
//! ends that row only; the batch carries on with the next one.
//!
//! Entities created before a row fails are kept. Resolution is by name and
//! idempotent, so a corrected re-upload finds them instead of recreating.

use crate::tabular::is_blank_row;
use crate::types::DbId;

use super::catalog::{non_empty, CatalogError, ImportCatalog, NameResolver, NewApplication};
use super::domains::split_domains;
use super::mapping::ApplicationImportMapping;
use super::result::ApplicationImportResult;
use super::row::{map_row, ApplicationImportRow, ApplicationRowData, ImportedApplication, MappingError};

/// Why a single row could not be imported.
#[derive(Debug, thiserror::Error)]
pub enum RowError {
    #[error("failed to resolve {entity} \"{name}\": {source}")]
    Resolve {
        entity: &'static str,
        name: String,
        #[source]
        source: CatalogError,
    },

    #[error("failed to create application: {0}")]
    Persist(#[source] CatalogError),
}

/// `true` if the operator submitted header labels with the mapping, meaning
/// the first row of the file names the columns and is not data.
pub fn has_header_labels(labels: &[String]) -> bool {
    labels.iter().any(|label| !label.trim().is_empty())
}

/// Turns mapped rows into applications using the injected catalog.
#[derive(Clone)]
pub struct ApplicationImporter {
    catalog: ImportCatalog,
}

impl ApplicationImporter {
    pub fn new(catalog: ImportCatalog) -> Self {
        Self { catalog }
    }

    /// Resolve every reference of `row` and create its application in
    /// `environment_id`. The returned row is either created or failed.
    pub async fn resolve_and_create(
        &self,
        environment_id: DbId,
        mut row: ApplicationImportRow,
    ) -> ApplicationImportRow {
        match self.create_application(environment_id, &row.data).await {
            Ok(application) => row.succeed(application),
            Err(err) => {
                tracing::warn!(
                    row = row.row_number,
                    environment_id,
                    error = %err,
                    "Import row failed"
                );
                row.fail(err.to_string());
            }
        }
        row
    }

    /// Import a whole uploaded file into `environment_id`.
    ///
    /// With `has_header` the first row is skipped and numbering starts at
    /// the second. Every data row is checked against the mapping before any
    /// catalog call, so a too-narrow row rejects the batch untouched.
    ///
    /// Blank rows are skipped but still counted, so a row number always
    /// points at the same data row of the spreadsheet.
    pub async fn import_rows(
        &self,
        environment_id: DbId,
        rows: &[Vec<String>],
        mapping: &ApplicationImportMapping,
        has_header: bool,
    ) -> Result<ApplicationImportResult, MappingError> {
        let data_rows = if has_header {
            rows.get(1..).unwrap_or_default()
        } else {
            rows
        };

        if let Some(column) = mapping.max_column() {
            if let Some((index, cells)) = data_rows
                .iter()
                .enumerate()
                .find(|(_, cells)| !is_blank_row(cells) && cells.len() <= column)
            {
                return Err(MappingError::ColumnOutOfRange {
                    row: index + 1,
                    column,
                    width: cells.len(),
                });
            }
        }

        tracing::info!(
            environment_id,
            rows = data_rows.len(),
            has_header,
            "Starting application import"
        );

        let mut result = ApplicationImportResult::new();
        for (index, cells) in data_rows.iter().enumerate() {
            if is_blank_row(cells) {
                continue;
            }
            let row = map_row(mapping, index + 1, cells)?;
            result.insert(self.resolve_and_create(environment_id, row).await);
        }

        tracing::info!(
            environment_id,
            total = result.total(),
            succeeded = result.succeeded(),
            failed = result.failed(),
            "Application import finished"
        );

        Ok(result)
    }

    async fn create_application(
        &self,
        environment_id: DbId,
        data: &ApplicationRowData,
    ) -> Result<ImportedApplication, RowError> {
        let catalog = &self.catalog;

        let client_id = resolve(catalog.clients.as_ref(), "client", &data.client).await?;
        let project_id = resolve(catalog.projects.as_ref(), "project", &data.project).await?;
        let runtime_id = resolve(catalog.runtimes.as_ref(), "runtime", &data.runtime).await?;
        let pool_id = resolve(catalog.pools.as_ref(), "pool", &data.pool).await?;
        let framework_id =
            resolve(catalog.frameworks.as_ref(), "framework", &data.framework).await?;
        let database_id = resolve(catalog.databases.as_ref(), "database", &data.database).await?;

        let mut domain_ids = Vec::new();
        for name in split_domains(&data.domains) {
            let id = catalog
                .domains
                .resolve_or_create(name)
                .await
                .map_err(|source| RowError::Resolve {
                    entity: "domain",
                    name: name.to_string(),
                    source,
                })?;
            domain_ids.push(id);
        }

        let input = NewApplication {
            client_id,
            project_id,
            environment_id,
            database_id,
            runtime_id,
            pool_id,
            framework_id,
            repository: non_empty(&data.repository),
            branch: non_empty(&data.branch),
            db_name: non_empty(&data.database_name),
            db_user: non_empty(&data.database_user),
            doc_root: non_empty(&data.doc_root),
            domain_ids,
        };

        catalog
            .applications
            .create(&input)
            .await
            .map_err(RowError::Persist)
    }
}

async fn resolve(
    resolver: &dyn NameResolver,
    entity: &'static str,
    name: &str,
) -> Result<DbId, RowError> {
    resolver
        .resolve_or_create(name)
        .await
        .map_err(|source| RowError::Resolve {
            entity,
            name: name.to_string(),
            source,
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
