//! Integration tests for application persistence and the Postgres-backed
//! importer.

use sqlx::PgPool;
use stackdesk_core::import::{
    ApplicationImportMapping, ApplicationImporter, MappingRule, NewApplication, RowStatus,
};
use stackdesk_db::catalog::pg_import_catalog;
use stackdesk_db::models::catalog::CatalogKind;
use stackdesk_db::models::environment::CreateEnvironment;
use stackdesk_db::repositories::{ApplicationRepo, CatalogRepo, DomainRepo, EnvironmentRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_environment(pool: &PgPool, name: &str) -> i64 {
    EnvironmentRepo::create(
        pool,
        &CreateEnvironment {
            name: name.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn catalog_id(pool: &PgPool, kind: CatalogKind, name: &str) -> i64 {
    CatalogRepo::resolve_or_create(pool, kind, name)
        .await
        .unwrap()
}

fn cells(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Columns: client, project, runtime, domains, repository.
fn mapping() -> ApplicationImportMapping {
    ApplicationImportMapping {
        client: MappingRule::Column(0),
        project: MappingRule::Column(1),
        runtime: MappingRule::Column(2),
        pool: MappingRule::Literal("default".into()),
        domains: MappingRule::Column(3),
        framework: MappingRule::Literal("none".into()),
        database: MappingRule::Literal("shared-db".into()),
        repository: MappingRule::Column(4),
        ..ApplicationImportMapping::new()
    }
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_application_with_ordered_domains(pool: PgPool) {
    let environment_id = new_environment(&pool, "staging").await;
    let second = DomainRepo::resolve_or_create(&pool, "b.example.com")
        .await
        .unwrap();
    let first = DomainRepo::resolve_or_create(&pool, "a.example.com")
        .await
        .unwrap();

    let input = NewApplication {
        client_id: catalog_id(&pool, CatalogKind::Client, "Acme").await,
        project_id: catalog_id(&pool, CatalogKind::Project, "Portal").await,
        environment_id,
        database_id: catalog_id(&pool, CatalogKind::Database, "main").await,
        runtime_id: catalog_id(&pool, CatalogKind::Runtime, "php8.2").await,
        pool_id: catalog_id(&pool, CatalogKind::Pool, "web").await,
        framework_id: catalog_id(&pool, CatalogKind::Framework, "laravel").await,
        repository: Some("git@example.com:acme/portal.git".into()),
        branch: None,
        db_name: Some("portal".into()),
        db_user: None,
        doc_root: None,
        domain_ids: vec![second, first],
    };

    let created = ApplicationRepo::create(&pool, &input).await.unwrap();

    assert_eq!(created.environment_id, environment_id);
    assert_eq!(created.repository.as_deref(), Some("git@example.com:acme/portal.git"));
    assert_eq!(created.branch, None);
    assert_eq!(
        ApplicationRepo::domain_ids(&pool, created.id).await.unwrap(),
        vec![second, first]
    );

    let free = DomainRepo::list_unattached(&pool).await.unwrap();
    assert!(free.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_create_leaves_no_application(pool: PgPool) {
    let client_id = catalog_id(&pool, CatalogKind::Client, "Acme").await;

    // Environment 999 does not exist, so the foreign key rejects the insert.
    let input = NewApplication {
        client_id,
        project_id: catalog_id(&pool, CatalogKind::Project, "Portal").await,
        environment_id: 999,
        database_id: catalog_id(&pool, CatalogKind::Database, "main").await,
        runtime_id: catalog_id(&pool, CatalogKind::Runtime, "php").await,
        pool_id: catalog_id(&pool, CatalogKind::Pool, "web").await,
        framework_id: catalog_id(&pool, CatalogKind::Framework, "none").await,
        repository: None,
        branch: None,
        db_name: None,
        db_user: None,
        doc_root: None,
        domain_ids: vec![],
    };

    assert!(ApplicationRepo::create(&pool, &input).await.is_err());

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM applications")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

// ---------------------------------------------------------------------------
// Importer against Postgres
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_import_creates_applications_and_catalog_entries(pool: PgPool) {
    let environment_id = new_environment(&pool, "production").await;
    let importer = ApplicationImporter::new(pg_import_catalog(&pool));

    let rows = vec![
        cells(&["client", "project", "runtime", "domains", "repository"]),
        cells(&["Acme", "Portal", "php8.2", "acme.com, www.acme.com", "git@x:acme.git"]),
        cells(&["Acme", "Shop", "php8.2", "shop.acme.com", ""]),
    ];

    let result = importer
        .import_rows(environment_id, &rows, &mapping(), true)
        .await
        .unwrap();

    assert_eq!(result.total(), 2);
    assert_eq!(result.succeeded(), 2);

    let clients = CatalogRepo::list(&pool, CatalogKind::Client).await.unwrap();
    assert_eq!(clients.len(), 1);
    let projects = CatalogRepo::list(&pool, CatalogKind::Project).await.unwrap();
    assert_eq!(projects.len(), 2);

    let applications = ApplicationRepo::list_by_environment(&pool, environment_id)
        .await
        .unwrap();
    assert_eq!(applications.len(), 2);

    let portal = result.get(1).unwrap().application().unwrap();
    let stored = ApplicationRepo::find_by_id(&pool, portal.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.repository.as_deref(), Some("git@x:acme.git"));
    assert_eq!(portal.domain_ids.len(), 2);

    let shop = result.get(2).unwrap().application().unwrap();
    let stored = ApplicationRepo::find_by_id(&pool, shop.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.repository, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_import_into_missing_environment_reports_row_failures(pool: PgPool) {
    let importer = ApplicationImporter::new(pg_import_catalog(&pool));
    let rows = vec![cells(&["Acme", "Portal", "php", "acme.com", ""])];

    let result = importer
        .import_rows(424242, &rows, &mapping(), false)
        .await
        .unwrap();

    let report = result.report();
    assert_eq!(report.failed, 1);
    assert_eq!(report.rows[0].status, RowStatus::Failed);
    assert!(report.rows[0]
        .error
        .as_deref()
        .unwrap()
        .starts_with("failed to create application"));

    // References resolved before the failure are kept.
    assert!(CatalogRepo::find_by_name(&pool, CatalogKind::Client, "Acme")
        .await
        .unwrap()
        .is_some());
}
