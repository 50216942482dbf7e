//! Bulk CSV application import.
//!
//! Flow: the uploaded file is stored and read back as rows of cells
//! ([`crate::tabular`]); the operator's [`ApplicationImportMapping`] turns
//! each row into an [`ApplicationImportRow`] ([`map_row`]); the
//! [`ApplicationImporter`] resolves the row's references and creates the
//! application; outcomes collect in an [`ApplicationImportResult`].

pub mod catalog;
pub mod domains;
pub mod importer;
pub mod mapping;
pub mod result;
pub mod row;

pub use catalog::{
    ApplicationStore, CatalogError, DomainResolver, FreeDomain, ImportCatalog, NameResolver,
    NewApplication,
};
pub use domains::split_domains;
pub use importer::{has_header_labels, ApplicationImporter, RowError};
pub use mapping::{ApplicationImportMapping, ImportField, MappingRule};
pub use result::{ApplicationImportResult, ImportReport, RowReport, RowStatus};
pub use row::{
    map_row, ApplicationImportRow, ApplicationRowData, ImportedApplication, MappingError,
    RowOutcome,
};
