//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod application_repo;
pub mod catalog_repo;
pub mod domain_repo;
pub mod environment_repo;

pub use application_repo::ApplicationRepo;
pub use catalog_repo::CatalogRepo;
pub use domain_repo::DomainRepo;
pub use environment_repo::EnvironmentRepo;
