//! Domain types and the bulk application-import pipeline.
//!
//! Nothing in this crate talks to the database or the network. Catalog
//! lookups and persistence are reached through the traits in
//! [`import::catalog`], which the `stackdesk-db` crate implements.

pub mod error;
pub mod import;
pub mod tabular;
pub mod types;
