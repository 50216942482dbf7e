//! Stackdesk API server library.
//!
//! Exposes config, state, error handling, upload staging and routes so
//! integration tests and the binary entrypoint share them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod staging;
pub mod state;
