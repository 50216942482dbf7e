//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching the
//! database row and, where the API creates rows directly, a `Deserialize`
//! create DTO.

pub mod application;
pub mod catalog;
pub mod domain;
pub mod environment;
