//! Environment model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stackdesk_core::types::{DbId, Timestamp};

/// A row from the `environments` table. Imports target exactly one.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Environment {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new environment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEnvironment {
    pub name: String,
}
