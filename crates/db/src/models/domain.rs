//! Domain model.

use serde::Serialize;
use sqlx::FromRow;
use stackdesk_core::import::FreeDomain;
use stackdesk_core::types::{DbId, Timestamp};

/// A row from the `domains` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Domain {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Domain> for FreeDomain {
    fn from(domain: Domain) -> Self {
        FreeDomain {
            id: domain.id,
            name: domain.name,
        }
    }
}
