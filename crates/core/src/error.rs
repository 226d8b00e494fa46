//! Domain errors shared by the storage and HTTP layers.
//!
//! Field validation and store failures have their own types further up
//! (`validator::ValidationErrors`, `sqlx::Error`); this enum only carries
//! what the catalog itself decides.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No live row of `entity` has this id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// The write would clash with an existing catalog entry.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Reserved for an authentication layer in front of the catalog.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Reserved for an authorization layer in front of the catalog.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}
