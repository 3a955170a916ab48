//! Database operations for the Leadlane `PostgreSQL` store.
//!
//! # Tables
//!
//! - `sales_agents` - Agents owning leads and authoring comments
//! - `leads` - Sales prospects moving through the status pipeline
//! - `tags` - Global tag names
//! - `lead_tags` - Lead/tag many-to-many links
//! - `comments` - Per-lead comments
//!
//! # Migrations
//!
//! Migrations live in `crates/api/migrations/` and are embedded with
//! `sqlx::migrate!`, applied once at startup.
//!
//! Reference resolution is explicit: repositories join `sales_agents` and
//! `tags` when a read asks for the resolved shape, never implicitly.

pub mod agents;
pub mod comments;
pub mod leads;
pub mod tags;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use agents::AgentRepository;
pub use comments::CommentRepository;
pub use leads::LeadRepository;
pub use tags::TagRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Unique constraint violation (agent email, tag name).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Whether a sqlx error is a unique-constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
