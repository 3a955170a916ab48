//! Comment repository.
//!
//! Comment reads resolve the author reference to the full agent record with
//! an explicit join.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use leadlane_core::{CommentId, Email, LeadId, SalesAgentId};

use crate::models::{CommentResponse, NewComment, SalesAgent};

use super::RepositoryError;

/// One comment row with the author columns joined in.
#[derive(sqlx::FromRow)]
struct CommentRow {
    id: CommentId,
    lead_id: LeadId,
    comment_text: String,
    created_at: DateTime<Utc>,
    author_id: SalesAgentId,
    author_name: String,
    author_email: Email,
    author_created_at: DateTime<Utc>,
}

impl From<CommentRow> for CommentResponse {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            lead: row.lead_id,
            comment_text: row.comment_text,
            author: SalesAgent {
                id: row.author_id,
                name: row.author_name,
                email: row.author_email,
                created_at: row.author_created_at,
            },
            created_at: row.created_at,
        }
    }
}

/// Repository for comment database operations.
pub struct CommentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CommentRepository<'a> {
    /// Create a new comment repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new comment and return it with the author resolved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, comment: &NewComment) -> Result<CommentResponse, RepositoryError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r"
            WITH inserted AS (
                INSERT INTO comments (lead_id, author_id, comment_text)
                VALUES ($1, $2, $3)
                RETURNING id, lead_id, author_id, comment_text, created_at
            )
            SELECT i.id, i.lead_id, i.comment_text, i.created_at,
                   a.id AS author_id, a.name AS author_name,
                   a.email AS author_email, a.created_at AS author_created_at
            FROM inserted i
            JOIN sales_agents a ON a.id = i.author_id
            ",
        )
        .bind(comment.lead)
        .bind(comment.author)
        .bind(&comment.comment_text)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// List all comments for a lead, authors resolved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_lead(
        &self,
        lead: LeadId,
    ) -> Result<Vec<CommentResponse>, RepositoryError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r"
            SELECT c.id, c.lead_id, c.comment_text, c.created_at,
                   a.id AS author_id, a.name AS author_name,
                   a.email AS author_email, a.created_at AS author_created_at
            FROM comments c
            JOIN sales_agents a ON a.id = c.author_id
            WHERE c.lead_id = $1
            ORDER BY c.created_at
            ",
        )
        .bind(lead)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentResponse::from).collect())
    }
}
