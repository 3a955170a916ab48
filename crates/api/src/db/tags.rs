//! Tag repository.

use sqlx::PgPool;

use crate::models::{NewTag, Tag};

use super::{RepositoryError, is_unique_violation};

/// Repository for tag database operations.
pub struct TagRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TagRepository<'a> {
    /// Create a new tag repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new tag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, tag: &NewTag) -> Result<Tag, RepositoryError> {
        sqlx::query_as::<_, Tag>(
            r"
            INSERT INTO tags (name)
            VALUES ($1)
            RETURNING id, name
            ",
        )
        .bind(&tag.name)
        .fetch_one(self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                RepositoryError::Conflict(format!("Tag with name '{}' already exists.", tag.name))
            } else {
                err.into()
            }
        })
    }

    /// List all tags.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Tag>, RepositoryError> {
        let tags = sqlx::query_as::<_, Tag>(
            r"
            SELECT id, name
            FROM tags
            ORDER BY name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(tags)
    }
}
