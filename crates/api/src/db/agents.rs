//! Sales agent repository.

use sqlx::PgPool;

use crate::models::{NewSalesAgent, SalesAgent};
use leadlane_core::SalesAgentId;

use super::{RepositoryError, is_unique_violation};

/// Repository for sales agent database operations.
pub struct AgentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AgentRepository<'a> {
    /// Create a new agent repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new agent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, agent: &NewSalesAgent) -> Result<SalesAgent, RepositoryError> {
        sqlx::query_as::<_, SalesAgent>(
            r"
            INSERT INTO sales_agents (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email, created_at
            ",
        )
        .bind(&agent.name)
        .bind(agent.email.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                RepositoryError::Conflict(format!(
                    "Sales agent with email '{}' already exists.",
                    agent.email
                ))
            } else {
                err.into()
            }
        })
    }

    /// Get an agent by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: SalesAgentId) -> Result<Option<SalesAgent>, RepositoryError> {
        let agent = sqlx::query_as::<_, SalesAgent>(
            r"
            SELECT id, name, email, created_at
            FROM sales_agents
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(agent)
    }

    /// List all agents.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<SalesAgent>, RepositoryError> {
        let agents = sqlx::query_as::<_, SalesAgent>(
            r"
            SELECT id, name, email, created_at
            FROM sales_agents
            ORDER BY created_at
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(agents)
    }
}
