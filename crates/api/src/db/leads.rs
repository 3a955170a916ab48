//! Lead repository.
//!
//! Lead reads come in two shapes: the raw stored row (used for the update
//! merge) and the resolved shape with the owning agent's name and the tag
//! names joined in. Filtering for `GET /leads` is assembled with a
//! `QueryBuilder` so only supplied filters reach the query.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use leadlane_core::{LeadId, LeadPriority, LeadStatus, SalesAgentId, TagId};

use crate::models::{AgentRef, Lead, LeadFilters, LeadResponse, NewLead};

use super::RepositoryError;

/// Resolved lead select: agent name joined, tag names aggregated.
const DETAIL_SELECT: &str = r"
    SELECT l.id, l.name, l.source, l.status, l.time_to_close, l.priority,
           l.closed_at, l.created_at, l.updated_at,
           a.id AS sales_agent_id, a.name AS sales_agent_name,
           COALESCE(
               ARRAY_AGG(t.name ORDER BY t.name) FILTER (WHERE t.name IS NOT NULL),
               ARRAY[]::TEXT[]
           ) AS tags
    FROM leads l
    JOIN sales_agents a ON a.id = l.sales_agent_id
    LEFT JOIN lead_tags lt ON lt.lead_id = l.id
    LEFT JOIN tags t ON t.id = lt.tag_id
";

/// One raw lead row, enums still in their stored text form.
#[derive(sqlx::FromRow)]
struct LeadRow {
    id: LeadId,
    name: String,
    source: String,
    sales_agent_id: SalesAgentId,
    status: String,
    time_to_close: i32,
    priority: Option<String>,
    closed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl LeadRow {
    fn into_lead(self) -> Result<Lead, RepositoryError> {
        Ok(Lead {
            id: self.id,
            name: self.name,
            source: parse_stored(&self.source)?,
            sales_agent_id: self.sales_agent_id,
            status: parse_stored(&self.status)?,
            time_to_close: self.time_to_close,
            priority: self.priority.as_deref().map(parse_stored).transpose()?,
            closed_at: self.closed_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// One resolved lead row.
#[derive(sqlx::FromRow)]
struct LeadDetailRow {
    id: LeadId,
    name: String,
    source: String,
    status: String,
    time_to_close: i32,
    priority: Option<String>,
    closed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    sales_agent_id: SalesAgentId,
    sales_agent_name: String,
    tags: Vec<String>,
}

impl LeadDetailRow {
    fn into_response(self) -> Result<LeadResponse, RepositoryError> {
        Ok(LeadResponse {
            id: self.id,
            name: self.name,
            source: parse_stored(&self.source)?,
            sales_agent: AgentRef {
                id: self.sales_agent_id,
                name: self.sales_agent_name,
            },
            status: parse_stored(&self.status)?,
            tags: self.tags,
            time_to_close: self.time_to_close,
            priority: self.priority.as_deref().map(parse_stored).transpose()?,
            closed_at: self.closed_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Parse a stored enum value, surfacing unknown values as corruption.
fn parse_stored<T: std::str::FromStr<Err = String>>(raw: &str) -> Result<T, RepositoryError> {
    raw.parse::<T>().map_err(RepositoryError::DataCorruption)
}

/// Repository for lead database operations.
pub struct LeadRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LeadRepository<'a> {
    /// Create a new lead repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new lead with its tag links and return the resolved record.
    ///
    /// The lead row and its tag links are one logical record, so they go in
    /// under a single transaction. Tag IDs that match no stored tag are
    /// dropped rather than rejected (the store never enforced tag
    /// references).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn create(&self, lead: &NewLead) -> Result<LeadResponse, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, LeadId>(
            r"
            INSERT INTO leads (name, source, sales_agent_id, status,
                               time_to_close, priority, closed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            ",
        )
        .bind(&lead.name)
        .bind(lead.source.as_str())
        .bind(lead.sales_agent)
        .bind(lead.status.as_str())
        .bind(lead.time_to_close)
        .bind(lead.priority.map(LeadPriority::as_str))
        .bind(lead.closed_at)
        .fetch_one(&mut *tx)
        .await?;

        if !lead.tags.is_empty() {
            link_tags(&mut tx, id, &lead.tags).await?;
        }

        tx.commit().await?;

        self.fetch(id).await?.ok_or_else(|| {
            RepositoryError::DataCorruption(format!("lead {id} missing after insert"))
        })
    }

    /// Get the raw stored lead, enums parsed, references unresolved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored enum value is unknown.
    pub async fn get(&self, id: LeadId) -> Result<Option<Lead>, RepositoryError> {
        let row = sqlx::query_as::<_, LeadRow>(
            r"
            SELECT id, name, source, sales_agent_id, status, time_to_close,
                   priority, closed_at, created_at, updated_at
            FROM leads
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(LeadRow::into_lead).transpose()
    }

    /// Get one lead in its resolved shape.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored enum value is unknown.
    pub async fn fetch(&self, id: LeadId) -> Result<Option<LeadResponse>, RepositoryError> {
        let mut query = QueryBuilder::<Postgres>::new(DETAIL_SELECT);
        query.push(" WHERE l.id = ").push_bind(id.as_uuid());
        query.push(" GROUP BY l.id, a.id");

        let row = query
            .build_query_as::<LeadDetailRow>()
            .fetch_optional(self.pool)
            .await?;

        row.map(LeadDetailRow::into_response).transpose()
    }

    /// List leads matching the validated filters, resolved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored enum value is unknown.
    pub async fn list(&self, filters: &LeadFilters) -> Result<Vec<LeadResponse>, RepositoryError> {
        let mut query = QueryBuilder::<Postgres>::new(DETAIL_SELECT);
        query.push(" WHERE TRUE");

        if let Some(agent) = filters.sales_agent {
            query.push(" AND l.sales_agent_id = ").push_bind(agent.as_uuid());
        }
        if let Some(status) = filters.status {
            query.push(" AND l.status = ").push_bind(status.as_str());
        }
        if let Some(source) = filters.source {
            query.push(" AND l.source = ").push_bind(source.as_str());
        }

        query.push(" GROUP BY l.id, a.id");

        // A lead matches a tags filter when it carries every named tag.
        if let Some(tags) = &filters.tags {
            query
                .push(" HAVING ARRAY_AGG(t.name) FILTER (WHERE t.name IS NOT NULL) @> ")
                .push_bind(tags.clone());
        }

        query.push(" ORDER BY l.created_at");

        let rows = query
            .build_query_as::<LeadDetailRow>()
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(LeadDetailRow::into_response).collect()
    }

    /// Persist a merged lead, optionally replacing its tag links.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn update(
        &self,
        lead: &Lead,
        tags: Option<&[TagId]>,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            UPDATE leads
            SET name = $2, source = $3, sales_agent_id = $4, status = $5,
                time_to_close = $6, priority = $7, closed_at = $8,
                updated_at = $9
            WHERE id = $1
            ",
        )
        .bind(lead.id)
        .bind(&lead.name)
        .bind(lead.source.as_str())
        .bind(lead.sales_agent_id)
        .bind(lead.status.as_str())
        .bind(lead.time_to_close)
        .bind(lead.priority.map(LeadPriority::as_str))
        .bind(lead.closed_at)
        .bind(lead.updated_at)
        .execute(&mut *tx)
        .await?;

        if let Some(tags) = tags {
            sqlx::query("DELETE FROM lead_tags WHERE lead_id = $1")
                .bind(lead.id)
                .execute(&mut *tx)
                .await?;
            if !tags.is_empty() {
                link_tags(&mut tx, lead.id, tags).await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Delete a lead. Comments and tag links cascade.
    ///
    /// Returns whether a row was actually deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: LeadId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List leads closed at or after the cutoff, resolved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored enum value is unknown.
    pub async fn closed_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<LeadResponse>, RepositoryError> {
        let mut query = QueryBuilder::<Postgres>::new(DETAIL_SELECT);
        query
            .push(" WHERE l.closed_at IS NOT NULL AND l.closed_at >= ")
            .push_bind(cutoff);
        query.push(" GROUP BY l.id, a.id ORDER BY l.closed_at DESC");

        let rows = query
            .build_query_as::<LeadDetailRow>()
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(LeadDetailRow::into_response).collect()
    }

    /// Count leads still in the pipeline (status other than Closed).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn pipeline_count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM leads WHERE status <> $1",
        )
        .bind(LeadStatus::Closed.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }
}

/// Link a lead to stored tags. Unknown tag IDs are silently dropped.
async fn link_tags(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    lead: LeadId,
    tags: &[TagId],
) -> Result<(), RepositoryError> {
    let tag_ids: Vec<Uuid> = tags.iter().map(|tag| tag.as_uuid()).collect();

    sqlx::query(
        r"
        INSERT INTO lead_tags (lead_id, tag_id)
        SELECT $1, t.id FROM tags t WHERE t.id = ANY($2)
        ON CONFLICT DO NOTHING
        ",
    )
    .bind(lead)
    .bind(&tag_ids)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
