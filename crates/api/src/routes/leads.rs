//! Lead route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::instrument;

use leadlane_core::{LeadId, SalesAgentId};

use crate::db::{AgentRepository, LeadRepository};
use crate::error::ApiError;
use crate::models::{CreateLeadRequest, LeadResponse, ListLeadsQuery, UpdateLeadRequest};
use crate::state::AppState;

/// `POST /leads`
///
/// The agent reference is checked before field validation: a structurally
/// invalid `salesAgent` is a 400 `InvalidIdFormat`, an unknown agent a 404,
/// and only then do field constraints run.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateLeadRequest>,
) -> Result<(StatusCode, Json<LeadResponse>), ApiError> {
    let agent_id = payload
        .sales_agent
        .as_deref()
        .and_then(|raw| SalesAgentId::parse(raw).ok())
        .ok_or(ApiError::InvalidIdFormat)?;

    if AgentRepository::new(state.pool()).get(agent_id).await?.is_none() {
        return Err(ApiError::NotFound(format!(
            "Sales agent with id '{agent_id}' not found."
        )));
    }

    let new_lead = payload.validate(agent_id, Utc::now())?;
    let lead = LeadRepository::new(state.pool()).create(&new_lead).await?;

    Ok((StatusCode::CREATED, Json(lead)))
}

/// `GET /leads` with optional `salesAgent`, `status`, `tags`, `source`
/// filters. Every invalid filter is reported in one 400 before the store is
/// touched.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListLeadsQuery>,
) -> Result<Json<Vec<LeadResponse>>, ApiError> {
    let filters = query.validate()?;
    let leads = LeadRepository::new(state.pool()).list(&filters).await?;

    if leads.is_empty() {
        return Err(ApiError::NotFound("No leads found.".to_string()));
    }

    Ok(Json(leads))
}

/// `PUT /leads/{id}` - partial field merge with re-validation.
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateLeadRequest>,
) -> Result<Json<LeadResponse>, ApiError> {
    let id = LeadId::parse(&id).map_err(|_| ApiError::InvalidIdFormat)?;

    let leads = LeadRepository::new(state.pool());
    let Some(existing) = leads.get(id).await? else {
        return Err(ApiError::NotFound(format!("Lead with id '{id}' not found.")));
    };

    let patch = payload.validate()?;

    if let Some(agent_id) = patch.sales_agent {
        if AgentRepository::new(state.pool()).get(agent_id).await?.is_none() {
            return Err(ApiError::NotFound(format!(
                "Sales agent with id '{agent_id}' not found."
            )));
        }
    }

    let merged = existing.merged_with(&patch, Utc::now());
    leads.update(&merged, patch.tags.as_deref()).await?;

    let lead = leads
        .fetch(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Lead with id '{id}' not found.")))?;

    Ok(Json(lead))
}

/// `DELETE /leads/{id}`
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = LeadId::parse(&id).map_err(|_| ApiError::InvalidIdFormat)?;

    let deleted = LeadRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(ApiError::NotFound(format!("Lead with id '{id}' not found.")));
    }

    Ok(Json(json!({ "message": "Lead deleted Successfully." })))
}
