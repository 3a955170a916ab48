//! Comment route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use leadlane_core::{LeadId, SalesAgentId};

use crate::db::{AgentRepository, CommentRepository, LeadRepository};
use crate::error::ApiError;
use crate::models::{CommentResponse, CreateCommentRequest};
use crate::state::AppState;

/// `POST /leads/{id}/comments`
///
/// Both references get their own 400 variant (`InvalidLeadId`,
/// `InvalidAgentId`) before any existence check or persistence runs.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let lead_id = LeadId::parse(&id).map_err(|_| ApiError::InvalidLeadId)?;

    let author_id = payload
        .author
        .as_deref()
        .and_then(|raw| SalesAgentId::parse(raw).ok())
        .ok_or(ApiError::InvalidAgentId)?;

    if LeadRepository::new(state.pool()).get(lead_id).await?.is_none() {
        return Err(ApiError::NotFound(format!(
            "Lead with id '{lead_id}' not found."
        )));
    }

    if AgentRepository::new(state.pool()).get(author_id).await?.is_none() {
        return Err(ApiError::NotFound(format!(
            "Sales agent with id '{author_id}' not found."
        )));
    }

    let new_comment = payload.validate(lead_id, author_id)?;
    let comment = CommentRepository::new(state.pool())
        .create(&new_comment)
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// `GET /leads/{id}/comments`
pub async fn list(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<CommentResponse>>, ApiError> {
    let lead_id = LeadId::parse(&id).map_err(|_| ApiError::InvalidIdFormat)?;

    let comments = CommentRepository::new(state.pool())
        .list_for_lead(lead_id)
        .await?;

    if comments.is_empty() {
        return Err(ApiError::NotFound(
            "No comments found for this lead.".to_string(),
        ));
    }

    Ok(Json(comments))
}
