//! Sales agent route handlers.

use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use crate::db::AgentRepository;
use crate::error::ApiError;
use crate::models::{CreateAgentRequest, SalesAgent};
use crate::state::AppState;

/// `POST /agents`
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateAgentRequest>,
) -> Result<(StatusCode, Json<SalesAgent>), ApiError> {
    let new_agent = payload.validate()?;
    let agent = AgentRepository::new(state.pool()).create(&new_agent).await?;

    Ok((StatusCode::CREATED, Json(agent)))
}

/// `GET /agents`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<SalesAgent>>, ApiError> {
    let agents = AgentRepository::new(state.pool()).list().await?;

    if agents.is_empty() {
        return Err(ApiError::NotFound("No sales agents found.".to_string()));
    }

    Ok(Json(agents))
}
