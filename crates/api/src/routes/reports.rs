//! Reporting route handlers.

use axum::{Json, extract::State};
use chrono::{Duration, Utc};
use serde_json::{Value, json};

use crate::db::LeadRepository;
use crate::error::ApiError;
use crate::models::LeadResponse;
use crate::state::AppState;

/// `GET /report/last-week` - leads closed within the last 7 days, inclusive
/// of the current instant.
pub async fn last_week(State(state): State<AppState>) -> Result<Json<Vec<LeadResponse>>, ApiError> {
    let cutoff = Utc::now() - Duration::days(7);
    let leads = LeadRepository::new(state.pool()).closed_since(cutoff).await?;

    if leads.is_empty() {
        return Err(ApiError::NotFound(
            "No leads closed in the last 7 days.".to_string(),
        ));
    }

    Ok(Json(leads))
}

/// `GET /report/pipeline` - count of leads whose status is not Closed.
///
/// A zero count is reported as 404, not `{"totalLeadsInPipeline": 0}`;
/// inherited behavior that treats an empty pipeline as absent data.
pub async fn pipeline(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let count = LeadRepository::new(state.pool()).pipeline_count().await?;

    if count == 0 {
        return Err(ApiError::NotFound("No leads in the pipeline.".to_string()));
    }

    Ok(Json(json!({ "totalLeadsInPipeline": count })))
}
