//! Tag route handlers.

use axum::{Json, extract::State};
use serde_json::{Value, json};
use tracing::instrument;

use crate::db::TagRepository;
use crate::error::ApiError;
use crate::models::{CreateTagRequest, Tag};
use crate::state::AppState;

/// `POST /tags`
///
/// Responds 200 with a message body rather than a bare 201; inherited
/// behavior that clients depend on.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateTagRequest>,
) -> Result<Json<Value>, ApiError> {
    let new_tag = payload.validate()?;
    let tag = TagRepository::new(state.pool()).create(&new_tag).await?;

    Ok(Json(json!({
        "message": "Tag added successfully.",
        "tag": tag,
    })))
}

/// `GET /tags`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Tag>>, ApiError> {
    let tags = TagRepository::new(state.pool()).list().await?;

    if tags.is_empty() {
        return Err(ApiError::NotFound("No tags found.".to_string()));
    }

    Ok(Json(tags))
}
