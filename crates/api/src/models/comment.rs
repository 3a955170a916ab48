//! Comment models.

use chrono::{DateTime, Utc};
use leadlane_core::{CommentId, LeadId, SalesAgentId};
use serde::{Deserialize, Serialize};

use super::{SalesAgent, ValidationErrors};

/// A comment as returned by the API, author resolved to the full agent
/// record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: CommentId,
    pub lead: LeadId,
    pub comment_text: String,
    pub author: SalesAgent,
    pub created_at: DateTime<Utc>,
}

/// A validated comment ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub lead: LeadId,
    pub author: SalesAgentId,
    pub comment_text: String,
}

/// Inbound payload for `POST /leads/{id}/comments`.
///
/// The `author` reference is handled by the route ahead of field validation
/// (structural check, then existence), mirroring how leads treat their
/// agent reference.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub comment_text: Option<String>,
    pub author: Option<String>,
}

impl CreateCommentRequest {
    /// Check the comment text constraint and return the validated comment.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] if the text is missing or blank.
    pub fn validate(
        self,
        lead: LeadId,
        author: SalesAgentId,
    ) -> Result<NewComment, ValidationErrors> {
        match self.comment_text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => Ok(NewComment {
                lead,
                author,
                comment_text: text.to_owned(),
            }),
            _ => Err(ValidationErrors(vec![
                "Comment text is required".to_string(),
            ])),
        }
    }
}
