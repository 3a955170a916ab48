//! Tag models.

use leadlane_core::TagId;
use serde::{Deserialize, Serialize};

use super::ValidationErrors;

/// A tag as stored and returned by the API. Read-only after creation.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

/// A validated tag ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: String,
}

/// Inbound payload for `POST /tags`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTagRequest {
    pub name: Option<String>,
}

impl CreateTagRequest {
    /// Check the name constraint and return the validated tag.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] if the name is missing or blank.
    pub fn validate(self) -> Result<NewTag, ValidationErrors> {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(NewTag {
                name: name.to_owned(),
            }),
            _ => Err(ValidationErrors(vec!["Tag name is required".to_string()])),
        }
    }
}
