//! Sales agent models.

use chrono::{DateTime, Utc};
use leadlane_core::{Email, SalesAgentId};
use serde::{Deserialize, Serialize};

use super::ValidationErrors;

/// A sales agent as stored and returned by the API.
///
/// Agents are immutable after creation; they are referenced by leads (owner)
/// and comments (author).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SalesAgent {
    pub id: SalesAgentId,
    pub name: String,
    pub email: Email,
    pub created_at: DateTime<Utc>,
}

/// A validated agent ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewSalesAgent {
    pub name: String,
    pub email: Email,
}

/// Inbound payload for `POST /agents`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl CreateAgentRequest {
    /// Check every field constraint and return the validated agent.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] carrying one message per violated field.
    pub fn validate(self) -> Result<NewSalesAgent, ValidationErrors> {
        let mut violations = Vec::new();

        let name = match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Some(name.to_owned()),
            _ => {
                violations.push("Sales agent name is required".to_string());
                None
            }
        };

        let email = match self.email.as_deref() {
            None => {
                violations.push("Sales agent email is required".to_string());
                None
            }
            Some(raw) => match Email::parse(raw) {
                Ok(email) => Some(email),
                Err(_) => {
                    violations.push("Sales agent email must be a valid email address".to_string());
                    None
                }
            },
        };

        match (name, email) {
            (Some(name), Some(email)) if violations.is_empty() => {
                Ok(NewSalesAgent { name, email })
            }
            _ => Err(ValidationErrors(violations)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_agent() {
        let request = CreateAgentRequest {
            name: Some("Asha Rao".to_string()),
            email: Some("asha@example.com".to_string()),
        };
        let agent = request.validate().unwrap();
        assert_eq!(agent.name, "Asha Rao");
        assert_eq!(agent.email.as_str(), "asha@example.com");
    }

    #[test]
    fn test_missing_everything_reports_both_fields() {
        let errors = CreateAgentRequest::default().validate().unwrap_err();
        assert_eq!(
            errors.into_message(),
            "Sales agent name is required. Sales agent email is required"
        );
    }

    #[test]
    fn test_bad_email() {
        let request = CreateAgentRequest {
            name: Some("Asha Rao".to_string()),
            email: Some("not-an-email".to_string()),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors.into_message(),
            "Sales agent email must be a valid email address"
        );
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let request = CreateAgentRequest {
            name: Some("   ".to_string()),
            email: Some("asha@example.com".to_string()),
        };
        assert!(request.validate().is_err());
    }
}
