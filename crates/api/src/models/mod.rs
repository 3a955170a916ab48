//! Request and response models.
//!
//! Request types accept loosely-typed payloads and expose explicit
//! `validate()` functions that collect *every* field violation before any
//! database call, so the rules are testable without a live store.

pub mod agent;
pub mod comment;
pub mod lead;
pub mod tag;

pub use agent::{CreateAgentRequest, NewSalesAgent, SalesAgent};
pub use comment::{CommentResponse, CreateCommentRequest, NewComment};
pub use lead::{
    AgentRef, CreateLeadRequest, Lead, LeadFilters, LeadPatch, LeadResponse, ListLeadsQuery,
    NewLead, UpdateLeadRequest,
};
pub use tag::{CreateTagRequest, NewTag, Tag};

use crate::error::ApiError;

/// The collected field violations from one validation pass.
///
/// Converts into [`ApiError::InvalidInput`] with all messages joined by
/// `". "`, preserving field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<String>);

impl ValidationErrors {
    /// All violation messages as one client-facing string.
    #[must_use]
    pub fn into_message(self) -> String {
        self.0.join(". ")
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::InvalidInput(errors.into_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violations_join_in_order() {
        let errors = ValidationErrors(vec![
            "Lead name is required".to_string(),
            "Lead source is required".to_string(),
        ]);
        assert_eq!(
            errors.into_message(),
            "Lead name is required. Lead source is required"
        );
    }
}
