//! Lead models: stored record, resolved response, and the three inbound
//! payloads (create, update, list filters) with their validation rules.

use chrono::{DateTime, Utc};
use leadlane_core::{LeadId, LeadPriority, LeadSource, LeadStatus, SalesAgentId, TagId};
use serde::{Deserialize, Serialize};

use super::ValidationErrors;

/// A lead's owning agent, resolved to its name for read responses.
#[derive(Debug, Clone, Serialize)]
pub struct AgentRef {
    pub id: SalesAgentId,
    pub name: String,
}

/// A lead as returned by the API: `salesAgent` resolved to `{id, name}`,
/// `tags` resolved to tag names.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadResponse {
    pub id: LeadId,
    pub name: String,
    pub source: LeadSource,
    pub sales_agent: AgentRef,
    pub status: LeadStatus,
    pub tags: Vec<String>,
    pub time_to_close: i32,
    pub priority: Option<LeadPriority>,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A lead as stored, references unresolved. Used for the update merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    pub id: LeadId,
    pub name: String,
    pub source: LeadSource,
    pub sales_agent_id: SalesAgentId,
    pub status: LeadStatus,
    pub time_to_close: i32,
    pub priority: Option<LeadPriority>,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    /// Merge a validated partial update into this lead.
    ///
    /// Unsupplied fields keep their prior values. `closed_at` follows the
    /// status invariant: stamped with `now` on the transition into Closed,
    /// kept as-is while the lead stays Closed, cleared on any other status.
    #[must_use]
    pub fn merged_with(&self, patch: &LeadPatch, now: DateTime<Utc>) -> Self {
        let status = patch.status.unwrap_or(self.status);
        let closed_at = if status.is_closed() {
            if self.status.is_closed() {
                self.closed_at
            } else {
                Some(now)
            }
        } else {
            None
        };

        Self {
            id: self.id,
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            source: patch.source.unwrap_or(self.source),
            sales_agent_id: patch.sales_agent.unwrap_or(self.sales_agent_id),
            status,
            time_to_close: patch.time_to_close.unwrap_or(self.time_to_close),
            priority: patch.priority.or(self.priority),
            closed_at,
            created_at: self.created_at,
            updated_at: now,
        }
    }
}

/// A validated lead ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewLead {
    pub name: String,
    pub source: LeadSource,
    pub sales_agent: SalesAgentId,
    pub status: LeadStatus,
    pub tags: Vec<TagId>,
    pub time_to_close: i32,
    pub priority: Option<LeadPriority>,
    pub closed_at: Option<DateTime<Utc>>,
}

/// Inbound payload for `POST /leads`.
///
/// `salesAgent` is handled by the route before field validation runs: a
/// structurally invalid identifier is `InvalidIdFormat`, an unknown agent is
/// `NotFound`, both ahead of any field-level checks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadRequest {
    pub name: Option<String>,
    pub source: Option<String>,
    pub sales_agent: Option<String>,
    pub status: Option<String>,
    pub tags: Option<Vec<String>>,
    pub time_to_close: Option<i32>,
    pub priority: Option<String>,
}

impl CreateLeadRequest {
    /// Check every field constraint and return the validated lead.
    ///
    /// A status of Closed stamps `closed_at` with `now` at construction.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] carrying one message per violated field.
    pub fn validate(
        self,
        sales_agent: SalesAgentId,
        now: DateTime<Utc>,
    ) -> Result<NewLead, ValidationErrors> {
        let mut violations = Vec::new();

        // Missing/invalid fields record a violation and fall back to a
        // placeholder; the final violations check discards the whole result.
        let name = match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => {
                violations.push("Lead name is required".to_string());
                String::new()
            }
        };

        let source = match self.source.as_deref() {
            None => {
                violations.push("Lead source is required".to_string());
                None
            }
            Some(raw) => {
                parse_enum::<LeadSource>(raw, "Lead source", LeadSource::ALL, &mut violations)
            }
        }
        .unwrap_or(LeadSource::Other);

        let status = match self.status.as_deref() {
            None => Some(LeadStatus::default()),
            Some(raw) => {
                parse_enum::<LeadStatus>(raw, "Lead status", LeadStatus::ALL, &mut violations)
            }
        }
        .unwrap_or_default();

        let tags = match self.tags {
            None => Vec::new(),
            Some(raw) => parse_tag_ids(&raw, &mut violations),
        };

        let time_to_close = match self.time_to_close {
            None => {
                violations.push("Time to close is required".to_string());
                0
            }
            Some(days) if days < 1 => {
                violations.push("Time to close must be a positive number of days".to_string());
                0
            }
            Some(days) => days,
        };

        let priority = self.priority.as_deref().and_then(|raw| {
            parse_enum::<LeadPriority>(raw, "Lead priority", LeadPriority::ALL, &mut violations)
        });

        if !violations.is_empty() {
            return Err(ValidationErrors(violations));
        }

        let closed_at = status.is_closed().then_some(now);

        Ok(NewLead {
            name,
            source,
            sales_agent,
            status,
            tags,
            time_to_close,
            priority,
            closed_at,
        })
    }
}

/// A validated partial update for `PUT /leads/{id}`.
#[derive(Debug, Clone, Default)]
pub struct LeadPatch {
    pub name: Option<String>,
    pub source: Option<LeadSource>,
    pub sales_agent: Option<SalesAgentId>,
    pub status: Option<LeadStatus>,
    pub tags: Option<Vec<TagId>>,
    pub time_to_close: Option<i32>,
    pub priority: Option<LeadPriority>,
}

/// Inbound payload for `PUT /leads/{id}`. Every field is optional; supplied
/// fields are re-validated with the create rules.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeadRequest {
    pub name: Option<String>,
    pub source: Option<String>,
    pub sales_agent: Option<String>,
    pub status: Option<String>,
    pub tags: Option<Vec<String>>,
    pub time_to_close: Option<i32>,
    pub priority: Option<String>,
}

impl UpdateLeadRequest {
    /// Check every supplied field and return the validated patch.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] carrying one message per violated field.
    pub fn validate(self) -> Result<LeadPatch, ValidationErrors> {
        let mut violations = Vec::new();

        let name = match self.name.as_deref().map(str::trim) {
            None => None,
            Some(name) if !name.is_empty() => Some(name.to_owned()),
            Some(_) => {
                violations.push("Lead name cannot be empty".to_string());
                None
            }
        };

        let source = self.source.as_deref().and_then(|raw| {
            parse_enum::<LeadSource>(raw, "Lead source", LeadSource::ALL, &mut violations)
        });

        let sales_agent = self.sales_agent.as_deref().and_then(|raw| {
            SalesAgentId::parse(raw).ok().or_else(|| {
                violations.push("Sales agent must be a valid identifier".to_string());
                None
            })
        });

        let status = self.status.as_deref().and_then(|raw| {
            parse_enum::<LeadStatus>(raw, "Lead status", LeadStatus::ALL, &mut violations)
        });

        let tags = self.tags.map(|raw| parse_tag_ids(&raw, &mut violations));

        let time_to_close = match self.time_to_close {
            Some(days) if days < 1 => {
                violations.push("Time to close must be a positive number of days".to_string());
                None
            }
            other => other,
        };

        let priority = self.priority.as_deref().and_then(|raw| {
            parse_enum::<LeadPriority>(raw, "Lead priority", LeadPriority::ALL, &mut violations)
        });

        if violations.is_empty() {
            Ok(LeadPatch {
                name,
                source,
                sales_agent,
                status,
                tags,
                time_to_close,
                priority,
            })
        } else {
            Err(ValidationErrors(violations))
        }
    }
}

/// Validated filters for `GET /leads`.
#[derive(Debug, Clone, Default)]
pub struct LeadFilters {
    pub sales_agent: Option<SalesAgentId>,
    pub status: Option<LeadStatus>,
    pub source: Option<LeadSource>,
    pub tags: Option<Vec<String>>,
}

/// Raw query parameters for `GET /leads`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLeadsQuery {
    pub sales_agent: Option<String>,
    pub status: Option<String>,
    pub source: Option<String>,
    /// Comma-separated tag names; a lead matches when it carries all of them.
    pub tags: Option<String>,
}

impl ListLeadsQuery {
    /// Check every supplied filter, collecting all violations before any
    /// query runs.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] carrying one message per invalid filter.
    pub fn validate(self) -> Result<LeadFilters, ValidationErrors> {
        let mut violations = Vec::new();

        let sales_agent = self.sales_agent.as_deref().and_then(|raw| {
            SalesAgentId::parse(raw).ok().or_else(|| {
                violations.push("salesAgent must be a valid sales agent identifier".to_string());
                None
            })
        });

        let status = self.status.as_deref().and_then(|raw| {
            parse_enum::<LeadStatus>(raw, "status", LeadStatus::ALL, &mut violations)
        });

        let source = self.source.as_deref().and_then(|raw| {
            parse_enum::<LeadSource>(raw, "source", LeadSource::ALL, &mut violations)
        });

        let tags = self.tags.as_deref().map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
                .collect::<Vec<_>>()
        });
        let tags = tags.filter(|names| !names.is_empty());

        if violations.is_empty() {
            Ok(LeadFilters {
                sales_agent,
                status,
                source,
                tags,
            })
        } else {
            Err(ValidationErrors(violations))
        }
    }
}

/// Parse an enum filter/field, recording a violation naming the allowed
/// values on failure.
fn parse_enum<T: std::str::FromStr>(
    raw: &str,
    what: &str,
    allowed: &[&str],
    violations: &mut Vec<String>,
) -> Option<T> {
    raw.parse::<T>().ok().or_else(|| {
        violations.push(format!("{what} must be one of {}", allowed.join(", ")));
        None
    })
}

/// Parse the tag reference list, recording a single violation if any entry
/// is not a structurally valid identifier.
fn parse_tag_ids(raw: &[String], violations: &mut Vec<String>) -> Vec<TagId> {
    let mut ids = Vec::with_capacity(raw.len());
    for value in raw {
        match TagId::parse(value) {
            Ok(id) => ids.push(id),
            Err(_) => {
                violations.push("Tags must be a list of valid tag identifiers".to_string());
                return Vec::new();
            }
        }
    }
    ids
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn agent_id() -> SalesAgentId {
        SalesAgentId::parse("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap()
    }

    fn minimal_create() -> CreateLeadRequest {
        CreateLeadRequest {
            name: Some("Acme Corp".to_string()),
            source: Some("Referral".to_string()),
            time_to_close: Some(30),
            ..CreateLeadRequest::default()
        }
    }

    #[test]
    fn test_create_defaults_status_to_new() {
        let lead = minimal_create().validate(agent_id(), Utc::now()).unwrap();
        assert_eq!(lead.status, LeadStatus::New);
        assert!(lead.closed_at.is_none());
        assert!(lead.tags.is_empty());
    }

    #[test]
    fn test_create_closed_stamps_closed_at() {
        let now = Utc::now();
        let request = CreateLeadRequest {
            status: Some("Closed".to_string()),
            ..minimal_create()
        };
        let lead = request.validate(agent_id(), now).unwrap();
        assert_eq!(lead.closed_at, Some(now));
    }

    #[test]
    fn test_create_collects_every_violation() {
        let request = CreateLeadRequest {
            source: Some("Carrier Pigeon".to_string()),
            priority: Some("Urgent".to_string()),
            ..CreateLeadRequest::default()
        };
        let message = request
            .validate(agent_id(), Utc::now())
            .unwrap_err()
            .into_message();
        assert_eq!(
            message,
            "Lead name is required. \
             Lead source must be one of Website, Referral, Cold Call, Advertisement, Email, Other. \
             Time to close is required. \
             Lead priority must be one of High, Medium, Low"
        );
    }

    #[test]
    fn test_create_rejects_malformed_tag_ids() {
        let request = CreateLeadRequest {
            tags: Some(vec!["not-a-tag-id".to_string()]),
            ..minimal_create()
        };
        let message = request
            .validate(agent_id(), Utc::now())
            .unwrap_err()
            .into_message();
        assert_eq!(message, "Tags must be a list of valid tag identifiers");
    }

    #[test]
    fn test_filters_collect_every_violation_before_querying() {
        let query = ListLeadsQuery {
            sales_agent: Some("nope".to_string()),
            status: Some("Bogus".to_string()),
            source: Some("Fax".to_string()),
            tags: None,
        };
        let message = query.validate().unwrap_err().into_message();
        assert_eq!(
            message,
            "salesAgent must be a valid sales agent identifier. \
             status must be one of New, Contacted, Qualified, Proposal Sent, Closed. \
             source must be one of Website, Referral, Cold Call, Advertisement, Email, Other"
        );
    }

    #[test]
    fn test_filters_split_tags() {
        let query = ListLeadsQuery {
            tags: Some("enterprise, priority ,".to_string()),
            ..ListLeadsQuery::default()
        };
        let filters = query.validate().unwrap();
        assert_eq!(
            filters.tags,
            Some(vec!["enterprise".to_string(), "priority".to_string()])
        );
    }

    fn existing_lead() -> Lead {
        Lead {
            id: LeadId::parse("11111111-2222-4333-8444-555555555555").unwrap(),
            name: "Acme Corp".to_string(),
            source: LeadSource::Referral,
            sales_agent_id: agent_id(),
            status: LeadStatus::Contacted,
            time_to_close: 30,
            priority: Some(LeadPriority::Medium),
            closed_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_merge_keeps_unsupplied_fields() {
        let lead = existing_lead();
        let patch = LeadPatch {
            name: Some("Acme Corporation".to_string()),
            ..LeadPatch::default()
        };
        let merged = lead.merged_with(&patch, Utc::now());
        assert_eq!(merged.name, "Acme Corporation");
        assert_eq!(merged.source, lead.source);
        assert_eq!(merged.status, lead.status);
        assert_eq!(merged.time_to_close, lead.time_to_close);
    }

    #[test]
    fn test_merge_entering_closed_stamps_closed_at() {
        let now = Utc::now();
        let patch = LeadPatch {
            status: Some(LeadStatus::Closed),
            ..LeadPatch::default()
        };
        let merged = existing_lead().merged_with(&patch, now);
        assert_eq!(merged.closed_at, Some(now));
    }

    #[test]
    fn test_merge_leaving_closed_clears_closed_at() {
        let mut lead = existing_lead();
        lead.status = LeadStatus::Closed;
        lead.closed_at = Some(Utc::now());

        let patch = LeadPatch {
            status: Some(LeadStatus::Qualified),
            ..LeadPatch::default()
        };
        let merged = lead.merged_with(&patch, Utc::now());
        assert!(merged.closed_at.is_none());
    }

    #[test]
    fn test_merge_staying_closed_keeps_original_stamp() {
        let stamp = Utc::now();
        let mut lead = existing_lead();
        lead.status = LeadStatus::Closed;
        lead.closed_at = Some(stamp);

        let patch = LeadPatch {
            name: Some("Acme Corporation".to_string()),
            ..LeadPatch::default()
        };
        let merged = lead.merged_with(&patch, Utc::now());
        assert_eq!(merged.closed_at, Some(stamp));
    }

    #[test]
    fn test_update_validates_supplied_fields_only() {
        let request = UpdateLeadRequest {
            status: Some("Bogus".to_string()),
            ..UpdateLeadRequest::default()
        };
        let message = request.validate().unwrap_err().into_message();
        assert_eq!(
            message,
            "Lead status must be one of New, Contacted, Qualified, Proposal Sent, Closed"
        );

        assert!(UpdateLeadRequest::default().validate().is_ok());
    }
}
