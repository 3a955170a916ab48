//! Lead validation and merge-semantics tests.
//!
//! These cover the observable rules of the lead resource without a store:
//! field validation collects every violation before anything is persisted,
//! and `closedAt` tracks the status transitions exactly.

use chrono::{Duration, Utc};
use leadlane_api::models::{
    CreateLeadRequest, Lead, LeadPatch, ListLeadsQuery, UpdateLeadRequest,
};
use leadlane_core::{LeadId, LeadPriority, LeadSource, LeadStatus, SalesAgentId, TagId};

fn agent_id() -> SalesAgentId {
    SalesAgentId::parse("67e55044-10b1-426f-9247-bb680e5fe0c8").expect("valid uuid")
}

fn create_request() -> CreateLeadRequest {
    CreateLeadRequest {
        name: Some("Acme Corp".to_string()),
        source: Some("Cold Call".to_string()),
        sales_agent: Some(agent_id().to_string()),
        status: None,
        tags: None,
        time_to_close: Some(45),
        priority: Some("High".to_string()),
    }
}

// =============================================================================
// Create Lead Validation
// =============================================================================

#[test]
fn test_create_lead_happy_path() {
    let lead = create_request()
        .validate(agent_id(), Utc::now())
        .expect("valid request");

    assert_eq!(lead.name, "Acme Corp");
    assert_eq!(lead.source, LeadSource::ColdCall);
    assert_eq!(lead.sales_agent, agent_id());
    assert_eq!(lead.status, LeadStatus::New);
    assert_eq!(lead.time_to_close, 45);
    assert_eq!(lead.priority, Some(LeadPriority::High));
    assert!(lead.closed_at.is_none());
}

#[test]
fn test_create_closed_lead_stamps_closed_at() {
    let now = Utc::now();
    let request = CreateLeadRequest {
        status: Some("Closed".to_string()),
        ..create_request()
    };

    let lead = request.validate(agent_id(), now).expect("valid request");
    assert_eq!(lead.status, LeadStatus::Closed);
    assert_eq!(lead.closed_at, Some(now));
}

#[test]
fn test_create_non_closed_statuses_leave_closed_at_unset() {
    for status in ["New", "Contacted", "Qualified", "Proposal Sent"] {
        let request = CreateLeadRequest {
            status: Some(status.to_string()),
            ..create_request()
        };
        let lead = request
            .validate(agent_id(), Utc::now())
            .expect("valid request");
        assert!(lead.closed_at.is_none(), "closedAt leaked for {status}");
    }
}

#[test]
fn test_create_empty_payload_reports_every_required_field() {
    let message = CreateLeadRequest::default()
        .validate(agent_id(), Utc::now())
        .expect_err("empty payload")
        .into_message();

    assert!(message.contains("Lead name is required"));
    assert!(message.contains("Lead source is required"));
    assert!(message.contains("Time to close is required"));
    // Violations are joined into a single message with ". "
    assert_eq!(message.matches(". ").count(), 2);
}

#[test]
fn test_create_accepts_structurally_valid_tag_ids() {
    let tag = TagId::generate();
    let request = CreateLeadRequest {
        tags: Some(vec![tag.to_string()]),
        ..create_request()
    };
    let lead = request
        .validate(agent_id(), Utc::now())
        .expect("valid request");
    assert_eq!(lead.tags, vec![tag]);
}

#[test]
fn test_create_rejects_non_positive_time_to_close() {
    let request = CreateLeadRequest {
        time_to_close: Some(0),
        ..create_request()
    };
    let message = request
        .validate(agent_id(), Utc::now())
        .expect_err("zero days")
        .into_message();
    assert_eq!(message, "Time to close must be a positive number of days");
}

// =============================================================================
// List Filters
// =============================================================================

#[test]
fn test_bogus_status_filter_fails_before_any_query() {
    let query = ListLeadsQuery {
        status: Some("Bogus".to_string()),
        ..ListLeadsQuery::default()
    };
    let message = query.validate().expect_err("bogus status").into_message();
    assert_eq!(
        message,
        "status must be one of New, Contacted, Qualified, Proposal Sent, Closed"
    );
}

#[test]
fn test_all_bad_filters_reported_together() {
    let query = ListLeadsQuery {
        sales_agent: Some("not-an-id".to_string()),
        status: Some("Bogus".to_string()),
        source: Some("Fax".to_string()),
        tags: Some("vip".to_string()),
    };
    let message = query.validate().expect_err("three bad filters").into_message();
    assert!(message.contains("salesAgent"));
    assert!(message.contains("status"));
    assert!(message.contains("source"));
}

#[test]
fn test_valid_filters_pass_through() {
    let query = ListLeadsQuery {
        sales_agent: Some(agent_id().to_string()),
        status: Some("Proposal Sent".to_string()),
        source: Some("Website".to_string()),
        tags: Some("vip,enterprise".to_string()),
    };
    let filters = query.validate().expect("valid filters");
    assert_eq!(filters.sales_agent, Some(agent_id()));
    assert_eq!(filters.status, Some(LeadStatus::ProposalSent));
    assert_eq!(filters.source, Some(LeadSource::Website));
    assert_eq!(
        filters.tags,
        Some(vec!["vip".to_string(), "enterprise".to_string()])
    );
}

// =============================================================================
// Update Merge Semantics
// =============================================================================

fn stored_lead() -> Lead {
    Lead {
        id: LeadId::generate(),
        name: "Acme Corp".to_string(),
        source: LeadSource::Referral,
        sales_agent_id: agent_id(),
        status: LeadStatus::Qualified,
        time_to_close: 30,
        priority: None,
        closed_at: None,
        created_at: Utc::now() - Duration::days(3),
        updated_at: Utc::now() - Duration::days(1),
    }
}

#[test]
fn test_merge_reflects_only_supplied_fields() {
    let lead = stored_lead();
    let patch = UpdateLeadRequest {
        time_to_close: Some(10),
        priority: Some("Low".to_string()),
        ..UpdateLeadRequest::default()
    }
    .validate()
    .expect("valid patch");

    let merged = lead.merged_with(&patch, Utc::now());
    assert_eq!(merged.time_to_close, 10);
    assert_eq!(merged.priority, Some(LeadPriority::Low));
    // Everything else carries over
    assert_eq!(merged.name, lead.name);
    assert_eq!(merged.source, lead.source);
    assert_eq!(merged.status, lead.status);
    assert_eq!(merged.sales_agent_id, lead.sales_agent_id);
    assert_eq!(merged.created_at, lead.created_at);
}

#[test]
fn test_merge_closing_and_reopening_round_trip() {
    let now = Utc::now();
    let lead = stored_lead();

    let close = LeadPatch {
        status: Some(LeadStatus::Closed),
        ..LeadPatch::default()
    };
    let closed = lead.merged_with(&close, now);
    assert_eq!(closed.closed_at, Some(now));

    let reopen = LeadPatch {
        status: Some(LeadStatus::Contacted),
        ..LeadPatch::default()
    };
    let reopened = closed.merged_with(&reopen, Utc::now());
    assert_eq!(reopened.status, LeadStatus::Contacted);
    assert!(reopened.closed_at.is_none());
}

#[test]
fn test_merge_while_closed_keeps_original_timestamp() {
    let first_close = Utc::now() - Duration::hours(6);
    let mut lead = stored_lead();
    lead.status = LeadStatus::Closed;
    lead.closed_at = Some(first_close);

    let patch = LeadPatch {
        time_to_close: Some(5),
        ..LeadPatch::default()
    };
    let merged = lead.merged_with(&patch, Utc::now());
    assert_eq!(merged.closed_at, Some(first_close));
}

#[test]
fn test_update_rejects_invalid_sales_agent_reference() {
    let request = UpdateLeadRequest {
        sales_agent: Some("not-an-id".to_string()),
        ..UpdateLeadRequest::default()
    };
    let message = request.validate().expect_err("bad reference").into_message();
    assert_eq!(message, "Sales agent must be a valid identifier");
}
