//! Integration tests for Leadlane.
//!
//! These tests exercise the pieces that don't need a running store: the
//! validation rules on every request model, the lead merge semantics, and
//! the failure-to-HTTP mapping. Handler round-trips against a live
//! `PostgreSQL` instance live outside the default test run.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p leadlane-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `lead_rules` - Lead create/update/filter validation and the
//!   `closedAt` invariant
//! - `agents_tags_comments` - Agent, tag, and comment validation rules
//! - `error_responses` - `ApiError` status codes and `{"error": ...}` bodies
