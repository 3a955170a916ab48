//! Leadlane Core - Shared domain types.
//!
//! This crate provides common types used across Leadlane components:
//! - `api` - The CRM REST API service
//! - `integration-tests` - Store-free integration tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and lead enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
