//! Core types for Leadlane.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod lead;

pub use email::{Email, EmailError};
pub use id::*;
pub use lead::{LeadPriority, LeadSource, LeadStatus};
