//! HTTP route handlers for the Leadlane API.
//!
//! # Route Structure
//!
//! ```text
//! # Leads
//! POST   /leads                - Create lead
//! GET    /leads                - List leads (query: salesAgent, status, tags, source)
//! PUT    /leads/{id}           - Update lead (partial merge)
//! DELETE /leads/{id}           - Delete lead
//!
//! # Comments (nested under a lead)
//! POST   /leads/{id}/comments  - Add comment
//! GET    /leads/{id}/comments  - List comments
//!
//! # Sales agents
//! POST   /agents               - Create agent
//! GET    /agents               - List agents
//!
//! # Tags
//! POST   /tags                 - Add tag
//! GET    /tags                 - List tags
//!
//! # Reports
//! GET    /report/last-week     - Leads closed in the last 7 days
//! GET    /report/pipeline      - Count of leads not yet Closed
//! ```

pub mod agents;
pub mod comments;
pub mod leads;
pub mod reports;
pub mod tags;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the lead routes router (comments ride along under `/{id}`).
pub fn lead_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(leads::create).get(leads::list))
        .route("/{id}", put(leads::update).delete(leads::remove))
        .route(
            "/{id}/comments",
            post(comments::create).get(comments::list),
        )
}

/// Create the sales agent routes router.
pub fn agent_routes() -> Router<AppState> {
    Router::new().route("/", post(agents::create).get(agents::list))
}

/// Create the tag routes router.
pub fn tag_routes() -> Router<AppState> {
    Router::new().route("/", post(tags::create).get(tags::list))
}

/// Create the report routes router.
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/last-week", get(reports::last_week))
        .route("/pipeline", get(reports::pipeline))
}

/// Assemble the full application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/leads", lead_routes())
        .nest("/agents", agent_routes())
        .nest("/tags", tag_routes())
        .nest("/report", report_routes())
}
