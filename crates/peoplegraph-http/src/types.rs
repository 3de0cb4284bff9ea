//! Request/response types for the HTTP API.

use peoplegraph_service::types::Person;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct CreatedPerson {
    pub message: String,
    pub person: Person,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Server status ("ok").
    pub status: String,
    /// Server version.
    pub version: String,
    /// Active store backend ("memory" or "neo4j").
    pub store: String,
    /// Server uptime in seconds.
    pub uptime_seconds: u64,
}
