//! PeopleGraph Server: HTTP facade over a people/cities graph.
//!
//! The binary wires configuration and logging to the service and HTTP
//! crates:
//! - `peoplegraph-service`: pagination, queries, projection, store backends
//! - `peoplegraph-http`:    REST API via axum

pub mod config;

pub use peoplegraph_http::{AppState, router};
