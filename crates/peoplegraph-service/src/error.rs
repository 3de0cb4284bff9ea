//! Service-layer error types.
//!
//! `ServiceError` is transport-agnostic. The HTTP crate maps it to a status
//! code and JSON body.

/// Service error shared by every store backend and operation.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The graph store could not be reached or refused a session.
    #[error("graph store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected or failed to execute a query.
    #[error("query failed: {0}")]
    Query(String),

    /// A store record did not have the expected shape.
    #[error("unexpected record shape: {0}")]
    Projection(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}
