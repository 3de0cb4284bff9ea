//! Graph session provider: the seam between the service and a graph store.
//!
//! A [`SessionFactory`] is built once at startup and shared by every
//! request. Each request opens its own [`GraphSession`], runs its query and
//! closes the session again; sessions are never shared or pooled here.

pub mod memory;
#[cfg(feature = "neo4j")]
pub mod neo4j;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::ServiceError;
use crate::query::GraphQuery;

pub use memory::MemoryGraph;
#[cfg(feature = "neo4j")]
pub use neo4j::Neo4jStore;

/// One result row: column name to a JSON attribute bag.
///
/// Records are untyped on purpose. [`crate::project`] turns them into
/// [`crate::types::Person`] and [`crate::types::City`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    columns: Map<String, Value>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column, returning the record for chaining.
    #[must_use]
    pub fn with(mut self, column: &str, value: Value) -> Self {
        self.columns.insert(column.to_string(), value);
        self
    }

    /// Returns the value of a column, if present.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }
}

/// A scoped handle for issuing queries against the store.
///
/// Exactly one of `close` or `abort` must be called, whatever `run`
/// returned.
#[async_trait]
pub trait GraphSession: Send {
    /// Runs a query and collects every returned row.
    async fn run(&mut self, query: &GraphQuery) -> Result<Vec<Record>, ServiceError>;

    /// Releases the session, making its writes durable. Further calls to
    /// `run` fail.
    async fn close(&mut self) -> Result<(), ServiceError>;

    /// Releases a session whose caller went away mid-query. Nothing it wrote
    /// may become durable.
    async fn abort(&mut self) -> Result<(), ServiceError> {
        self.close().await
    }
}

/// Opens sessions against a graph store.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    /// Short backend label used in logs and the health endpoint.
    fn backend(&self) -> &'static str;

    /// Acquires a new session.
    async fn open(&self) -> Result<Box<dyn GraphSession>, ServiceError>;
}
