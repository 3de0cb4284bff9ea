//! Neo4j backend over the Bolt protocol.
//!
//! Each session is one explicit transaction taken from the driver's
//! connection pool: `open` starts it, `close` commits it (or rolls it back
//! if a query failed) and returns the connection to the pool.

use std::sync::Arc;

use async_trait::async_trait;
use neo4rs::{BoltType, Graph, Query, Txn};

use super::{GraphSession, Record, SessionFactory};
use crate::error::ServiceError;
use crate::query::{GraphQuery, Param};

/// Makes concurrent `MERGE (c:City {name: ...})` race-free on the server.
const CITY_NAME_CONSTRAINT: &str =
    "CREATE CONSTRAINT city_name IF NOT EXISTS FOR (c:City) REQUIRE c.name IS UNIQUE";

/// Connection settings for a Neo4j server.
#[derive(Debug, Clone)]
pub struct Neo4jConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
}

/// Session factory backed by a shared `neo4rs` connection pool.
#[derive(Clone)]
pub struct Neo4jStore {
    graph: Arc<Graph>,
}

impl Neo4jStore {
    /// Connects to the server and ensures the city uniqueness constraint.
    pub async fn connect(config: &Neo4jConfig) -> Result<Self, ServiceError> {
        let graph = Graph::new(&config.uri, &config.user, &config.password)
            .await
            .map_err(|e| ServiceError::Unavailable(e.to_string()))?;

        let store = Self {
            graph: Arc::new(graph),
        };
        store.ensure_schema().await;
        Ok(store)
    }

    async fn ensure_schema(&self) {
        if let Err(e) = self.graph.run(neo4rs::query(CITY_NAME_CONSTRAINT)).await {
            tracing::warn!(error = %e, "could not ensure City.name uniqueness constraint");
        }
    }
}

#[async_trait]
impl SessionFactory for Neo4jStore {
    fn backend(&self) -> &'static str {
        "neo4j"
    }

    async fn open(&self) -> Result<Box<dyn GraphSession>, ServiceError> {
        let txn = self
            .graph
            .start_txn()
            .await
            .map_err(|e| ServiceError::Unavailable(e.to_string()))?;
        Ok(Box::new(Neo4jSession {
            txn: Some(txn),
            failed: false,
        }))
    }
}

struct Neo4jSession {
    txn: Option<Txn>,
    failed: bool,
}

/// Bolt values for every bound parameter. Integers go out as Bolt
/// integers, never floats.
fn bolt_params(query: &GraphQuery) -> Vec<(&'static str, BoltType)> {
    query
        .params
        .iter()
        .map(|(name, value)| {
            let bolt = match value {
                Param::Int(v) => BoltType::from(*v),
                Param::Str(v) => BoltType::from(v.clone()),
            };
            (*name, bolt)
        })
        .collect()
}

fn to_bolt_query(query: &GraphQuery) -> Query {
    neo4rs::query(query.text).params(bolt_params(query))
}

/// Converts a Bolt value into JSON.
///
/// Nodes and relationships collapse to their property maps, so internal
/// element ids and labels never leave the store boundary.
fn bolt_to_json(value: &BoltType) -> serde_json::Value {
    use serde_json::Value;
    match value {
        BoltType::Null(_) => Value::Null,
        BoltType::Boolean(b) => Value::Bool(b.value),
        BoltType::Integer(i) => serde_json::json!(i.value),
        BoltType::Float(f) => serde_json::json!(f.value),
        BoltType::String(s) => Value::String(s.value.clone()),
        BoltType::List(items) => Value::Array(items.value.iter().map(bolt_to_json).collect()),
        BoltType::Map(map) => map_to_json(&map.value),
        BoltType::Node(node) => map_to_json(&node.properties.value),
        BoltType::Relation(rel) => map_to_json(&rel.properties.value),
        other => Value::String(format!("{other:?}")),
    }
}

fn map_to_json<'a>(
    entries: impl IntoIterator<Item = (&'a neo4rs::BoltString, &'a BoltType)>,
) -> serde_json::Value {
    serde_json::Value::Object(
        entries
            .into_iter()
            .map(|(k, v)| (k.value.clone(), bolt_to_json(v)))
            .collect(),
    )
}

impl Neo4jSession {
    async fn execute(&mut self, query: &GraphQuery) -> Result<Vec<Record>, ServiceError> {
        let txn = self
            .txn
            .as_mut()
            .ok_or_else(|| ServiceError::Internal("session already closed".to_string()))?;

        let mut stream = txn
            .execute(to_bolt_query(query))
            .await
            .map_err(|e| ServiceError::Query(e.to_string()))?;

        let mut records = Vec::new();
        while let Some(row) = stream
            .next(txn.handle())
            .await
            .map_err(|e| ServiceError::Query(e.to_string()))?
        {
            let value: BoltType = row
                .get(query.column)
                .map_err(|e| ServiceError::Projection(format!("column '{}': {e}", query.column)))?;
            records.push(Record::new().with(query.column, bolt_to_json(&value)));
        }
        Ok(records)
    }
}

#[async_trait]
impl GraphSession for Neo4jSession {
    async fn run(&mut self, query: &GraphQuery) -> Result<Vec<Record>, ServiceError> {
        let result = self.execute(query).await;
        if result.is_err() {
            self.failed = true;
        }
        result
    }

    async fn close(&mut self) -> Result<(), ServiceError> {
        let txn = self
            .txn
            .take()
            .ok_or_else(|| ServiceError::Internal("session already closed".to_string()))?;
        let outcome = if self.failed {
            txn.rollback().await
        } else {
            txn.commit().await
        };
        outcome.map_err(|e| ServiceError::Query(e.to_string()))
    }

    async fn abort(&mut self) -> Result<(), ServiceError> {
        self.failed = true;
        self.close().await
    }
}
