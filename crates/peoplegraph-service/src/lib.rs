//! PeopleGraph Service: core business logic for the people/cities facade.
//!
//! This crate contains all transport-agnostic logic: pagination, query
//! construction, result projection, fixture generation and the graph
//! session provider with its in-memory and Neo4j backends.
//!
//! **Zero transport dependencies**: no axum, no HTTP types.

pub mod error;
pub mod fixtures;
pub mod pagination;
pub mod people;
pub mod project;
pub mod query;
pub mod store;
pub mod types;

use std::sync::Arc;
use std::time::Instant;

use error::ServiceError;
use fixtures::{FixtureSource, RandomFixtures, SeededFixtures};
use store::{MemoryGraph, SessionFactory};

#[cfg(feature = "neo4j")]
pub use store::neo4j::Neo4jConfig;

/// Configuration subset relevant to the service layer.
///
/// Transport-specific config (host, port, CORS origins) stays in the
/// binary crate's `Config` struct.
#[derive(Default)]
pub struct ServiceConfig {
    /// Neo4j connection URI. `None` selects the in-memory store.
    pub neo4j_uri: Option<String>,
    pub neo4j_user: String,
    pub neo4j_password: String,
    /// Seed for reproducible fixtures. `None` uses the thread RNG.
    pub fixture_seed: Option<u64>,
}

/// Shared service state, cloneable across all transport handlers.
#[derive(Clone)]
pub struct ServiceState {
    inner: Arc<Inner>,
}

struct Inner {
    sessions: Arc<dyn SessionFactory>,
    fixtures: Arc<dyn FixtureSource>,
    start_time: Instant,
}

impl ServiceState {
    /// Creates a service state from explicit collaborators.
    pub fn new(sessions: Arc<dyn SessionFactory>, fixtures: Arc<dyn FixtureSource>) -> Self {
        Self {
            inner: Arc::new(Inner {
                sessions,
                fixtures,
                start_time: Instant::now(),
            }),
        }
    }

    /// Builds the state from config, connecting to Neo4j when a URI is set.
    pub async fn connect(config: &ServiceConfig) -> Result<Self, ServiceError> {
        let fixtures: Arc<dyn FixtureSource> = match config.fixture_seed {
            Some(seed) => Arc::new(SeededFixtures::new(seed)),
            None => Arc::new(RandomFixtures),
        };
        let sessions = open_store(config).await?;
        Ok(Self::new(sessions, fixtures))
    }

    /// Creates an in-memory service state (for tests and ephemeral use).
    pub fn new_in_memory() -> Self {
        Self::with_memory_graph(MemoryGraph::new(), Arc::new(RandomFixtures))
    }

    /// Creates a state over an existing in-memory graph, so callers can
    /// inspect the graph afterwards.
    pub fn with_memory_graph(graph: MemoryGraph, fixtures: Arc<dyn FixtureSource>) -> Self {
        Self::new(Arc::new(graph), fixtures)
    }

    /// Returns the session factory.
    pub fn sessions(&self) -> &dyn SessionFactory {
        self.inner.sessions.as_ref()
    }

    /// Returns the fixture source.
    pub fn fixtures(&self) -> &dyn FixtureSource {
        self.inner.fixtures.as_ref()
    }

    /// Returns the service uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.inner.start_time.elapsed().as_secs()
    }
}

#[cfg(feature = "neo4j")]
async fn open_store(config: &ServiceConfig) -> Result<Arc<dyn SessionFactory>, ServiceError> {
    match &config.neo4j_uri {
        Some(uri) => {
            let store = store::Neo4jStore::connect(&Neo4jConfig {
                uri: uri.clone(),
                user: config.neo4j_user.clone(),
                password: config.neo4j_password.clone(),
            })
            .await?;
            Ok(Arc::new(store))
        }
        None => Ok(Arc::new(MemoryGraph::new())),
    }
}

#[cfg(not(feature = "neo4j"))]
async fn open_store(config: &ServiceConfig) -> Result<Arc<dyn SessionFactory>, ServiceError> {
    match &config.neo4j_uri {
        Some(_) => Err(ServiceError::Unavailable(
            "this build has no Neo4j support; rebuild with the `neo4j` feature".to_string(),
        )),
        None => Ok(Arc::new(MemoryGraph::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_without_uri_uses_memory_store() {
        let state = ServiceState::connect(&ServiceConfig::default())
            .await
            .unwrap();
        assert_eq!(state.sessions().backend(), "memory");
    }

    #[tokio::test]
    async fn seeded_config_is_reproducible() {
        let config = ServiceConfig {
            fixture_seed: Some(3),
            ..ServiceConfig::default()
        };
        let a = ServiceState::connect(&config).await.unwrap();
        let b = ServiceState::connect(&config).await.unwrap();
        assert_eq!(a.fixtures().next_person(), b.fixtures().next_person());
    }
}
