//! In-memory graph store, used when no Neo4j URI is configured and in tests.
//!
//! Executes the same [`QueryKind`] operations as the Cypher backend. The
//! whole graph sits behind one mutex, so get-or-create of a city and the
//! creation of a person with its `LIVES_IN` edge are atomic.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;

use super::{GraphSession, Record, SessionFactory};
use crate::error::ServiceError;
use crate::query::{GraphQuery, QueryKind};

struct PersonNode {
    node_id: u64,
    person_id: i64,
    name: String,
    age: i64,
}

struct CityNode {
    node_id: u64,
    name: String,
}

/// Directed `(:Person)-[:LIVES_IN]->(:City)` edge, by node id.
struct LivesIn {
    person: u64,
    city: u64,
}

#[derive(Default)]
struct GraphData {
    next_node_id: u64,
    people: Vec<PersonNode>,
    cities: Vec<CityNode>,
    lives_in: Vec<LivesIn>,
}

impl GraphData {
    fn allocate_id(&mut self) -> u64 {
        let id = self.next_node_id;
        self.next_node_id += 1;
        id
    }

    fn city(&self, node_id: u64) -> Option<&CityNode> {
        self.cities.iter().find(|c| c.node_id == node_id)
    }

    fn person(&self, node_id: u64) -> Option<&PersonNode> {
        self.people.iter().find(|p| p.node_id == node_id)
    }

    fn merge_city(&mut self, name: &str) -> u64 {
        if let Some(city) = self.cities.iter().find(|c| c.name == name) {
            return city.node_id;
        }
        let node_id = self.allocate_id();
        self.cities.push(CityNode {
            node_id,
            name: name.to_string(),
        });
        node_id
    }
}

#[derive(Default)]
struct Shared {
    graph: Mutex<GraphData>,
    opened: AtomicUsize,
    closed: AtomicUsize,
    refuse_sessions: AtomicBool,
    fail_queries: AtomicBool,
}

/// Cloneable handle to an in-memory graph. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryGraph {
    shared: Arc<Shared>,
}

impl MemoryGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of city nodes.
    pub fn city_count(&self) -> usize {
        self.shared.graph.lock().cities.len()
    }

    /// Number of person nodes.
    pub fn person_count(&self) -> usize {
        self.shared.graph.lock().people.len()
    }

    /// Names of the cities every person with `person_id` lives in, one entry
    /// per `LIVES_IN` edge.
    pub fn lives_in(&self, person_id: i64) -> Vec<String> {
        let graph = self.shared.graph.lock();
        graph
            .lives_in
            .iter()
            .filter(|edge| {
                graph
                    .person(edge.person)
                    .is_some_and(|p| p.person_id == person_id)
            })
            .filter_map(|edge| graph.city(edge.city).map(|c| c.name.clone()))
            .collect()
    }

    /// Number of person nodes without exactly one `LIVES_IN` edge.
    pub fn unlinked_people(&self) -> usize {
        let graph = self.shared.graph.lock();
        graph
            .people
            .iter()
            .filter(|p| {
                graph
                    .lives_in
                    .iter()
                    .filter(|edge| edge.person == p.node_id)
                    .count()
                    != 1
            })
            .count()
    }

    /// Sessions opened so far.
    pub fn sessions_opened(&self) -> usize {
        self.shared.opened.load(Ordering::SeqCst)
    }

    /// Sessions closed so far.
    pub fn sessions_closed(&self) -> usize {
        self.shared.closed.load(Ordering::SeqCst)
    }

    /// Makes `open` fail, simulating an unreachable store.
    pub fn refuse_sessions(&self, refuse: bool) {
        self.shared.refuse_sessions.store(refuse, Ordering::SeqCst);
    }

    /// Makes every query fail after the session has been opened.
    pub fn fail_queries(&self, fail: bool) {
        self.shared.fail_queries.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl SessionFactory for MemoryGraph {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn open(&self) -> Result<Box<dyn GraphSession>, ServiceError> {
        if self.shared.refuse_sessions.load(Ordering::SeqCst) {
            return Err(ServiceError::Unavailable(
                "in-memory store is refusing sessions".to_string(),
            ));
        }
        self.shared.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemorySession {
            shared: Arc::clone(&self.shared),
            open: true,
        }))
    }
}

struct MemorySession {
    shared: Arc<Shared>,
    open: bool,
}

/// Clamps a skip/limit parameter into a usable `usize`.
fn window_bound(value: i64) -> usize {
    usize::try_from(value.max(0)).unwrap_or(usize::MAX)
}

fn page_window(query: &GraphQuery) -> Result<(usize, usize), ServiceError> {
    Ok((
        window_bound(query.int_param("skip")?),
        window_bound(query.int_param("limit")?),
    ))
}

impl MemorySession {
    fn execute(&self, query: &GraphQuery) -> Result<Vec<Record>, ServiceError> {
        match query.kind {
            QueryKind::ListPeople => {
                let (skip, limit) = page_window(query)?;
                let graph = self.shared.graph.lock();
                Ok(graph
                    .lives_in
                    .iter()
                    .filter_map(|edge| Some((graph.person(edge.person)?, graph.city(edge.city)?)))
                    .skip(skip)
                    .take(limit)
                    .map(|(p, c)| person_record(query.column, p, &c.name))
                    .collect())
            }
            QueryKind::ListCities => {
                let (skip, limit) = page_window(query)?;
                let graph = self.shared.graph.lock();
                Ok(graph
                    .cities
                    .iter()
                    .skip(skip)
                    .take(limit)
                    .map(|c| Record::new().with(query.column, json!({ "name": c.name })))
                    .collect())
            }
            QueryKind::CreatePerson => {
                let city_name = query.str_param("cityName")?;
                let person = PersonNode {
                    node_id: 0,
                    person_id: query.int_param("id")?,
                    name: query.str_param("name")?.to_string(),
                    age: query.int_param("age")?,
                };

                let mut graph = self.shared.graph.lock();
                let city = graph.merge_city(city_name);
                let node_id = graph.allocate_id();
                graph.people.push(PersonNode { node_id, ..person });
                graph.lives_in.push(LivesIn {
                    person: node_id,
                    city,
                });

                let created = graph
                    .person(node_id)
                    .ok_or_else(|| ServiceError::Internal("created person vanished".into()))?;
                Ok(vec![person_record(query.column, created, city_name)])
            }
            QueryKind::CountCities => {
                let total = self.shared.graph.lock().cities.len();
                Ok(vec![Record::new().with(query.column, json!(total))])
            }
        }
    }
}

fn person_record(column: &str, person: &PersonNode, city: &str) -> Record {
    Record::new().with(
        column,
        json!({
            "personId": person.person_id,
            "name": person.name,
            "age": person.age,
            "city": city,
        }),
    )
}

#[async_trait]
impl GraphSession for MemorySession {
    async fn run(&mut self, query: &GraphQuery) -> Result<Vec<Record>, ServiceError> {
        if !self.open {
            return Err(ServiceError::Internal("session already closed".to_string()));
        }
        if self.shared.fail_queries.load(Ordering::SeqCst) {
            return Err(ServiceError::Query(format!(
                "in-memory store rejected {:?}",
                query.kind
            )));
        }
        self.execute(query)
    }

    async fn close(&mut self) -> Result<(), ServiceError> {
        if !self.open {
            return Err(ServiceError::Internal("session already closed".to_string()));
        }
        self.open = false;
        self.shared.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
