//! Parameterized graph queries for every store operation.
//!
//! Query text is static; caller- and generator-supplied values only ever
//! travel as bound parameters. Each query also carries a [`QueryKind`] so
//! backends that do not speak Cypher (the in-memory store) can dispatch on
//! the operation instead of parsing text.

use crate::error::ServiceError;
use crate::pagination::Pagination;
use crate::types::PersonFixture;

/// Result column holding a projected person.
pub const PERSON_COLUMN: &str = "person";
/// Result column holding a projected city.
pub const CITY_COLUMN: &str = "city";
/// Result column holding a count.
pub const TOTAL_COLUMN: &str = "total";

const LIST_PEOPLE: &str = "\
MATCH (p:Person)-[:LIVES_IN]->(c:City)
RETURN p {.*, city: c.name} AS person
SKIP $skip LIMIT $limit";

const LIST_CITIES: &str = "\
MATCH (c:City)
RETURN c {.*} AS city
SKIP $skip LIMIT $limit";

const CREATE_PERSON: &str = "\
MERGE (c:City {name: $cityName})
CREATE (p:Person {personId: $id, name: $name, age: $age})
MERGE (p)-[:LIVES_IN]->(c)
RETURN p {.*, city: c.name} AS person";

const COUNT_CITIES: &str = "\
MATCH (c:City)
RETURN count(c) AS total";

/// The store operation a [`GraphQuery`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    ListPeople,
    ListCities,
    CreatePerson,
    CountCities,
}

/// A bound query parameter.
///
/// Integers stay integers all the way to the store: binding skip/limit as
/// floats makes Cypher reject the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Int(i64),
    Str(String),
}

/// Query text plus its bound parameters and the column each row returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphQuery {
    pub kind: QueryKind,
    pub text: &'static str,
    pub params: Vec<(&'static str, Param)>,
    pub column: &'static str,
}

impl GraphQuery {
    /// Looks up a bound parameter by name.
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params
            .iter()
            .find_map(|(key, value)| (*key == name).then_some(value))
    }

    /// Returns an integer parameter, failing if it is absent or not an integer.
    pub fn int_param(&self, name: &str) -> Result<i64, ServiceError> {
        match self.param(name) {
            Some(Param::Int(v)) => Ok(*v),
            Some(Param::Str(_)) => Err(ServiceError::Query(format!(
                "parameter '{name}' must be an integer"
            ))),
            None => Err(ServiceError::Query(format!("missing parameter '{name}'"))),
        }
    }

    /// Returns a string parameter, failing if it is absent or not a string.
    pub fn str_param(&self, name: &str) -> Result<&str, ServiceError> {
        match self.param(name) {
            Some(Param::Str(v)) => Ok(v),
            Some(Param::Int(_)) => Err(ServiceError::Query(format!(
                "parameter '{name}' must be a string"
            ))),
            None => Err(ServiceError::Query(format!("missing parameter '{name}'"))),
        }
    }
}

fn page_params(page: Pagination) -> Vec<(&'static str, Param)> {
    vec![
        ("skip", Param::Int(page.skip)),
        ("limit", Param::Int(page.limit)),
    ]
}

/// Lists people with the name of the city each one lives in.
///
/// No sort key is applied; ordering is whatever the store returns.
pub fn list_people(page: Pagination) -> GraphQuery {
    GraphQuery {
        kind: QueryKind::ListPeople,
        text: LIST_PEOPLE,
        params: page_params(page),
        column: PERSON_COLUMN,
    }
}

/// Lists cities.
pub fn list_cities(page: Pagination) -> GraphQuery {
    GraphQuery {
        kind: QueryKind::ListCities,
        text: LIST_CITIES,
        params: page_params(page),
        column: CITY_COLUMN,
    }
}

/// Creates a person, getting or creating their city and linking the two in
/// a single statement.
pub fn create_person(fixture: &PersonFixture) -> GraphQuery {
    GraphQuery {
        kind: QueryKind::CreatePerson,
        text: CREATE_PERSON,
        params: vec![
            ("cityName", Param::Str(fixture.city_name.clone())),
            ("id", Param::Int(fixture.id)),
            ("name", Param::Str(fixture.name.clone())),
            ("age", Param::Int(fixture.age)),
        ],
        column: PERSON_COLUMN,
    }
}

/// Counts city nodes.
pub fn count_cities() -> GraphQuery {
    GraphQuery {
        kind: QueryKind::CountCities,
        text: COUNT_CITIES,
        params: Vec::new(),
        column: TOTAL_COLUMN,
    }
}
