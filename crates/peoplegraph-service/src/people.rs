//! People and city operations.
//!
//! Every operation is one query in one freshly opened session. The session
//! is released on every exit path, including a cancelled or panicking
//! request. When the query succeeded, a failed close fails the operation;
//! when the query failed, its own error wins and the close failure is only
//! logged.

use crate::error::ServiceError;
use crate::fixtures::FixtureSource;
use crate::pagination::{Pagination, resolve_page};
use crate::project::{project_city, project_person, project_total};
use crate::query::{self, GraphQuery};
use crate::store::{GraphSession, Record, SessionFactory};
use crate::types::{City, Page, Person};

/// Stateless method collection; state is borrowed from `ServiceState`.
pub struct PeopleService;

impl PeopleService {
    /// Lists one page of people with their city names.
    pub async fn list_people(
        sessions: &dyn SessionFactory,
        raw_page: Option<&str>,
    ) -> Result<Page<Person>, ServiceError> {
        let page = resolve_page(raw_page);
        let records = Self::run(sessions, &query::list_people(page)).await?;
        paginate(page, &records, project_person)
    }

    /// Lists one page of cities.
    pub async fn list_cities(
        sessions: &dyn SessionFactory,
        raw_page: Option<&str>,
    ) -> Result<Page<City>, ServiceError> {
        let page = resolve_page(raw_page);
        let records = Self::run(sessions, &query::list_cities(page)).await?;
        paginate(page, &records, project_city)
    }

    /// Creates a person from the next fixture, linked to its (possibly new) city.
    pub async fn create_person(
        sessions: &dyn SessionFactory,
        fixtures: &dyn FixtureSource,
    ) -> Result<Person, ServiceError> {
        let fixture = fixtures.next_person();
        tracing::debug!(
            person_id = fixture.id,
            city = %fixture.city_name,
            "creating person"
        );
        let records = Self::run(sessions, &query::create_person(&fixture)).await?;
        let record = records
            .first()
            .ok_or_else(|| ServiceError::Internal("create returned no record".to_string()))?;
        project_person(record)
    }

    /// Counts city nodes.
    pub async fn count_cities(sessions: &dyn SessionFactory) -> Result<i64, ServiceError> {
        let records = Self::run(sessions, &query::count_cities()).await?;
        records.first().map_or(Ok(0), project_total)
    }

    /// Opens a session, runs `query`, and always releases the session again.
    async fn run(
        sessions: &dyn SessionFactory,
        query: &GraphQuery,
    ) -> Result<Vec<Record>, ServiceError> {
        let mut session = SessionGuard::open(sessions).await?;
        let result = session.run(query).await;
        let closed = session.close().await;
        match (result, closed) {
            (Ok(rows), Ok(())) => Ok(rows),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), closed) => {
                if let Err(close_err) = closed {
                    tracing::warn!(
                        backend = sessions.backend(),
                        kind = ?query.kind,
                        error = %close_err,
                        "failed to close graph session"
                    );
                }
                Err(e)
            }
        }
    }
}

/// Owns an open session until it is closed.
///
/// Dropping a guard that still holds its session (the request future was
/// cancelled, or the query panicked) aborts the session on a background
/// task.
struct SessionGuard {
    session: Option<Box<dyn GraphSession>>,
    backend: &'static str,
}

impl SessionGuard {
    async fn open(sessions: &dyn SessionFactory) -> Result<Self, ServiceError> {
        Ok(Self {
            session: Some(sessions.open().await?),
            backend: sessions.backend(),
        })
    }

    async fn run(&mut self, query: &GraphQuery) -> Result<Vec<Record>, ServiceError> {
        match self.session.as_mut() {
            Some(session) => session.run(query).await,
            None => Err(ServiceError::Internal("session already closed".to_string())),
        }
    }

    async fn close(&mut self) -> Result<(), ServiceError> {
        let result = match self.session.as_mut() {
            Some(session) => session.close().await,
            None => return Ok(()),
        };
        self.session = None;
        result
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        let backend = self.backend;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = session.abort().await {
                        tracing::warn!(backend, error = %e, "failed to abort graph session");
                    }
                });
            }
            Err(_) => {
                tracing::warn!(backend, "graph session dropped outside a runtime; not released");
            }
        }
    }
}

fn paginate<T>(
    page: Pagination,
    records: &[Record],
    project: fn(&Record) -> Result<T, ServiceError>,
) -> Result<Page<T>, ServiceError> {
    Ok(Page {
        page: page.page,
        per_page: page.limit,
        results: records.iter().map(project).collect::<Result<_, _>>()?,
    })
}
