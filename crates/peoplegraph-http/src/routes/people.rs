//! Person endpoints.

use axum::extract::{Json, RawQuery, State};
use axum::http::StatusCode;

use peoplegraph_service::people::PeopleService;
use peoplegraph_service::types::{Page, Person};

use crate::error::{ApiError, ErrorBody};
use crate::state::AppState;
use crate::types::CreatedPerson;

use super::page_param;

/// Message returned with a newly created person.
pub const CREATED_MESSAGE: &str = "Person created successfully";

/// List people.
///
/// Returns one page of people, each with the name of the city they live in.
/// Pages hold 50 people; a missing or invalid `page` means page 1. Order is
/// not guaranteed between calls.
#[utoipa::path(
    get,
    path = "/people",
    params(("page" = Option<String>, Query, description = "1-based page number")),
    responses(
        (status = 200, description = "One page of people", body = Page<Person>),
        (status = 500, description = "Graph store failure", body = ErrorBody),
    ),
    tag = "People"
)]
pub async fn list_people(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Page<Person>>, ApiError> {
    let page = page_param(query.as_deref());
    let people = PeopleService::list_people(state.sessions(), page.as_deref())
        .await
        .inspect_err(|e| tracing::error!(error = %e, "failed to list people"))?;
    Ok(Json(people))
}

/// Create a random person.
///
/// Generates a person with random attributes and links them to one of a
/// fixed set of cities, creating the city if it does not exist yet.
#[utoipa::path(
    post,
    path = "/people",
    responses(
        (status = 201, description = "Person created", body = CreatedPerson),
        (status = 500, description = "Graph store failure", body = ErrorBody),
    ),
    tag = "People"
)]
pub async fn create_person(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreatedPerson>), ApiError> {
    let person = PeopleService::create_person(state.sessions(), state.fixtures())
        .await
        .inspect_err(|e| tracing::error!(error = %e, "failed to create person"))?;
    tracing::info!(person_id = person.person_id, city = %person.city, "person created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedPerson {
            message: CREATED_MESSAGE.to_string(),
            person,
        }),
    ))
}
