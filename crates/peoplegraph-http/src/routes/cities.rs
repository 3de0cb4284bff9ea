//! City endpoints.

use axum::extract::{Json, RawQuery, State};

use peoplegraph_service::people::PeopleService;
use peoplegraph_service::types::{City, Page};

use crate::error::{ApiError, ErrorBody};
use crate::state::AppState;

use super::page_param;

/// List cities.
///
/// Same paging rules as `GET /people`.
#[utoipa::path(
    get,
    path = "/cities",
    params(("page" = Option<String>, Query, description = "1-based page number")),
    responses(
        (status = 200, description = "One page of cities", body = Page<City>),
        (status = 500, description = "Graph store failure", body = ErrorBody),
    ),
    tag = "Cities"
)]
pub async fn list_cities(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Page<City>>, ApiError> {
    let page = page_param(query.as_deref());
    let cities = PeopleService::list_cities(state.sessions(), page.as_deref())
        .await
        .inspect_err(|e| tracing::error!(error = %e, "failed to list cities"))?;
    Ok(Json(cities))
}
