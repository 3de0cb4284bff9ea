//! PeopleGraph HTTP: REST API transport adapter.
//!
//! Provides the HTTP interface:
//! - Paginated people and city listings
//! - Random person creation
//! - Forced-status debug endpoints
//! - Health and OpenAPI description
//! - Request-ID, tracing, compression and CORS layers

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod types;

use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use error::ErrorBody;

pub use state::AppState;

// ---------------------------------------------------------------------------
// OpenAPI
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PeopleGraph API",
        description = "HTTP facade over a graph of people and the cities they live in.\n\nListings are paginated in fixed pages of 50; creation generates random attributes.",
        version = "0.1.0",
        license(name = "Apache-2.0"),
    ),
    paths(
        routes::system::root,
        routes::system::health,
        routes::people::list_people,
        routes::people::create_person,
        routes::cities::list_cities,
        routes::debug::force_400,
        routes::debug::force_404,
        routes::debug::force_502,
    ),
    components(
        schemas(
            types::MessageResponse,
            types::CreatedPerson, types::HealthResponse, ErrorBody,
            peoplegraph_service::types::Person, peoplegraph_service::types::City,
        )
    ),
    tags(
        (name = "People", description = "List and create people"),
        (name = "Cities", description = "List cities"),
        (name = "Debug", description = "Endpoints that always fail with a fixed status"),
        (name = "System", description = "System and health endpoints"),
    )
)]
pub(crate) struct ApiDoc;

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Builds the HTTP API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::system::root))
        .route(
            "/people",
            get(routes::people::list_people).post(routes::people::create_person),
        )
        .route("/cities", get(routes::cities::list_cities))
        // Debug
        .route("/force-400", get(routes::debug::force_400))
        .route("/force-404", get(routes::debug::force_404))
        .route("/force-502", get(routes::debug::force_502))
        // System
        .route("/health", get(routes::system::health))
        .route("/api/openapi.json", get(routes::system::openapi))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(
            middleware::request_id::request_id_middleware,
        ))
        .layer(cors_layer(&state))
        .with_state(state)
}

/// Serve the HTTP router on the given listener with graceful shutdown.
pub async fn serve(
    listener: tokio::net::TcpListener,
    app: Router,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let origins = state.cors_origins();

    // No origins configured → no CORS headers (deny cross-origin by default).
    if origins.is_empty() {
        return CorsLayer::new();
    }

    let x_request_id = middleware::request_id::X_REQUEST_ID.clone();
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE, x_request_id.clone()])
        .expose_headers([x_request_id]);

    if origins.len() == 1 && origins[0] == "*" {
        tracing::warn!("CORS configured with wildcard origin, all cross-origin requests allowed");
        return base.allow_origin(tower_http::cors::Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(parsed)
}
