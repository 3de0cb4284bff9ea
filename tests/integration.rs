//! Integration tests for the PeopleGraph HTTP API.
//!
//! Each test starts a server backed by a fresh in-memory graph on an
//! ephemeral port and uses reqwest to exercise the endpoints.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;

use peoplegraph_server::{AppState, router};
use peoplegraph_service::ServiceState;
use peoplegraph_service::fixtures::{
    CITY_NAMES, FIRST_NAMES, FixedFixture, FixtureSource, RandomFixtures,
};
use peoplegraph_service::store::MemoryGraph;
use peoplegraph_service::types::PersonFixture;
use reqwest::Client;
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Boots a server over `graph` on an OS-assigned port.
/// Returns the base URL (e.g. "http://127.0.0.1:12345").
async fn spawn_server(graph: MemoryGraph, fixtures: Arc<dyn FixtureSource>) -> String {
    let service = ServiceState::with_memory_graph(graph, fixtures);
    let app = router(AppState::new(service, vec![]));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn camilo_in_bogota() -> Arc<dyn FixtureSource> {
    Arc::new(FixedFixture(PersonFixture {
        id: 42,
        name: "Camilo".to_string(),
        age: 30,
        city_name: "Bogotá".to_string(),
    }))
}

async fn get_json(client: &Client, url: String) -> (u16, Value) {
    let resp = client.get(url).send().await.unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

async fn create_person(client: &Client, base: &str) -> Value {
    let resp = client.post(format!("{base}/people")).send().await.unwrap();
    assert_eq!(resp.status(), 201);
    resp.json().await.unwrap()
}

// ---------------------------------------------------------------------------
// Root and health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn root_returns_message() {
    let base = spawn_server(MemoryGraph::new(), Arc::new(RandomFixtures)).await;
    let (status, body) = get_json(&Client::new(), format!("{base}/")).await;
    assert_eq!(status, 200);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn health_reports_memory_store() {
    let base = spawn_server(MemoryGraph::new(), Arc::new(RandomFixtures)).await;
    let (status, body) = get_json(&Client::new(), format!("{base}/health")).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
    assert!(body["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn request_id_generated_when_absent() {
    let base = spawn_server(MemoryGraph::new(), Arc::new(RandomFixtures)).await;
    let resp = Client::new().get(format!("{base}/")).send().await.unwrap();
    let request_id = resp
        .headers()
        .get("x-request-id")
        .expect("missing x-request-id");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn request_id_preserved_when_provided() {
    let base = spawn_server(MemoryGraph::new(), Arc::new(RandomFixtures)).await;
    let resp = Client::new()
        .get(format!("{base}/people"))
        .header("x-request-id", "trace-me-123")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["x-request-id"], "trace-me-123");
}

// ---------------------------------------------------------------------------
// Create and list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_person_with_fixed_fixture() {
    let graph = MemoryGraph::new();
    let base = spawn_server(graph.clone(), camilo_in_bogota()).await;
    let client = Client::new();

    let body = create_person(&client, &base).await;
    assert!(body["message"].is_string());
    assert_eq!(
        body["person"],
        json!({"personId": 42, "name": "Camilo", "age": 30, "city": "Bogotá"})
    );

    // Get-or-create: more people in the same city never add a second city.
    for _ in 0..4 {
        create_person(&client, &base).await;
    }
    let (status, body) = get_json(&client, format!("{base}/cities?page=1")).await;
    assert_eq!(status, 200);
    assert_eq!(body["results"], json!([{"name": "Bogotá"}]));
    assert_eq!(graph.city_count(), 1);
    assert_eq!(graph.lives_in(42).len(), 5);
    assert_eq!(graph.unlinked_people(), 0);
}

#[tokio::test]
async fn random_people_are_listed_with_their_city() {
    let graph = MemoryGraph::new();
    let base = spawn_server(graph.clone(), Arc::new(RandomFixtures)).await;
    let client = Client::new();

    for _ in 0..20 {
        let body = create_person(&client, &base).await;
        let person = &body["person"];
        let id = person["personId"].as_i64().unwrap();
        let age = person["age"].as_i64().unwrap();
        assert!((0..10_000).contains(&id));
        assert!((18..=98).contains(&age));
        assert!(FIRST_NAMES.contains(&person["name"].as_str().unwrap()));
        assert!(CITY_NAMES.contains(&person["city"].as_str().unwrap()));
    }

    let (status, body) = get_json(&client, format!("{base}/people")).await;
    assert_eq!(status, 200);
    assert_eq!(body["page"], 1);
    assert_eq!(body["perPage"], 50);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 20);
    for person in results {
        let keys: HashSet<&str> = person
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, HashSet::from(["personId", "name", "age", "city"]));
    }

    let (_, body) = get_json(&client, format!("{base}/cities")).await;
    let cities: HashSet<&str> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(cities.len(), graph.city_count());
    assert!(cities.iter().all(|c| CITY_NAMES.contains(c)));
}

#[tokio::test]
async fn pagination_splits_people_into_pages_of_fifty() {
    let base = spawn_server(MemoryGraph::new(), Arc::new(RandomFixtures)).await;
    let client = Client::new();
    for _ in 0..60 {
        create_person(&client, &base).await;
    }

    let (_, first) = get_json(&client, format!("{base}/people?page=1")).await;
    let (_, second) = get_json(&client, format!("{base}/people?page=2")).await;
    let (_, far) = get_json(&client, format!("{base}/people?page=999")).await;
    assert_eq!(first["results"].as_array().unwrap().len(), 50);
    assert_eq!(second["results"].as_array().unwrap().len(), 10);
    assert_eq!(second["page"], 2);
    assert!(far["results"].as_array().unwrap().is_empty());
    assert_eq!(far["page"], 999);

    for raw in ["0", "-1", "abc"] {
        let (status, body) = get_json(&client, format!("{base}/people?page={raw}")).await;
        assert_eq!(status, 200);
        assert_eq!(body["page"], 1, "page={raw}");
        assert_eq!(body["results"].as_array().unwrap().len(), 50);
    }
}

// ---------------------------------------------------------------------------
// Store failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn query_failure_returns_500_and_releases_session() {
    let graph = MemoryGraph::new();
    let base = spawn_server(graph.clone(), camilo_in_bogota()).await;
    let client = Client::new();
    graph.fail_queries(true);

    for (method, path) in [("GET", "/people"), ("GET", "/cities"), ("POST", "/people")] {
        let resp = client
            .request(method.parse().unwrap(), format!("{base}{path}"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 500, "{method} {path}");
        let body: Value = resp.json().await.unwrap();
        assert!(body["error"].is_string());
        assert!(body["details"].is_string());
    }

    assert_eq!(graph.sessions_opened(), 3);
    assert_eq!(graph.sessions_closed(), 3);
    assert_eq!(graph.person_count(), 0);
}

#[tokio::test]
async fn unreachable_store_returns_500() {
    let graph = MemoryGraph::new();
    let base = spawn_server(graph.clone(), camilo_in_bogota()).await;
    graph.refuse_sessions(true);

    let (status, body) = get_json(&Client::new(), format!("{base}/cities")).await;
    assert_eq!(status, 500);
    assert!(body["details"].as_str().unwrap().contains("unavailable"));

    // The server keeps serving once the store comes back.
    graph.refuse_sessions(false);
    let (status, _) = get_json(&Client::new(), format!("{base}/cities")).await;
    assert_eq!(status, 200);
}

// ---------------------------------------------------------------------------
// Debug routes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn forced_error_routes() {
    let base = spawn_server(MemoryGraph::new(), Arc::new(RandomFixtures)).await;
    let client = Client::new();

    let (status, body) = get_json(&client, format!("{base}/force-400")).await;
    assert_eq!(status, 400);
    assert!(body["error"].is_string());

    let (status, body) = get_json(&client, format!("{base}/force-404")).await;
    assert_eq!(status, 404);
    assert!(body["error"].is_string());

    let resp = client.get(format!("{base}/force-502")).send().await.unwrap();
    assert_eq!(resp.status(), 502);
    assert!(
        resp.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );
    assert!(!resp.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_route_is_404() {
    let base = spawn_server(MemoryGraph::new(), Arc::new(RandomFixtures)).await;
    let resp = Client::new()
        .get(format!("{base}/nope"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}
