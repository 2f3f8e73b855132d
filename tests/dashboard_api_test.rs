//! End-to-end tests for the dashboard API over the in-memory document store.
//!
//! Run with: `cargo test --test dashboard_api_test`

use std::net::SocketAddr;
use std::sync::Arc;

use labdash::config::{AppConfig, DocumentBackend};
use labdash::models::document::Document;
use labdash::services::auth::issue_token;
use labdash::store::{Documents, MemoryDocumentStore, EXPERIMENTS, STUDENTS, USERS};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;

const JWT_SECRET: &str = "test-jwt-secret-for-integration-tests-only";

fn test_config() -> AppConfig {
    AppConfig {
        document_backend: DocumentBackend::Memory,
        database_url: None,
        database_max_connections: 1,
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: JWT_SECRET.to_string(),
        frontend_url: "http://localhost:5173".to_string(),
    }
}

async fn put(store: &MemoryDocumentStore, collection: &str, id: &str, value: Value) {
    store
        .insert(collection, Document::from_value(id, value).unwrap())
        .await;
}

/// Faculty `fac-1` with 3 students (sectionA x2, sectionB x1) and 2
/// experiments, plus unrelated data for `fac-2` and one student profile.
async fn seeded_store() -> Arc<MemoryDocumentStore> {
    let store = Arc::new(MemoryDocumentStore::new());
    put(&store, USERS, "fac-1", json!({ "role": "faculty" })).await;
    put(&store, USERS, "fac-broken", json!({ "role": "faculty" })).await;
    put(
        &store,
        USERS,
        "stu-1",
        json!({
            "role": "student",
            "experimentsCompleted": ["e1", "e2", "e3", "e4", "e5"],
            "vivaScores": { "q1": 4, "q2": 5 }
        }),
    )
    .await;

    let student = |faculty: &str, section: &str, completed: Value| {
        json!({ "facultyId": faculty, "section": section, "experimentsCompleted": completed })
    };
    let students = [
        ("s1", student("fac-1", "sectionA", json!(["e1"]))),
        ("s2", student("fac-1", "sectionA", json!(["e1", "e2"]))),
        ("s3", student("fac-1", "sectionB", json!([]))),
        ("s4", json!({ "facultyId": "fac-2", "section": "sectionZ" })),
        ("s5", json!({ "facultyId": "fac-broken", "experimentsCompleted": "oops" })),
    ];
    for (id, value) in students {
        put(&store, STUDENTS, id, value).await;
    }
    put(&store, EXPERIMENTS, "e1", json!({ "facultyId": "fac-1" })).await;
    put(&store, EXPERIMENTS, "e2", json!({ "facultyId": "fac-1" })).await;
    store
}

/// Spin up the full Axum app on a random port, returning the base URL and a
/// handle to stop the server.
async fn start_server(store: Arc<MemoryDocumentStore>) -> (String, tokio::task::JoinHandle<()>) {
    let state = labdash::AppState {
        documents: Documents::Memory(store),
        config: test_config(),
    };
    let app = labdash::routes::router(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}");

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    (base_url, handle)
}

async fn get_json(client: &Client, url: String, uid: Option<&str>) -> Value {
    let mut req = client.get(url);
    if let Some(uid) = uid {
        req = req.bearer_auth(issue_token(uid, JWT_SECRET, 300).unwrap());
    }
    let resp = req.send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.unwrap()
}

fn slices(chart: &Value) -> Vec<(String, u64)> {
    chart
        .as_array()
        .unwrap()
        .iter()
        .map(|s| (s["label"].as_str().unwrap().to_string(), s["count"].as_u64().unwrap()))
        .collect()
}

fn pairs(items: &[(&str, u64)]) -> Vec<(String, u64)> {
    items.iter().map(|(l, c)| (l.to_string(), *c)).collect()
}

#[tokio::test]
async fn health_endpoints() {
    let (base, _handle) = start_server(seeded_store().await).await;
    let client = Client::new();

    let resp = client.get(format!("{base}/health/live")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "OK");

    let body = get_json(&client, format!("{base}/health/ready"), None).await;
    assert_eq!(body["data"]["backend"], "memory");
    assert_eq!(body["data"]["database"], "connected");
}

#[tokio::test]
async fn faculty_dashboard_stats() {
    let (base, _handle) = start_server(seeded_store().await).await;
    let client = Client::new();

    let body = get_json(&client, format!("{base}/api/v1/dashboard/stats"), Some("fac-1")).await;
    assert!(body["error"].is_null());
    let stats = &body["data"];

    assert_eq!(stats["totalStudents"], 3);
    assert_eq!(stats["totalExperiments"], 2);
    assert_eq!(stats["completedExperiments"], 3);
    assert_eq!(stats["vivaAttempts"], 0);
    assert_eq!(
        slices(&stats["sectionBreakdown"]),
        pairs(&[("sectionA", 2), ("sectionB", 1)])
    );
    assert_eq!(
        slices(&stats["experimentProgress"]),
        pairs(&[("Completed", 3), ("Pending", 3)])
    );
    assert_eq!(
        slices(&stats["vivaProgress"]),
        pairs(&[("Attempted", 30), ("Not Attempted", 70)])
    );
    assert_eq!(stats["sectionBreakdown"][0]["color"], "#0088FE");
}

#[tokio::test]
async fn faculty_dashboard_layout() {
    let (base, _handle) = start_server(seeded_store().await).await;
    let client = Client::new();

    let body = get_json(&client, format!("{base}/api/v1/dashboard"), Some("fac-1")).await;
    let layout = &body["data"];

    assert_eq!(layout["role"], "faculty");
    assert_eq!(layout["cards"].as_array().unwrap().len(), 4);
    assert_eq!(layout["cards"][0]["title"], "Total Students");
    assert_eq!(layout["cards"][0]["value"], 3);
    let charts: Vec<&str> = layout["charts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        charts,
        vec!["Section Distribution", "Experiment Progress", "Viva Progress"]
    );
    assert_eq!(layout["recentActivity"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn student_dashboard_stats() {
    let (base, _handle) = start_server(seeded_store().await).await;
    let client = Client::new();

    let body = get_json(&client, format!("{base}/api/v1/dashboard/stats"), Some("stu-1")).await;
    let stats = &body["data"];

    assert_eq!(stats["completedExperiments"], 5);
    assert_eq!(stats["vivaAttempts"], 2);
    assert_eq!(stats["totalExperiments"], 5);
    assert_eq!(
        slices(&stats["experimentProgress"]),
        pairs(&[("Completed", 5), ("Remaining", 0)])
    );
    assert_eq!(
        slices(&stats["vivaProgress"]),
        pairs(&[("Attempted", 2), ("Remaining", 3)])
    );
}

#[tokio::test]
async fn no_profile_returns_no_data() {
    let (base, _handle) = start_server(seeded_store().await).await;
    let client = Client::new();

    // No token.
    let body = get_json(&client, format!("{base}/api/v1/dashboard"), None).await;
    assert!(body["data"].is_null());
    assert!(body["error"].is_null());

    // Valid token, but no profile document.
    let body = get_json(&client, format!("{base}/api/v1/dashboard"), Some("ghost")).await;
    assert!(body["data"].is_null());

    // Token signed with the wrong secret.
    let forged = issue_token("fac-1", "wrong-secret", 300).unwrap();
    let resp = client
        .get(format!("{base}/api/v1/dashboard/stats"))
        .bearer_auth(forged)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn fetch_failure_degrades_to_zeroed_dashboard() {
    let (base, _handle) = start_server(seeded_store().await).await;
    let client = Client::new();

    let body = get_json(&client, format!("{base}/api/v1/dashboard"), Some("fac-broken")).await;
    assert!(body["error"].is_null());
    let layout = &body["data"];

    assert_eq!(layout["role"], "faculty");
    assert_eq!(layout["stats"]["totalStudents"], 0);
    assert_eq!(layout["stats"]["completedExperiments"], 0);
    assert!(layout["cards"]
        .as_array()
        .unwrap()
        .iter()
        .all(|c| c["value"] == 0));
    // Zeroed state has empty breakdowns, so no section chart.
    assert_eq!(layout["charts"].as_array().unwrap().len(), 2);
}
