#![allow(dead_code)]

use axum_test::TestServer;
use shrtn::domain::repositories::UrlRepository;
use shrtn::infrastructure::persistence::InMemoryUrlRepository;
use shrtn::routes::router;
use shrtn::state::AppState;
use std::sync::Arc;

pub const BASE_URL: &str = "https://sho.rt";

pub fn create_test_state() -> (AppState, Arc<InMemoryUrlRepository>) {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let state = AppState::new(repo.clone() as Arc<dyn UrlRepository>, BASE_URL);
    (state, repo)
}

pub fn create_test_server() -> (TestServer, Arc<InMemoryUrlRepository>) {
    let (state, repo) = create_test_state();
    let server = TestServer::new(router(state)).unwrap();
    (server, repo)
}

pub async fn shorten(server: &TestServer, url: &str) -> serde_json::Value {
    let response = server
        .post("/api/shorten")
        .json(&serde_json::json!({ "url": url }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<serde_json::Value>()
}
