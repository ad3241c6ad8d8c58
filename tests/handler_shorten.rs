mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use shrtn::domain::repositories::UrlRepository;

#[tokio::test]
async fn test_shorten_success() {
    let (server, repo) = common::create_test_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://www.example.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "URL shortened successfully");

    let data = &json["data"];
    let code = data["short_code"].as_str().unwrap();
    assert_eq!(code.len(), 8);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(data["original_url"], "https://www.example.com");
    assert_eq!(data["short_url"], format!("{}/{}", common::BASE_URL, code));
    assert!(data["id"].as_i64().unwrap() > 0);
    assert!(data["created_at"].is_string());

    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_shorten_same_url_twice_gives_different_codes() {
    let (server, repo) = common::create_test_server();

    let first = common::shorten(&server, "https://www.example.com/page").await;
    let second = common::shorten(&server, "https://www.example.com/page").await;

    let first_code = first["data"]["short_code"].as_str().unwrap();
    let second_code = second["data"]["short_code"].as_str().unwrap();

    assert_ne!(first_code, second_code);
    assert_eq!(&first_code[..7], &second_code[..7]);
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_shorten_trims_and_encodes_url() {
    let (server, _repo) = common::create_test_server();

    let json = common::shorten(&server, "  https://example.com/a b  ").await;

    assert_eq!(json["data"]["original_url"], "https://example.com/a%20b");
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let (server, repo) = common::create_test_server();

    for url in [
        "not-a-url",
        "ftp://example.com/file",
        "javascript:alert(1)",
        "https://",
    ] {
        let response = server
            .post("/api/shorten")
            .json(&json!({ "url": url }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let json = response.json::<Value>();
        assert_eq!(json["success"], false, "{url}");
        assert_eq!(json["error"]["code"], "validation_error", "{url}");
    }

    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_shorten_url_too_long() {
    let (server, _repo) = common::create_test_server();

    let url = format!("https://example.com/{}", "a".repeat(2048));
    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": url }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_shorten_missing_url_field() {
    let (server, _repo) = common::create_test_server();

    let response = server.post("/api/shorten").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json = response.json::<Value>();
    assert_eq!(json["message"], "URL is required");
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_empty_url() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_shorten_wrong_url_type() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": 42 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_shorten_no_body() {
    let (server, _repo) = common::create_test_server();

    let response = server.post("/api/shorten").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["success"], false);
}

#[tokio::test]
async fn test_shorten_malformed_json() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/shorten")
        .content_type("application/json")
        .bytes("{\"url\": ".into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_shorten_text_plain_content_type() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/shorten")
        .text(r#"{"url": "https://www.example.com"}"#)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "Content-Type must be application/json"
    );
}

#[tokio::test]
async fn test_shorten_wrong_method() {
    let (server, _repo) = common::create_test_server();

    for response in [
        server.get("/api/shorten").await,
        server.put("/api/shorten").await,
        server.delete("/api/shorten").await,
    ] {
        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        let json = response.json::<Value>();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "method_not_allowed");
    }
}
