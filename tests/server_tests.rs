use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use tower::ServiceExt;
use word_ladder::server::{app, router, AppState};
use word_ladder::{DictionaryStore, ServerConfig, WordIndex};

fn test_app(words: &[&str]) -> Router {
    router(test_state(words))
}

fn test_state(words: &[&str]) -> AppState {
    let store = Arc::new(DictionaryStore::new(WordIndex::build(words)));
    AppState::new(store, StdRng::seed_from_u64(9), Duration::from_secs(5))
}

fn cors_config(origin: &str) -> ServerConfig {
    ServerConfig {
        allowed_origin: Some(origin.to_string()),
        ..ServerConfig::default()
    }
}

/// Every four-letter word over `a..=z` with the last letter in `a..=j`.
fn large_dictionary() -> Vec<String> {
    let mut words = Vec::with_capacity(26 * 26 * 26 * 10);
    for a in b'a'..=b'z' {
        for b in b'a'..=b'z' {
            for c in b'a'..=b'z' {
                for d in b'a'..=b'j' {
                    words.push(String::from_utf8(vec![a, b, c, d]).unwrap());
                }
            }
        }
    }
    words
}

fn default_app() -> Router {
    test_app(&["heat", "meat", "mead", "meld", "mold", "cold", "cat", "xyz"])
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_ping() {
    let (status, body) = get(default_app(), "/api/v1/ping").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "pong" }));
}

#[tokio::test]
async fn test_all_words() {
    let (status, body) = get(test_app(&["cat", "Cot", "cat"]), "/api/v1/allWords").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "words": ["cat", "cot"] }));
}

#[tokio::test]
async fn test_words_returns_same_length_pair() {
    let (status, body) = get(default_app(), "/api/v1/words").await;
    assert_eq!(status, StatusCode::OK);
    let from = body["from"].as_str().unwrap();
    let to = body["to"].as_str().unwrap();
    assert_ne!(from, to);
    assert_eq!(from.len(), to.len());
}

#[tokio::test]
async fn test_words_without_pair() {
    let (status, body) = get(test_app(&["cat", "bird"]), "/api/v1/words").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_validate() {
    let (_, body) = get(default_app(), "/api/v1/validate?word=heat&word=cold").await;
    assert_eq!(body, json!({ "success": true }));

    let (_, body) = get(default_app(), "/api/v1/validate?word=heat&word=nope").await;
    assert_eq!(body, json!({ "success": false }));
}

#[tokio::test]
async fn test_solve() {
    let (status, body) = get(default_app(), "/api/v1/solve?from=heat&to=cold").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "from": "heat",
            "to": "cold",
            "solution": ["heat", "meat", "mead", "meld", "mold", "cold"]
        })
    );
}

#[tokio::test]
async fn test_solve_missing_words() {
    let (status, body) = get(default_app(), "/api/v1/solve?from=heat").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Invalid words provided" }));
}

#[tokio::test]
async fn test_solve_invalid_input() {
    let (status, _) = get(default_app(), "/api/v1/solve?from=heat&to=cat").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(default_app(), "/api/v1/solve?from=heat&to=nope").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "'nope' is not in the dictionary" }));
}

#[tokio::test]
async fn test_solve_unreachable() {
    let (status, body) = get(default_app(), "/api/v1/solve?from=cat&to=xyz").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "no ladder exists from 'cat' to 'xyz'" }));
}

#[tokio::test]
async fn test_hint() {
    let (status, body) = get(default_app(), "/api/v1/hint?from=heat&to=cold").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "hint": "meat", "numLeft": 4 }));
}

#[tokio::test]
async fn test_hint_already_solved() {
    let (status, _) = get(default_app(), "/api/v1/hint?from=cold&to=cold").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_solve_timeout_reports_no_ladder() {
    let words = large_dictionary();
    let store = Arc::new(DictionaryStore::new(WordIndex::build(&words)));
    let state = AppState::new(store, StdRng::seed_from_u64(9), Duration::from_nanos(1));

    let (status, body) = get(router(state), "/api/v1/solve?from=AAAA&to=zzzj").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "message": "no ladder exists from 'aaaa' to 'zzzj'" })
    );
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = app(test_state(&["heat", "meat"]), &cors_config("http://example.com")).unwrap();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/ping")
        .header("origin", "http://example.com")
        .header("access-control-request-method", "GET")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "http://example.com");
    assert_eq!(headers["access-control-allow-methods"], "GET,POST");
    assert_eq!(
        headers["access-control-allow-headers"],
        "content-type,origin,accept"
    );
    assert_eq!(headers["access-control-max-age"], "1728000");
}

#[tokio::test]
async fn test_cors_on_simple_request() {
    let app = app(test_state(&["heat", "meat"]), &cors_config("http://example.com")).unwrap();
    let request = Request::builder()
        .uri("/api/v1/ping")
        .header("origin", "http://example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://example.com"
    );
}

#[tokio::test]
async fn test_no_cors_headers_without_origin() {
    let app = app(test_state(&["heat", "meat"]), &ServerConfig::default()).unwrap();
    let request = Request::builder()
        .uri("/api/v1/ping")
        .header("origin", "http://example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(!response.headers().contains_key("access-control-allow-origin"));
}

#[test]
fn test_invalid_origin_is_rejected() {
    let result = app(test_state(&["heat", "meat"]), &cors_config("bad\norigin"));
    assert!(result.is_err());
}
