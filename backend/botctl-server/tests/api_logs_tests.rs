//! Integration tests for the log tail endpoint
mod common;

use crate::common::{TestApp, body_json, get, with_token};

use axum::http::StatusCode;

fn numbered(count: usize) -> String {
    (1..=count).map(|n| format!("line {n}\n")).collect()
}

#[tokio::test]
async fn test_missing_log_returns_placeholder() {
    let app = TestApp::new();

    let response = app.send(get(&with_token("/api/v1/bot/logs"))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["code"], "LOG_MISSING");
    assert_eq!(json["text"], "No log file yet.");
}

#[tokio::test]
async fn test_default_tail_is_configured_line_count() {
    let app = TestApp::new();
    app.write_log(&numbered(500));

    let response = app.send(get(&with_token("/api/v1/bot/logs"))).await;

    let json = body_json(response).await;
    let lines = json["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 100);
    assert_eq!(lines[0], "line 401");
    assert_eq!(lines[99], "line 500");
}

#[tokio::test]
async fn test_lines_parameter_limits_tail() {
    let app = TestApp::new();
    app.write_log(&numbered(50));

    let response = app.send(get(&with_token("/api/v1/bot/logs?lines=3"))).await;

    let json = body_json(response).await;
    assert_eq!(json["text"], "line 48\nline 49\nline 50");
}

#[tokio::test]
async fn test_lines_parameter_is_clamped() {
    let app = TestApp::new();
    app.write_log(&numbered(10));

    let low = body_json(app.send(get(&with_token("/api/v1/bot/logs?lines=0"))).await).await;
    let high =
        body_json(app.send(get(&with_token("/api/v1/bot/logs?lines=99999999"))).await).await;

    assert_eq!(low["lines"].as_array().unwrap().len(), 1);
    assert_eq!(high["lines"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_non_numeric_lines_is_bad_request() {
    let app = TestApp::new();

    let response = app.send(get(&with_token("/api/v1/bot/logs?lines=many"))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}
