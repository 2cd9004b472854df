use crate::ApiError;

use botctl_auth::TokenValidator;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

async fn json_of(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_missing_token_converts_to_403() {
    let auth_error = TokenValidator::new("secret").authorize(None).unwrap_err();

    let (status, json) = json_of(ApiError::from(auth_error)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"]["code"], "MISSING_TOKEN");
}

#[tokio::test]
async fn test_invalid_token_message_does_not_echo_token() {
    let auth_error = TokenValidator::new("secret")
        .authorize(Some("attacker-guess"))
        .unwrap_err();

    let (status, json) = json_of(ApiError::from(auth_error)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"]["code"], "INVALID_TOKEN");
    let message = json["error"]["message"].as_str().unwrap();
    assert!(!message.contains("attacker-guess"));
    assert!(!message.contains("secret"));
}

#[tokio::test]
async fn test_bad_request_returns_400() {
    let error = ApiError::BadRequest {
        message: "lines must be a non-negative integer".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = json_of(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_internal_error_returns_500() {
    let error = ApiError::Internal {
        message: "Supervisor task failed".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = json_of(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn test_panicked_blocking_task_converts_to_internal() {
    let join_error = tokio::task::spawn_blocking(|| -> u8 { panic!("boom") })
        .await
        .unwrap_err();

    let (status, _) = json_of(ApiError::from(join_error)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
