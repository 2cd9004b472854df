#![allow(dead_code)]

//! Test infrastructure for botctl-server router tests

use botctl_auth::TokenValidator;
use botctl_config::{BotConfig, LogViewConfig};
use botctl_core::Supervisor;
use botctl_server::{AppState, build_router};

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

pub const TOKEN: &str = "test-token";
pub const BOT_NAME: &str = "Test Bot";

/// Router plus the scratch dir holding the bot, its PID file and its log.
pub struct TestApp {
    pub temp: TempDir,
    pub bot: BotConfig,
    pub state: AppState,
}

impl TestApp {
    /// A shell bot that prints one line and then sleeps.
    pub fn new() -> Self {
        Self::with_bot_name(BOT_NAME)
    }

    pub fn with_bot_name(name: &str) -> Self {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bot.sh");
        std::fs::write(&path, "echo test bot online\nexec sleep 30\n").unwrap();

        let bot = BotConfig {
            name: name.to_string(),
            path,
            interpreter: Some("/bin/sh".to_string()),
            pid_file: temp.path().join("bot.pid"),
            log_file: temp.path().join("bot.log"),
        };

        let state = AppState {
            supervisor: Arc::new(Supervisor::new(bot.clone())),
            validator: Arc::new(TokenValidator::new(TOKEN)),
            log_view: LogViewConfig::default(),
        };

        Self { temp, bot, state }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router().oneshot(request).await.unwrap()
    }

    pub fn write_log(&self, content: &str) {
        std::fs::write(&self.bot.log_file, content).unwrap();
    }

    pub fn write_pid_file(&self, content: &str) {
        std::fs::write(&self.bot.pid_file, content).unwrap();
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn with_token(uri: &str) -> String {
    let separator = if uri.contains('?') { '&' } else { '?' };
    format!("{uri}{separator}token={TOKEN}")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Poll until `condition` holds or five seconds pass.
pub async fn eventually<F, Fut>(mut condition: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if condition().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    false
}
