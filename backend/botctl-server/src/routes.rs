use crate::{AppState, api, health, panel};

use axum::{
    Router,
    routing::{get, post},
};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Browser panel
        .route("/", get(panel::home).post(panel::home_action))
        .route("/logs", get(panel::logs_page))
        // JSON API
        .route("/api/v1/bot/start", post(api::control::start_bot))
        .route("/api/v1/bot/stop", post(api::control::stop_bot))
        .route("/api/v1/bot/restart", post(api::control::restart_bot))
        .route("/api/v1/bot/status", get(api::control::bot_status))
        .route("/api/v1/bot/logs", get(api::logs::bot_logs))
        // Health check endpoints (no token)
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .with_state(state)
}
