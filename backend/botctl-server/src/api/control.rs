//! JSON control endpoints
//!
//! Supervisor calls block on the filesystem and the process table, so they
//! run on the blocking pool.

use crate::{AdminGrant, ApiResult, AppState};

use botctl_core::{ControlAction, ControlReport};

use axum::{Json, extract::State, http::StatusCode};

/// POST /api/v1/bot/start
pub async fn start_bot(
    State(state): State<AppState>,
    admin: AdminGrant,
) -> ApiResult<(StatusCode, Json<ControlReport>)> {
    respond(run_action(&state, admin, ControlAction::Start).await?)
}

/// POST /api/v1/bot/stop
pub async fn stop_bot(
    State(state): State<AppState>,
    admin: AdminGrant,
) -> ApiResult<(StatusCode, Json<ControlReport>)> {
    respond(run_action(&state, admin, ControlAction::Stop).await?)
}

/// POST /api/v1/bot/restart
pub async fn restart_bot(
    State(state): State<AppState>,
    admin: AdminGrant,
) -> ApiResult<(StatusCode, Json<ControlReport>)> {
    respond(run_action(&state, admin, ControlAction::Restart).await?)
}

/// GET /api/v1/bot/status
pub async fn bot_status(
    State(state): State<AppState>,
    admin: AdminGrant,
) -> ApiResult<(StatusCode, Json<ControlReport>)> {
    respond(run_action(&state, admin, ControlAction::Status).await?)
}

/// Run one supervisor action off the async runtime.
pub async fn run_action(
    state: &AppState,
    admin: AdminGrant,
    action: ControlAction,
) -> ApiResult<ControlReport> {
    let supervisor = state.supervisor.clone();
    let AdminGrant { grant, .. } = admin;

    let report = tokio::task::spawn_blocking(move || supervisor.run(&grant, action)).await?;

    log::info!("{:?}: {}", action, report.message);
    Ok(report)
}

/// Failed operations keep the report body but not a 200.
fn respond(report: ControlReport) -> ApiResult<(StatusCode, Json<ControlReport>)> {
    Ok((status_for(&report), Json(report)))
}

pub fn status_for(report: &ControlReport) -> StatusCode {
    if !report.is_failure() {
        return StatusCode::OK;
    }

    match report.code {
        "EXECUTABLE_MISSING" | "CORRUPT_RECORD" => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
