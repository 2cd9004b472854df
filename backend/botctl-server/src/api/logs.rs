use crate::{AdminGrant, ApiError, ApiResult, AppState};

use botctl_config::{MAX_TAIL_LINES, MIN_TAIL_LINES};
use botctl_core::LogTailReport;

use std::panic::Location;

use axum::{
    Json,
    extract::{Query, State},
};
use error_location::ErrorLocation;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    pub lines: Option<String>,
}

/// GET /api/v1/bot/logs?lines=N
///
/// `lines` defaults to the configured tail length and is clamped to
/// 1..=5000.
pub async fn bot_logs(
    State(state): State<AppState>,
    admin: AdminGrant,
    Query(query): Query<LogsQuery>,
) -> ApiResult<Json<LogTailReport>> {
    let lines = parse_lines(query.lines.as_deref(), state.log_view.tail_lines)?;
    Ok(Json(read_tail(&state, admin, lines).await?))
}

pub async fn read_tail(
    state: &AppState,
    admin: AdminGrant,
    lines: usize,
) -> ApiResult<LogTailReport> {
    let supervisor = state.supervisor.clone();
    let AdminGrant { grant, .. } = admin;

    Ok(tokio::task::spawn_blocking(move || supervisor.read_log_tail(&grant, lines)).await?)
}

#[track_caller]
fn parse_lines(raw: Option<&str>, default: usize) -> ApiResult<usize> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    let lines: usize = raw.trim().parse().map_err(|_| ApiError::BadRequest {
        message: format!("lines must be a non-negative integer, got {raw:?}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    Ok(lines.clamp(MIN_TAIL_LINES, MAX_TAIL_LINES))
}
