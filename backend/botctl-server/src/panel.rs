//! Browser control panel.
//!
//! Two server-rendered pages: the control page (`/`) with one button per
//! [`PanelAction`], and the log page (`/logs`) that reloads itself. The admin
//! token rides along in every link and form target as `?token=`.

use crate::{AdminGrant, ApiResult, AppState, api::logs::read_tail};

use botctl_core::{ControlAction, ControlReport, LogTailReport};

use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

const STYLE: &str = r#"
    body { background: #000; color: #0f0; font-family: monospace; }
    .cmd-box { border: 2px solid #0f0; padding: 20px; width: 700px; margin: 50px auto;
               background: #111; }
    .log-box { border: 2px solid #0f0; padding: 10px; width: 90%; margin: 20px auto;
               background: #111; height: 600px; overflow-y: scroll; white-space: pre-wrap; }
    .line { margin: 5px 0; }
    .error { color: #f33; }
    .hint { color: #888; }
    button { color: #0f0; background: none; border: none; cursor: pointer;
             font-family: monospace; font-size: 16px; }
    button:hover { text-decoration: underline; }
    a { color: #0f0; }
"#;

/// Buttons on the control page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelAction {
    Start,
    Stop,
    Restart,
    Refresh,
    ViewLogs,
}

impl PanelAction {
    /// The supervisor operation behind the button, if any.
    pub fn control_action(self) -> Option<ControlAction> {
        match self {
            Self::Start => Some(ControlAction::Start),
            Self::Stop => Some(ControlAction::Stop),
            Self::Restart => Some(ControlAction::Restart),
            Self::Refresh | Self::ViewLogs => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PanelForm {
    pub action: PanelAction,
}

/// GET /
pub async fn home(State(state): State<AppState>, admin: AdminGrant) -> ApiResult<Html<String>> {
    render_home(&state, admin, None).await
}

/// POST /
pub async fn home_action(
    State(state): State<AppState>,
    admin: AdminGrant,
    Form(form): Form<PanelForm>,
) -> ApiResult<Response> {
    if form.action == PanelAction::ViewLogs {
        return Ok(Redirect::to(&format!("/logs?token={}", admin.token)).into_response());
    }

    Ok(render_home(&state, admin, form.action.control_action())
        .await?
        .into_response())
}

/// GET /logs
pub async fn logs_page(
    State(state): State<AppState>,
    admin: AdminGrant,
) -> ApiResult<Html<String>> {
    let token = admin.token.clone();
    let tail = read_tail(&state, admin, state.log_view.tail_lines).await?;

    Ok(Html(logs_html(
        state.supervisor.bot_name(),
        &token,
        state.log_view.refresh_secs,
        &tail,
    )))
}

/// Run `action` (if any), then read the status it left behind.
async fn render_home(
    state: &AppState,
    admin: AdminGrant,
    action: Option<ControlAction>,
) -> ApiResult<Html<String>> {
    let supervisor = state.supervisor.clone();
    let AdminGrant { grant, token } = admin;

    let (outcome, status) = tokio::task::spawn_blocking(move || {
        let outcome = action.map(|action| supervisor.run(&grant, action));
        (outcome, supervisor.status(&grant))
    })
    .await?;

    if let Some(ref report) = outcome {
        log::info!("Panel {:?}: {}", report.action, report.message);
    }

    Ok(Html(home_html(
        state.supervisor.bot_name(),
        &token,
        outcome.as_ref(),
        &status,
    )))
}

pub fn home_html(
    bot_name: &str,
    token: &str,
    outcome: Option<&ControlReport>,
    status: &ControlReport,
) -> String {
    let name = html_escape(bot_name);
    let token = html_escape(token);

    let outcome_lines = outcome.map(report_lines).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>CMD Control - {name}</title>
    <style>{STYLE}</style>
</head>
<body>
    <div class="cmd-box">
        <div class="line">(C) Bot Management Panel</div>
        <div class="line">&nbsp;</div>
{outcome_lines}        <div class="line">C:\Bot\{name}&gt; status</div>
{status_lines}        <form method="post" action="/?token={token}">
            <div class="line">
                [1] <button type="submit" name="action" value="start">Start</button> |
                [2] <button type="submit" name="action" value="stop">Stop</button> |
                [3] <button type="submit" name="action" value="restart">Restart</button>
            </div>
            <div class="line">
                [4] <button type="submit" name="action" value="view_logs">View Logs</button>
            </div>
            <div class="line">
                [0] <button type="submit" name="action" value="refresh">Refresh</button>
            </div>
        </form>
    </div>
</body>
</html>
"#,
        status_lines = report_lines(status),
    )
}

pub fn logs_html(bot_name: &str, token: &str, refresh_secs: u64, tail: &LogTailReport) -> String {
    let name = html_escape(bot_name);
    let token = html_escape(token);
    let text = html_escape(&tail.text);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Logs - {name}</title>
    <meta http-equiv="refresh" content="{refresh_secs}">
    <style>{STYLE}</style>
</head>
<body>
    <div class="log-box">{text}</div>
    <div style="text-align:center; margin-top:10px;">
        <a href="/?token={token}">&larr; Back</a>
    </div>
</body>
</html>
"#
    )
}

fn report_lines(report: &ControlReport) -> String {
    let class = if report.is_failure() { "line error" } else { "line" };
    let mut out = format!(
        "        <div class=\"{class}\">{}</div>\n",
        html_escape(&report.message)
    );

    if let Some(hint) = report.hint {
        out.push_str(&format!(
            "        <div class=\"line hint\">{}</div>\n",
            html_escape(hint)
        ));
    }

    out
}

/// Escape text for HTML element content and quoted attribute values.
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
