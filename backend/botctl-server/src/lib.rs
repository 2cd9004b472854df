pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod panel;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;

pub use api::{
    control::{bot_status, restart_bot, start_bot, stop_bot},
    error::{ApiError, Result as ApiResult},
    extractors::admin_grant::{ADMIN_TOKEN_HEADER, AdminGrant},
    logs::bot_logs,
};
pub use panel::{PanelAction, PanelForm};
pub use state::AppState;

pub use crate::routes::build_router;
