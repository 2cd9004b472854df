use botctl_auth::TokenValidator;
use botctl_config::{Config, LogViewConfig};
use botctl_core::Supervisor;

use std::sync::Arc;

/// Shared by every handler. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub supervisor: Arc<Supervisor>,
    pub validator: Arc<TokenValidator>,
    pub log_view: LogViewConfig,
}

impl AppState {
    /// Build from a validated config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            supervisor: Arc::new(Supervisor::new(config.bot.clone())),
            validator: Arc::new(TokenValidator::new(config.auth.token())),
            log_view: config.log_view.clone(),
        }
    }
}
