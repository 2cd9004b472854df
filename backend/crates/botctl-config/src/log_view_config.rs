use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_REFRESH_SECS, DEFAULT_TAIL_LINES, MAX_REFRESH_SECS,
    MAX_TAIL_LINES, MIN_REFRESH_SECS, MIN_TAIL_LINES,
};

use serde::Deserialize;

/// How the log page presents the bot's output.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogViewConfig {
    /// Lines shown on the log page
    pub tail_lines: usize,
    /// Auto-refresh interval of the log page
    pub refresh_secs: u64,
}

impl Default for LogViewConfig {
    fn default() -> Self {
        Self {
            tail_lines: DEFAULT_TAIL_LINES,
            refresh_secs: DEFAULT_REFRESH_SECS,
        }
    }
}

impl LogViewConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(MIN_TAIL_LINES..=MAX_TAIL_LINES).contains(&self.tail_lines) {
            return Err(ConfigError::log_view(format!(
                "log_view.tail_lines must be {}-{}, got {}",
                MIN_TAIL_LINES, MAX_TAIL_LINES, self.tail_lines
            )));
        }

        if !(MIN_REFRESH_SECS..=MAX_REFRESH_SECS).contains(&self.refresh_secs) {
            return Err(ConfigError::log_view(format!(
                "log_view.refresh_secs must be {}-{}, got {}",
                MIN_REFRESH_SECS, MAX_REFRESH_SECS, self.refresh_secs
            )));
        }

        Ok(())
    }
}
