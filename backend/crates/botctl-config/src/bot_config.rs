use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_BOT_NAME, DEFAULT_BOT_PATH, DEFAULT_LOG_FILE,
    DEFAULT_PID_FILE,
};

use std::path::PathBuf;

use serde::Deserialize;

/// The single managed child process.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Display name used in every status message
    pub name: String,
    /// Script or executable to launch
    pub path: PathBuf,
    /// Optional program that runs `path` (e.g. `python3`)
    pub interpreter: Option<String>,
    /// Single-record file holding the pid of the running bot
    pub pid_file: PathBuf,
    /// Append-only file receiving the bot's stdout and stderr
    pub log_file: PathBuf,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: String::from(DEFAULT_BOT_NAME),
            path: PathBuf::from(DEFAULT_BOT_PATH),
            interpreter: None,
            pid_file: PathBuf::from(DEFAULT_PID_FILE),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl BotConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::bot("bot.name cannot be empty"));
        }

        for (field, path) in [
            ("bot.path", &self.path),
            ("bot.pid_file", &self.pid_file),
            ("bot.log_file", &self.log_file),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::bot(format!("{field} cannot be empty")));
            }
        }

        if self.pid_file == self.log_file {
            return Err(ConfigError::bot(
                "bot.pid_file and bot.log_file must be different files",
            ));
        }

        if let Some(interpreter) = &self.interpreter
            && interpreter.trim().is_empty()
        {
            return Err(ConfigError::bot(
                "bot.interpreter cannot be empty when set",
            ));
        }

        Ok(())
    }
}
