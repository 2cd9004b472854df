use crate::{
    AuthConfig, BotConfig, CONFIG_FILENAME, ConfigError, ConfigErrorResult, LogViewConfig,
    LoggingConfig, ServerConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub bot: BotConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub log_view: LogViewConfig,
}

impl Config {
    /// Load config for the running process.
    ///
    /// Loading order:
    /// 1. Read `.env` from the working directory if present
    /// 2. Resolve the config directory (BOTCTL_CONFIG_DIR, else cwd)
    /// 3. Load botctl.toml if it exists, else use defaults
    /// 4. Apply environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let _ = dotenvy::dotenv();

        let config_dir = Self::config_dir()?;
        Self::load_from_dir(&config_dir)
    }

    /// Load from an explicit config directory, then apply env overrides.
    pub fn load_from_dir(config_dir: &Path) -> ConfigErrorResult<Self> {
        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: BOTCTL_CONFIG_DIR env var > current working directory
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var("BOTCTL_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))
    }

    /// Validate all configuration.
    /// Call after load() so that a bad setup fails before serving anything.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.bot.validate()?;
        self.server.validate()?;
        self.auth.validate()?;
        self.log_view.validate()?;

        Ok(())
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs the admin token).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  bot: {} ({})", self.bot.name, self.bot.path.display());
        if let Some(ref interpreter) = self.bot.interpreter {
            info!("  interpreter: {interpreter}");
        }
        info!("  pid file: {}", self.bot.pid_file.display());
        info!("  bot log: {}", self.bot.log_file.display());
        info!("  server: {}", self.bind_addr());
        info!(
            "  auth: {}",
            if self.auth.admin_token.is_some() {
                "admin token set"
            } else {
                "admin token MISSING"
            }
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
        info!(
            "  log view: {} lines, refresh {}s",
            self.log_view.tail_lines, self.log_view.refresh_secs
        );
    }

    fn apply_env_overrides(&mut self) {
        // Bot (names kept from earlier deployments of the panel)
        Self::apply_env_string("BOT_NAME", &mut self.bot.name);
        Self::apply_env_path("BOT_PATH", &mut self.bot.path);
        Self::apply_env_option_string("BOT_INTERPRETER", &mut self.bot.interpreter);
        Self::apply_env_path("PID_FILE", &mut self.bot.pid_file);
        Self::apply_env_path("LOG_FILE", &mut self.bot.log_file);

        // Auth
        Self::apply_env_option_string("ADMIN_TOKEN", &mut self.auth.admin_token);

        // Server
        Self::apply_env_string("BOTCTL_HOST", &mut self.server.host);
        Self::apply_env_parse("BOTCTL_PORT", &mut self.server.port);

        // Logging
        Self::apply_env_parse("BOTCTL_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("BOTCTL_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("BOTCTL_LOG_FILE", &mut self.logging.file);

        // Log view
        Self::apply_env_parse("BOTCTL_LOG_TAIL_LINES", &mut self.log_view.tail_lines);
        Self::apply_env_parse("BOTCTL_LOG_REFRESH_SECS", &mut self.log_view.refresh_secs);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for path values
    fn apply_env_path(var_name: &str, target: &mut PathBuf) {
        if let Ok(val) = std::env::var(var_name) {
            *target = PathBuf::from(val);
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
