mod auth_config;
mod bot_config;
mod config;
mod error;
mod log_level;
mod log_view_config;
mod logging_config;
mod server_config;

#[cfg(test)]
mod tests;

pub use auth_config::AuthConfig;
pub use bot_config::BotConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use log_view_config::LogViewConfig;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;

/// Name of the optional TOML file inside the config directory.
pub const CONFIG_FILENAME: &str = "botctl.toml";

// Bot
const DEFAULT_BOT_NAME: &str = "Bot";
const DEFAULT_BOT_PATH: &str = "bot.py";
const DEFAULT_PID_FILE: &str = "bot.pid";
const DEFAULT_LOG_FILE: &str = "bot.log";

// Server
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8082;

// Logging
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;

// Log view
pub const DEFAULT_TAIL_LINES: usize = 100;
pub const MIN_TAIL_LINES: usize = 1;
pub const MAX_TAIL_LINES: usize = 5000;
const DEFAULT_REFRESH_SECS: u64 = 3;
const MIN_REFRESH_SECS: u64 = 1;
const MAX_REFRESH_SECS: u64 = 3600;
