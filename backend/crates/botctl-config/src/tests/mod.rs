
use std::env;

use tempfile::TempDir;

/// Every variable `Config::load_from_dir` consults.
const OVERRIDE_VARS: [&str; 14] = [
    "BOT_NAME",
    "BOT_PATH",
    "BOT_INTERPRETER",
    "PID_FILE",
    "LOG_FILE",
    "ADMIN_TOKEN",
    "BOTCTL_HOST",
    "BOTCTL_PORT",
    "BOTCTL_LOG_LEVEL",
    "BOTCTL_LOG_COLORED",
    "BOTCTL_LOG_FILE",
    "BOTCTL_LOG_TAIL_LINES",
    "BOTCTL_LOG_REFRESH_SECS",
    "BOTCTL_CONFIG_DIR",
];

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Scratch config directory with every override variable cleared.
pub(crate) fn setup_config_dir() -> (TempDir, Vec<EnvGuard>) {
    let temp = TempDir::new().unwrap();
    let guards = OVERRIDE_VARS.iter().map(|key| EnvGuard::remove(key)).collect();
    (temp, guards)
}

pub(crate) fn write_toml(temp: &TempDir, contents: &str) {
    std::fs::write(temp.path().join(crate::CONFIG_FILENAME), contents).unwrap();
}
