use crate::{ConfigError, ConfigErrorResult};

use std::fmt;

use serde::Deserialize;

/// Shared-secret access token required by every control and log request.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub admin_token: Option<String>,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("admin_token", &self.admin_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AuthConfig {
    /// The token travels in query strings and links, so it is restricted to
    /// characters that never need percent-encoding.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let token = match self.admin_token.as_deref() {
            Some(token) if !token.is_empty() => token,
            _ => {
                return Err(ConfigError::auth(
                    "auth.admin_token is required (set ADMIN_TOKEN)",
                ));
            }
        };

        if !token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'))
        {
            return Err(ConfigError::auth(
                "auth.admin_token may only contain ASCII letters, digits, '-', '_', '.' or '~'",
            ));
        }

        Ok(())
    }

    /// Token after validation. Empty when unset, which `validate()` rejects.
    pub fn token(&self) -> &str {
        self.admin_token.as_deref().unwrap_or_default()
    }
}
