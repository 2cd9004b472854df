use crate::{AuthError, Grant, Result};

use std::fmt;
use std::panic::Location;

use error_location::ErrorLocation;
use subtle::ConstantTimeEq;

/// Checks presented tokens against the configured admin token.
#[derive(Clone)]
pub struct TokenValidator {
    expected: Vec<u8>,
}

impl fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenValidator")
            .field("expected", &"<redacted>")
            .finish()
    }
}

impl TokenValidator {
    pub fn new(admin_token: &str) -> Self {
        Self {
            expected: admin_token.as_bytes().to_vec(),
        }
    }

    /// Issue a [`Grant`] when `presented` matches the admin token.
    ///
    /// An empty configured token never authorizes anything.
    #[track_caller]
    pub fn authorize(&self, presented: Option<&str>) -> Result<Grant> {
        let presented = match presented {
            Some(token) if !token.is_empty() => token,
            _ => {
                return Err(AuthError::MissingToken {
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        if self.expected.is_empty() || !self.matches(presented) {
            log::warn!("Rejected request with invalid admin token");
            return Err(AuthError::InvalidToken {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Grant::new())
    }

    fn matches(&self, presented: &str) -> bool {
        let presented = presented.as_bytes();
        // Length is not secret; ct_eq handles the content.
        presented.len() == self.expected.len() && bool::from(presented.ct_eq(&self.expected))
    }
}
