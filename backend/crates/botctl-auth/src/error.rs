use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing admin token {location}")]
    MissingToken { location: ErrorLocation },

    #[error("Invalid admin token {location}")]
    InvalidToken { location: ErrorLocation },
}

impl AuthError {
    /// Machine-readable code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingToken { .. } => "MISSING_TOKEN",
            Self::InvalidToken { .. } => "INVALID_TOKEN",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
