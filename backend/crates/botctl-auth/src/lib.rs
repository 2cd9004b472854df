pub mod error;
pub mod grant;
pub mod token_validator;

pub use error::{AuthError, Result};
pub use grant::Grant;
pub use token_validator::TokenValidator;

#[cfg(test)]
mod tests;
