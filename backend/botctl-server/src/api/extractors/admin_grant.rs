//! Axum extractor for the admin token

use crate::{ApiError, AppState};

use botctl_auth::Grant;

use std::future::Future;

use axum::extract::{FromRequestParts, Query};
use axum::http::{HeaderMap, header, request::Parts};
use serde::Deserialize;

pub const ADMIN_TOKEN_HEADER: &str = "X-Admin-Token";

#[derive(Debug, Default, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Proof that the request carried the admin token.
///
/// The token is looked up in the `X-Admin-Token` header, then an
/// `Authorization: Bearer` header, then the `token` query parameter. The
/// accepted token is kept so HTML pages can carry it into their links.
///
/// A `token` field in a form body is not read: extraction happens before
/// the body is consumed, so the panel's forms post to `/?token=...`
/// instead.
pub struct AdminGrant {
    pub grant: Grant,
    pub token: String,
}

impl AdminGrant {
    fn presented_token(parts: &Parts) -> Option<String> {
        Self::header_token(&parts.headers).or_else(|| {
            Query::<TokenQuery>::try_from_uri(&parts.uri)
                .ok()
                .and_then(|Query(query)| query.token)
        })
    }

    fn header_token(headers: &HeaderMap) -> Option<String> {
        if let Some(value) = headers.get(ADMIN_TOKEN_HEADER)
            && let Ok(token) = value.to_str()
        {
            return Some(token.to_string());
        }

        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string())
    }
}

impl FromRequestParts<AppState> for AdminGrant {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let token = Self::presented_token(parts);
            let grant = state.validator.authorize(token.as_deref())?;

            log::debug!("Authorized {} {}", parts.method, parts.uri.path());

            Ok(AdminGrant {
                grant,
                token: token.unwrap_or_default(),
            })
        }
    }
}
