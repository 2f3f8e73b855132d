//! Optional JWT identity extractor for Axum handlers.

use std::convert::Infallible;

use axum::{extract::OptionalFromRequestParts, http::request::Parts};

use crate::services::auth as auth_service;
use crate::AppState;

/// Caller identity taken from a `Bearer` token.
///
/// Only available as `Option<CurrentUser>`: a missing or invalid token means
/// there is no signed-in user, never a rejection.
/// ```ignore
/// async fn handler(user: Option<CurrentUser>) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub uid: String,
}

impl OptionalFromRequestParts<AppState> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        let Some(token) = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
        else {
            return Ok(None);
        };

        match auth_service::validate_token(token, &state.config.jwt_secret) {
            Ok(claims) => Ok(Some(CurrentUser { uid: claims.sub })),
            Err(_) => {
                tracing::debug!("Ignoring invalid bearer token");
                Ok(None)
            }
        }
    }
}
