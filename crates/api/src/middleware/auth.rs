//! JWT-based authorization extractors for Axum handlers.
//!
//! The engine only needs a yes/no answer to "may this call mutate
//! thresholds". [`Caller`] provides that answer for endpoints that also
//! serve anonymous reads; [`AuthUser`] rejects anonymous calls outright.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use eggwatch_core::error::CoreError;
use eggwatch_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's id in the identity service (from `claims.sub`).
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_user(parts, state)? {
            Some(user) => Ok(user),
            None => Err(AppError::Core(CoreError::Unauthorized(
                "Missing Authorization header".into(),
            ))),
        }
    }
}

/// The caller of a request that anonymous users may also make.
///
/// A missing `Authorization` header yields an anonymous caller; a present but
/// invalid token is still rejected with 401.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user: Option<AuthUser>,
}

impl Caller {
    /// Whether this caller may mutate thresholds.
    pub fn is_authorized(&self) -> bool {
        self.user.is_some()
    }
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Caller {
            user: bearer_user(parts, state)?,
        })
    }
}

/// Decode the bearer token, if one was sent.
fn bearer_user(parts: &Parts, state: &AppState) -> Result<Option<AuthUser>, AppError> {
    let Some(auth_header) = parts.headers.get("authorization") else {
        return Ok(None);
    };

    let auth_header = auth_header.to_str().map_err(|_| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid Authorization header".into(),
        ))
    })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid Authorization format. Expected: Bearer <token>".into(),
        ))
    })?;

    let claims = validate_token(token, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
    })?;

    Ok(Some(AuthUser {
        user_id: claims.sub,
    }))
}
