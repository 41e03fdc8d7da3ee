//! Session gate
//!
//! Turns the auth cookie into a [`CurrentUser`] or rejects the request with a
//! uniform 401 before it reaches a protected handler.

use crate::{
    auth::cookie::read_token, error::AppError, middleware::AppState, models::user::User,
};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use uuid::Uuid;

/// Identity resolved by the session gate (attached to request extensions)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

// 实现 FromRequestParts 以便在 handler 中直接提取 CurrentUser
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Resolve a presented token to a known user.
///
/// Every failure except a store error collapses into `Unauthorized`.
pub async fn authenticate(state: &AppState, token: &str) -> Result<CurrentUser, AppError> {
    let user_id = state.tokens.verify(token).map_err(|e| {
        tracing::debug!(reason = %e, "Session token rejected");
        AppError::Unauthorized
    })?;

    let user = state.users.find_by_id(user_id).await?.ok_or_else(|| {
        tracing::debug!(%user_id, "Session token refers to an unknown user");
        AppError::Unauthorized
    })?;

    Ok(CurrentUser::from(user))
}

/// Session gate middleware - 必须认证
pub async fn session_gate(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = read_token(&state.config.security, &jar).ok_or(AppError::Unauthorized)?;

    let current_user = authenticate(&state, &token).await?;

    tracing::debug!(user_id = %current_user.id, "Session accepted");

    req.extensions_mut().insert(current_user);

    Ok(next.run(req).await)
}
