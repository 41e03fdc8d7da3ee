//! 认证相关的 HTTP 处理器

use crate::{
    auth::{cookie, middleware::CurrentUser},
    error::AppError,
    extract::AppJson,
    middleware::AppState,
    models::auth::*,
};
use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};
use std::sync::Arc;

/// 注册并写入会话 Cookie
pub async fn signup(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    AppJson(req): AppJson<SignupRequest>,
) -> Result<(CookieJar, Json<Value>), AppError> {
    let token = state.auth_service.signup(req).await?;
    let jar = jar.add(cookie::session_cookie(&state.config.security, token));

    Ok((
        jar,
        Json(json!({
            "message": "User created successfully"
        })),
    ))
}

/// 登录并写入会话 Cookie
pub async fn signin(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    AppJson(req): AppJson<SigninRequest>,
) -> Result<(CookieJar, Json<Value>), AppError> {
    let token = state.auth_service.signin(req).await?;
    let jar = jar.add(cookie::session_cookie(&state.config.security, token));

    Ok((
        jar,
        Json(json!({
            "message": "User sign in successful"
        })),
    ))
}

/// 清除会话 Cookie（令牌本身无状态，在过期前依然有效）
pub async fn signout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<Value>) {
    (
        cookie::clear_session(&state.config.security, jar),
        Json(json!({
            "message": "User signed out"
        })),
    )
}

/// 冒烟测试路由
pub async fn hello(current_user: CurrentUser) -> Json<Value> {
    tracing::debug!(user_id = %current_user.id, "hello");

    Json(json!({
        "message": "Hello World!"
    }))
}
