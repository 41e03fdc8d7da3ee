//! 路由注册
//! 创建所有 API 路由并应用中间件
//!
//! 中间件按层执行：请求追踪 → 请求体大小限制 → 会话校验（仅受保护路由）→ handler。
//! 任何一层返回 `Err(AppError)` 都会直接结束请求。

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

use crate::{auth::middleware::session_gate, handlers, middleware::AppState};

const MAX_BODY_BYTES: usize = 64 * 1024;

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点（健康检查）
    let public_routes = Router::new().route("/health", get(handlers::health::health_check));

    // 认证路由（无需登录，成功后签发 Cookie）
    let auth_routes = Router::new()
        .route("/signup", post(handlers::auth::signup))
        .route("/signin", post(handlers::auth::signin))
        .route("/signout", post(handlers::auth::signout));

    // 需要登录的路由
    let protected_routes = Router::new()
        .route("/hello", get(handlers::auth::hello))
        .route(
            "/books",
            get(handlers::books::list_books).post(handlers::books::create_book),
        )
        .route(
            "/books/{id}",
            get(handlers::books::get_book)
                .put(handlers::books::update_book)
                .delete(handlers::books::delete_book),
        )
        .route_layer(axum::middleware::from_fn_with_state(state.clone(), session_gate));

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(protected_routes)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(axum::middleware::from_fn(crate::middleware::request_tracking_middleware))
        .with_state(state)
}
