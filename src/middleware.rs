//! HTTP 中间件
//! 应用状态与请求追踪

use crate::{
    auth::{jwt::TokenService, password::PasswordHasher},
    config::AppConfig,
    error::AppError,
    repository::{BookStore, UserStore},
    services::AuthService,
};
use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// 应用状态
///
/// 存储实现以 trait 对象注入，生产环境为 Postgres 仓储，测试可替换为内存实现。
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub users: Arc<dyn UserStore>,
    pub books: Arc<dyn BookStore>,
    pub tokens: Arc<TokenService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// 根据配置构建令牌服务、密码哈希器和认证服务
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        books: Arc<dyn BookStore>,
    ) -> Result<Self, AppError> {
        let tokens = Arc::new(TokenService::from_config(&config)?);
        let hasher = Arc::new(PasswordHasher::from_config(&config)?);
        let auth_service = Arc::new(AuthService::new(users.clone(), tokens.clone(), hasher));

        Ok(Self {
            config,
            users,
            books,
            tokens,
            auth_service,
        })
    }
}

/// 请求追踪中间件
/// 为每个请求生成 trace_id 和 request_id，并记录指标
pub async fn request_tracking_middleware(req: Request, next: Next) -> Response {
    let trace_id = extract_or_generate_trace_id(req.headers());
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().to_string();
    let uri = req.uri().path().to_string();

    let span = tracing::info_span!(
        "http_request",
        trace_id = %trace_id,
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    async move {
        let start = Instant::now();

        let mut response = next.run(req).await;

        let elapsed = start.elapsed();
        let status = response.status().as_u16();

        let method_name = match method.as_str() {
            "GET" => "GET",
            "POST" => "POST",
            "PUT" => "PUT",
            "DELETE" => "DELETE",
            _ => "OTHER",
        };

        metrics::counter!(
            "http_requests_total",
            "method" => method_name,
            "status" => status.to_string()
        )
        .increment(1);
        metrics::histogram!("http_request_duration_seconds").record(elapsed.as_secs_f64());

        tracing::info!(
            method = %method,
            uri = %uri,
            status = status,
            elapsed_ms = elapsed.as_millis() as u64,
            "Request completed"
        );

        // 在响应头中回写 trace_id / request_id
        if let Ok(value) = HeaderValue::from_str(&trace_id) {
            response.headers_mut().insert("x-trace-id", value);
        }
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert("x-request-id", value);
        }

        response
    }
    .instrument(span)
    .await
}

/// 从请求头中提取或生成 trace_id
fn extract_or_generate_trace_id(headers: &HeaderMap) -> String {
    headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty() && s.len() <= 128)
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
