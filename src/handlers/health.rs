//! 健康检查处理器

use crate::middleware::AppState;
use axum::{extract::State, http::StatusCode, Json};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

/// 存活探针响应
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
}

/// 记录应用启动时间（在 main.rs 中调用）
pub fn set_start_time() {
    Lazy::force(&START_TIME);
}

/// 获取应用运行时间（秒）
pub fn get_uptime() -> u64 {
    START_TIME.elapsed().as_secs()
}

/// 存活探针；数据库不可达时返回 503
pub async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let (status, code, database) = match state.users.ping().await {
        Ok(()) => ("ok", StatusCode::OK, "ok"),
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            ("degraded", StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    (
        code,
        Json(HealthResponse {
            status,
            database,
            version: env!("CARGO_PKG_VERSION"),
            uptime_secs: get_uptime(),
        }),
    )
}
