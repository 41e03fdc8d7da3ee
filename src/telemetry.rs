//! 日志初始化
//! 部署环境输出 JSON，本地开发用 pretty

use crate::config::LoggingConfig;
use std::str::FromStr;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter, Layer,
};

/// sqlx 在 info 级别会逐条记录查询语句
const QUIET_TARGETS: &[&str] = &["sqlx=warn"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(format!(
                "Invalid log format: {}. Must be one of: json, pretty",
                s
            )),
        }
    }
}

/// 未设置 RUST_LOG 时使用的过滤规则
pub fn default_directives(level: &str) -> String {
    std::iter::once(level.to_lowercase())
        .chain(QUIET_TARGETS.iter().map(|t| t.to_string()))
        .collect::<Vec<_>>()
        .join(",")
}

/// 安装全局 subscriber；重复安装返回错误
pub fn init_telemetry(config: &LoggingConfig) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.level)));

    // 格式已在加载配置时校验过
    let format = config.format.parse().unwrap_or(LogFormat::Json);

    let log_layer = match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(false)
            .boxed(),
        LogFormat::Pretty => fmt::layer().pretty().with_target(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(log_layer)
        .try_init()?;

    tracing::info!(
        service = "bookworm",
        level = %config.level,
        format = ?format,
        "Logging initialized"
    );

    Ok(())
}
