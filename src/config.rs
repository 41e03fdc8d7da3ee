//! 配置系统
//! 从环境变量加载所有配置，使用 Secret 包装敏感信息

use crate::telemetry::LogFormat;
use config::{Config, ConfigError, Environment};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

/// 30 天
pub const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 60 * 60 * 24 * 30;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址，例如 "0.0.0.0:8080"
    pub addr: String,
    /// 优雅关闭超时时间（秒）
    pub graceful_shutdown_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库连接 URL（使用 Secret 包装，防止日志泄露）
    pub url: Secret<String>,
    /// 最大连接数
    pub max_connections: u32,
    /// 最小连接数
    pub min_connections: u32,
    /// 获取连接超时时间（秒）
    pub acquire_timeout_secs: u64,
    /// 空闲连接超时时间（秒）
    pub idle_timeout_secs: u64,
    /// 连接最大生命周期（秒）
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别: trace, debug, info, warn, error
    pub level: String,
    /// 日志格式: json, pretty
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// JWT 签名密钥，没有默认值，缺失时启动失败
    pub jwt_secret: Secret<String>,
    /// 令牌及 Cookie 有效期（秒）
    pub token_lifetime_secs: u64,
    /// 承载令牌的 Cookie 名称
    pub cookie_name: String,
    /// 是否给 Cookie 加 Secure 属性（仅 HTTPS 下开启）
    pub cookie_secure: bool,
    /// 读取/修改/删除图书时是否校验归属
    pub enforce_book_ownership: bool,
    /// Argon2 内存开销（KiB）
    pub password_hash_memory_kib: u32,
    /// Argon2 迭代次数
    pub password_hash_iterations: u32,
    /// Argon2 并行度
    pub password_hash_parallelism: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Config::builder();

        // 添加默认配置；database.url 与 security.jwt_secret 必须显式提供
        settings = settings
            .set_default("server.addr", "0.0.0.0:8080")?
            .set_default("server.graceful_shutdown_timeout_secs", 30)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout_secs", 30)?
            .set_default("database.idle_timeout_secs", 600)?
            .set_default("database.max_lifetime_secs", 1800)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?
            .set_default("security.token_lifetime_secs", DEFAULT_TOKEN_LIFETIME_SECS)?
            .set_default("security.cookie_name", "Authorization")?
            .set_default("security.cookie_secure", false)?
            .set_default("security.enforce_book_ownership", false)?
            .set_default("security.password_hash_memory_kib", 19456)?
            .set_default("security.password_hash_iterations", 2)?
            .set_default("security.password_hash_parallelism", 1)?;

        // 从环境变量加载配置（前缀为 BOOKWORM_）
        settings = settings.add_source(
            Environment::with_prefix("BOOKWORM")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // 兼容旧部署使用的扁平变量名
        settings = settings
            .set_override_option("database.url", std::env::var("DB_URL").ok())?
            .set_override_option("security.jwt_secret", std::env::var("JWT_SECRET").ok())?;

        let config: AppConfig = settings.build()?.try_deserialize()?;

        // 验证配置
        config.validate()?;

        Ok(config)
    }

    /// 验证配置合法性
    fn validate(&self) -> Result<(), ConfigError> {
        // 验证日志级别
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                )))
            }
        }

        self.logging
            .format
            .parse::<LogFormat>()
            .map_err(ConfigError::Message)?;

        // 验证数据库连接池配置
        if self.database.max_connections < self.database.min_connections {
            return Err(ConfigError::Message(
                "max_connections must be >= min_connections".to_string(),
            ));
        }

        if self.database.url.expose_secret().is_empty() {
            return Err(ConfigError::Message("database.url must not be empty".to_string()));
        }

        // 验证 JWT 密钥长度（至少 32 字符）
        if self.security.jwt_secret.expose_secret().len() < 32 {
            return Err(ConfigError::Message(
                "JWT secret must be at least 32 characters long".to_string(),
            ));
        }

        // 验证令牌有效期
        if self.security.token_lifetime_secs < 3600 || self.security.token_lifetime_secs > 7776000 {
            return Err(ConfigError::Message(
                "token_lifetime_secs must be between 3600 and 7776000 (1 hour to 90 days)"
                    .to_string(),
            ));
        }

        if self.security.cookie_name.trim().is_empty() {
            return Err(ConfigError::Message("cookie_name must not be empty".to_string()));
        }

        // 验证 Argon2 参数
        if self.security.password_hash_memory_kib == 0
            || self.security.password_hash_iterations == 0
            || self.security.password_hash_parallelism == 0
        {
            return Err(ConfigError::Message(
                "password hash parameters must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
