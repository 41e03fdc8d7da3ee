//! bookworm 主入口

use bookworm::{
    config::AppConfig,
    db,
    handlers::health,
    middleware::AppState,
    repository::{BookRepository, UserRepository},
    routes, telemetry,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ===== CLI 参数处理 =====
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" => {
                println!("bookworm {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("未知参数: {}", args[1]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    // 加载 .env 文件（开发环境）
    // 生产环境应该直接设置环境变量，不依赖 .env 文件
    if let Ok(env) = std::env::var("BOOKWORM_ENV") {
        dotenv::from_filename(format!(".env.{}", env)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::dotenv().ok();
    }

    health::set_start_time();

    // 1. 加载配置（缺少数据库地址或签名密钥时直接退出）
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    // 2. 初始化日志
    telemetry::init_telemetry(&config.logging)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "bookworm starting...");

    // 3. 数据库连接池 + 迁移
    let db_pool = db::connect(&config.database).await?;

    // 4. 构建应用状态
    let app_state = Arc::new(AppState::new(
        config.clone(),
        Arc::new(UserRepository::new(db_pool.clone())),
        Arc::new(BookRepository::new(db_pool.clone())),
    )?);

    // 5. 构建路由
    let app = routes::create_router(app_state);

    // 6. 启动服务器
    let addr = &config.server.addr;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(addr = %addr, "Server listening");

    // 7. 优雅关闭
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 等待进行中的查询结束，最多等待配置的超时时间
    let timeout = std::time::Duration::from_secs(config.server.graceful_shutdown_timeout_secs);
    if tokio::time::timeout(timeout, db_pool.close()).await.is_err() {
        tracing::warn!("Graceful shutdown timeout reached, forcing exit");
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// 优雅关闭信号处理
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Terminate signal received, starting graceful shutdown");
        },
    }
}

/// 打印帮助信息
fn print_help() {
    println!("bookworm {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("用法: bookworm [选项]");
    println!();
    println!("选项:");
    println!("  --version     打印版本信息并退出");
    println!("  --help        打印此帮助信息并退出");
    println!();
    println!("环境变量:");
    println!("  BOOKWORM_DATABASE__URL        PostgreSQL 连接串（必填，兼容 DB_URL）");
    println!("  BOOKWORM_SECURITY__JWT_SECRET 令牌签名密钥，至少 32 字符（必填，兼容 JWT_SECRET）");
    println!("  BOOKWORM_SERVER__ADDR         监听地址，默认 0.0.0.0:8080");
}
