//! b64redirect - Base64 重定向服务
//!
//! 启动流程：加载配置 → 初始化日志 → 注册模块 → 解析 handler → 启动 HTTP 服务

use b64redirect::config::{load_config, print_config, LogConfig};
use b64redirect::infrastructure::http::{HttpServer, ServerConfig};
use b64redirect::infrastructure::plugin::{base64_redirect, load_handler, HandlerRegistry};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("b64redirect v{}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    // 显式注册模块
    let mut registry = HandlerRegistry::new();
    base64_redirect::register(&mut registry)?;

    // 目标 URL 无效时在这里失败，不会开始监听
    let handler = load_handler(&registry, &config.handler)
        .map_err(|e| anyhow::anyhow!("Failed to load handler: {}", e))?;

    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let server = HttpServer::new(server_config, handler);

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},b64redirect={},tower_http=debug", log.level, log.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
