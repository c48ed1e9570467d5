//! b64redirect - Base64 重定向 handler
//!
//! 把请求 URL 做 base64 编码后追加到目标 URL，以 302 重定向。
//!
//! 领域层 (domain/):
//! - Redirect Context: 目标 URL、subject URL、重定向地址构造
//!
//! 配置 (config/):
//! - 多源应用配置（默认值 / TOML / 环境变量）
//! - handler 文本指令解析
//!
//! 基础设施层 (infrastructure/):
//! - Plugin: `HttpHandler` trait、注册表、`base64_redirect` 模块
//! - HTTP: axum host 运行时

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use self::config::{load_config, AppConfig};
