//! Infrastructure Layer - 基础设施层
//!
//! - HTTP: host 运行时（axum 服务器、中间件）
//! - Plugin: handler trait、注册表、Base64 重定向模块

pub mod http;
pub mod plugin;

pub use self::http::{HttpServer, ServerConfig};
pub use plugin::{load_handler, HandlerRegistry, HttpHandler, PluginError};
