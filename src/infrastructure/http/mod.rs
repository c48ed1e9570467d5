//! HTTP Layer - Host 运行时
//!
//! 把解析出的 handler 挂载到 axum Router 上对外提供服务

pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod service;

pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use service::HandlerService;
