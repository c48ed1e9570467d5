//! Plugin Layer - Handler 模块
//!
//! Host 运行时与 handler 模块之间的接缝：
//! - `HttpHandler`: handler 必须实现的 trait
//! - `HandlerRegistry`: 模块 ID / 指令名 → 构造函数
//! - `base64_redirect`: Base64 重定向 handler
//! - `load_handler`: 启动时根据配置解析出 handler

pub mod base64_redirect;
mod error;
mod loader;
mod registry;

use axum::response::Response;
use http::request::Parts;

pub use base64_redirect::{Base64Redirect, Base64RedirectConfig};
pub use error::PluginError;
pub use loader::load_handler;
pub use registry::{
    DirectiveConstructor, HandlerRegistry, JsonConstructor, ModuleInfo, HANDLER_NAMESPACE,
};

/// 终结型 HTTP handler
///
/// 每个请求调用一次 `serve`，同步返回完整响应；实现不得持有可变的跨请求状态。
pub trait HttpHandler: Send + Sync + 'static {
    fn serve(&self, request: &Parts) -> Response;

    /// 实例化之后、开始服务之前由 host 调用
    fn validate(&self) -> Result<(), PluginError> {
        Ok(())
    }
}
