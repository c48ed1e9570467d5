//! HTTP Routes
//!
//! Handler 作为 fallback 挂载，接管所有方法与路径

use std::sync::Arc;

use axum::{middleware, Router};
use tower_http::trace::{DefaultOnFailure, TraceLayer};
use tracing::Level;

use super::middleware::status_logging_middleware;
use super::service::HandlerService;
use crate::infrastructure::plugin::HttpHandler;

/// 创建路由
///
/// 5xx 只由状态日志中间件以 error 级别记录一次，TraceLayer 的失败事件降为 debug
pub fn create_routes(handler: Arc<dyn HttpHandler>) -> Router {
    Router::new()
        .fallback_service(HandlerService::new(handler))
        .layer(middleware::from_fn(status_logging_middleware))
        .layer(
            TraceLayer::new_for_http().on_failure(DefaultOnFailure::new().level(Level::DEBUG)),
        )
}
