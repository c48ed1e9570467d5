//! HTTP Middleware
//!
//! 按响应状态码分级记录日志

use axum::{
    extract::Request,
    http::header::LOCATION,
    middleware::Next,
    response::Response,
};

/// 响应状态日志中间件
///
/// - 5xx: `error!`（目标 URL 配置错误会落在这里）
/// - 4xx: `warn!`
/// - 3xx: `debug!`，附带 Location
pub async fn status_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(%method, %uri, status = status.as_u16(), "HTTP server error");
    } else if status.is_client_error() {
        tracing::warn!(%method, %uri, status = status.as_u16(), "HTTP client error");
    } else if status.is_redirection() {
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        tracing::debug!(%method, %uri, status = status.as_u16(), location, "Redirected");
    }

    response
}
