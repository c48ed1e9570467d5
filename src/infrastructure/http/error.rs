//! HTTP Error Handling
//!
//! 重定向错误统一以 500 + 纯文本返回

use axum::{
    http::{
        header::{CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS},
        StatusCode,
    },
    response::{IntoResponse, Response},
};

use crate::domain::RedirectError;

impl IntoResponse for RedirectError {
    fn into_response(self) -> Response {
        // 5xx 已由状态日志中间件以 error 级别记录
        tracing::debug!(error = %self, "Redirect rejected");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [
                (CONTENT_TYPE, "text/plain; charset=utf-8"),
                (X_CONTENT_TYPE_OPTIONS, "nosniff"),
            ],
            format!("{}\n", self),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_missing_target_response() {
        let response = RedirectError::MissingTarget.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[X_CONTENT_TYPE_OPTIONS], "nosniff");

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Target URL is not set\n");
    }

    #[tokio::test]
    async fn test_invalid_target_response() {
        for err in [
            RedirectError::InvalidTargetScheme,
            RedirectError::UnencodableLocation,
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

            let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert_eq!(&body[..], b"Invalid Target URL\n");
        }
    }
}
